/// Accounts, their balance rules and transaction history.
/// Primitive mutators never write history, see [`command::TransactionRequest`].
pub mod account;

/// Transaction requests applied to accounts, plus the command set the
/// menu front end drives the bank with.
pub mod command;

/// Bank settings loaded from an optional TOML file.
pub mod config;

/// Customers and the accounts they own.
pub mod customer;

/// Bank interface, plus "in memory" implementation holding every customer
/// and account for the lifetime of the process.
///
/// NOTE: nothing is persisted, a new process starts with an empty bank.
pub mod processor;

/// Menu loop used by the binary. Lives in the library so integration tests
/// can drive a whole session.
pub mod bin_utils;
