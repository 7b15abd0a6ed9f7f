use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, AccountNumber, TransactionRecord},
    customer::{IdentityNumber, NewCustomer},
};

pub mod in_memory_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Customer {identity} already exists")]
    AlreadyExists { identity: IdentityNumber },
    #[error("Customer {identity} not found")]
    CustomerNotFound { identity: IdentityNumber },
    #[error("Account {number} not found")]
    AccountNotFound { number: AccountNumber },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Ordered records of one account plus its balance at the time of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub records: Vec<TransactionRecord>,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub owner_name: String,
}

/// Boundary the menu front end talks to.
///
/// Accounts are always resolved through the customer that owns them, an
/// account number belonging to someone else is reported as not found.
pub trait Bank {
    fn register_customer(&mut self, customer: NewCustomer) -> Result<IdentityNumber, BankError>;

    fn open_account(&mut self, identity: &IdentityNumber) -> Result<AccountNumber, BankError>;

    fn deposit(
        &mut self,
        identity: &IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError>;

    fn withdraw(
        &mut self,
        identity: &IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError>;

    fn balance(&self, identity: &IdentityNumber, number: AccountNumber)
    -> Result<Decimal, BankError>;

    fn statement(
        &self,
        identity: &IdentityNumber,
        number: AccountNumber,
    ) -> Result<Statement, BankError>;

    /// All accounts in number order.
    fn list_accounts(&self) -> Vec<AccountSummary>;
}
