use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::customer::IdentityNumber;

pub type AccountNumber = u32;

pub const DEFAULT_BRANCH: &str = "0001";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// One accepted monetary movement. Only created after the balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRecord {
    kind: TransactionKind,
    amount: Decimal,
}

impl TransactionRecord {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Append-only, insertion order is chronological order.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<TransactionRecord>,
}

impl History {
    pub(crate) fn append(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Limits attached to a checking account.
///
/// NOTE: both values are stored but `Account::withdraw` never reads them,
/// a withdrawal is only bounded by the current balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingPolicy {
    pub overdraft_limit: Decimal,
    pub withdrawal_cap: u32,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            overdraft_limit: Decimal::from(1000),
            withdrawal_cap: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking(CheckingPolicy),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be greater than zero for {kind:?}, got {amount}")]
    InvalidAmount {
        kind: TransactionKind,
        amount: Decimal,
    },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Depositing {amount} would overflow balance {balance}")]
    BalanceOverflow { amount: Decimal, balance: Decimal },
}

#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    owner: IdentityNumber,
    kind: AccountKind,
    balance: Decimal,
    history: History,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        branch: impl Into<String>,
        owner: IdentityNumber,
        kind: AccountKind,
    ) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner,
            kind,
            balance: Decimal::zero(),
            history: History::default(),
        }
    }

    pub fn checking(number: AccountNumber, owner: IdentityNumber, policy: CheckingPolicy) -> Self {
        Self::new(number, DEFAULT_BRANCH, owner, AccountKind::Checking(policy))
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn owner(&self) -> &IdentityNumber {
        &self.owner
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Increases the balance. Does not touch the history, see
    /// [`crate::command::TransactionRequest::apply`].
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount {
                kind: TransactionKind::Deposit,
                amount,
            });
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                amount,
                balance: self.balance,
            })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidAmount {
                kind: TransactionKind::Withdrawal,
                amount,
            });
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub(crate) fn record(&mut self, record: TransactionRecord) {
        self.history.append(record);
    }
}
