use std::fmt;

use chrono::NaiveDate;

use crate::{
    account::{Account, AccountError, AccountNumber},
    command::TransactionRequest,
};

/// National taxpayer-style id, the only key customers are looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentityNumber {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for IdentityNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration data for a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub identity: IdentityNumber,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub address: String,
}

#[derive(Debug)]
pub struct Customer {
    identity: IdentityNumber,
    full_name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl From<NewCustomer> for Customer {
    fn from(new: NewCustomer) -> Self {
        Self {
            identity: new.identity,
            full_name: new.full_name,
            birth_date: new.birth_date,
            address: new.address,
            accounts: Vec::new(),
        }
    }
}

impl Customer {
    pub fn identity(&self) -> &IdentityNumber {
        &self.identity
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Owned accounts, in creation order.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn owns(&self, number: AccountNumber) -> bool {
        self.accounts.contains(&number)
    }

    pub fn open_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Applies `request` to `account`.
    ///
    /// Ownership is not checked here, callers resolve the account through
    /// [`Customer::owns`] first.
    pub fn submit_transaction(
        &self,
        account: &mut Account,
        request: TransactionRequest,
    ) -> Result<(), AccountError> {
        request.apply(account)
    }
}
