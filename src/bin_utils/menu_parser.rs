use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{account::AccountNumber, customer::IdentityNumber};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown menu option `{0}`")]
    UnknownOption(String),
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("`{0}` is not a valid account number")]
    InvalidAccountNumber(String),
    #[error("`{0}` is not a valid date, expected dd/mm/yyyy")]
    InvalidDate(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Deposit,
    Withdraw,
    Balance,
    Statement,
    NewAccount,
    ListAccounts,
    NewCustomer,
    Quit,
}

impl FromStr for MenuOption {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" => Ok(Self::Deposit),
            "s" => Ok(Self::Withdraw),
            "sa" => Ok(Self::Balance),
            "e" => Ok(Self::Statement),
            "nc" => Ok(Self::NewAccount),
            "lc" => Ok(Self::ListAccounts),
            "nu" => Ok(Self::NewCustomer),
            "q" => Ok(Self::Quit),
            other => Err(InputError::UnknownOption(other.to_string())),
        }
    }
}

pub fn parse_identity(input: &str) -> Result<IdentityNumber, InputError> {
    non_empty(input, "Identity number").map(IdentityNumber::from)
}

pub fn parse_text(input: &str, field: &'static str) -> Result<String, InputError> {
    non_empty(input, field).map(ToOwned::to_owned)
}

/// Sign is not checked here, non-positive amounts are rejected by the account.
pub fn parse_amount(input: &str) -> Result<Decimal, InputError> {
    let input = input.trim();
    Decimal::from_str(input).map_err(|_| InputError::InvalidAmount(input.to_string()))
}

pub fn parse_account_number(input: &str) -> Result<AccountNumber, InputError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| InputError::InvalidAccountNumber(input.to_string()))
}

/// Accepts `dd/mm/yyyy` as typed at the menu, or ISO `yyyy-mm-dd`.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, InputError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| InputError::InvalidDate(input.to_string()))
}

fn non_empty<'a>(input: &'a str, field: &'static str) -> Result<&'a str, InputError> {
    let input = input.trim();
    if input.is_empty() {
        Err(InputError::Empty(field))
    } else {
        Ok(input)
    }
}
