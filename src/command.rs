use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountError, AccountNumber, TransactionKind, TransactionRecord},
    customer::{IdentityNumber, NewCustomer},
    processor::{AccountSummary, Bank, BankError, Statement},
};

/// A monetary movement waiting to be applied to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionRequest {
    Deposit(Decimal),
    Withdrawal(Decimal),
}

impl TransactionRequest {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Deposit(_) => TransactionKind::Deposit,
            Self::Withdrawal(_) => TransactionKind::Withdrawal,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit(amount) | Self::Withdrawal(amount) => *amount,
        }
    }

    /// Runs the matching account primitive and, only when it succeeded,
    /// appends the record to the account history.
    pub fn apply(self, account: &mut Account) -> Result<(), AccountError> {
        match self {
            Self::Deposit(amount) => account.deposit(amount)?,
            Self::Withdrawal(amount) => account.withdraw(amount)?,
        }
        account.record(TransactionRecord::new(self.kind(), self.amount()));
        Ok(())
    }
}

/// Everything the menu front end can ask of a [`Bank`].
#[derive(Debug, Clone)]
pub enum BankCommand {
    RegisterCustomer(NewCustomer),
    OpenAccount {
        identity: IdentityNumber,
    },
    Deposit {
        identity: IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        identity: IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    },
    Balance {
        identity: IdentityNumber,
        number: AccountNumber,
    },
    Statement {
        identity: IdentityNumber,
        number: AccountNumber,
    },
    ListAccounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    CustomerRegistered(IdentityNumber),
    AccountOpened(AccountNumber),
    Deposited,
    Withdrawn,
    Balance(Decimal),
    Statement(Statement),
    Accounts(Vec<AccountSummary>),
}

impl BankCommand {
    pub fn execute<B>(self, bank: &mut B) -> Result<CommandOutcome, BankError>
    where
        B: Bank + ?Sized,
    {
        match self {
            Self::RegisterCustomer(new) => {
                bank.register_customer(new).map(CommandOutcome::CustomerRegistered)
            }
            Self::OpenAccount { identity } => {
                bank.open_account(&identity).map(CommandOutcome::AccountOpened)
            }
            Self::Deposit {
                identity,
                number,
                amount,
            } => bank
                .deposit(&identity, number, amount)
                .map(|()| CommandOutcome::Deposited),
            Self::Withdraw {
                identity,
                number,
                amount,
            } => bank
                .withdraw(&identity, number, amount)
                .map(|()| CommandOutcome::Withdrawn),
            Self::Balance { identity, number } => {
                bank.balance(&identity, number).map(CommandOutcome::Balance)
            }
            Self::Statement { identity, number } => {
                bank.statement(&identity, number).map(CommandOutcome::Statement)
            }
            Self::ListAccounts => Ok(CommandOutcome::Accounts(bank.list_accounts())),
        }
    }
}
