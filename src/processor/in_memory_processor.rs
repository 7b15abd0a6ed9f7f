use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountKind, AccountNumber, CheckingPolicy},
    command::TransactionRequest,
    config::BankConfig,
    customer::{Customer, IdentityNumber, NewCustomer},
};

use super::{AccountSummary, Bank, BankError, Statement};

/// Process-wide directory of customers and accounts.
#[derive(Default)]
pub struct InMemoryBank {
    config: BankConfig,
    customers: Vec<Customer>,
    accounts: BTreeMap<AccountNumber, Account>,
}

impl InMemoryBank {
    pub fn new(config: BankConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn find_customer(&self, identity: &IdentityNumber) -> Option<&Customer> {
        self.customers.iter().find(|c| c.identity() == identity)
    }

    /// Only looks at accounts owned by `customer`.
    pub fn find_account(&self, customer: &Customer, number: AccountNumber) -> Option<&Account> {
        if customer.owns(number) {
            self.accounts.get(&number)
        } else {
            None
        }
    }

    pub fn open_checking_account(
        &mut self,
        identity: &IdentityNumber,
        policy: CheckingPolicy,
    ) -> Result<AccountNumber, BankError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.identity() == identity)
            .ok_or_else(|| BankError::CustomerNotFound {
                identity: identity.clone(),
            })?;
        let number = self.accounts.len() as AccountNumber + 1;
        let account = Account::new(
            number,
            self.config.branch.clone(),
            identity.clone(),
            AccountKind::Checking(policy),
        );
        self.accounts.insert(number, account);
        customer.open_account(number);
        tracing::info!(%identity, number, "Checking account opened");
        Ok(number)
    }

    fn resolve(
        &self,
        identity: &IdentityNumber,
        number: AccountNumber,
    ) -> Result<&Account, BankError> {
        let customer = self
            .find_customer(identity)
            .ok_or_else(|| BankError::CustomerNotFound {
                identity: identity.clone(),
            })?;
        self.find_account(customer, number)
            .ok_or(BankError::AccountNotFound { number })
    }

    fn submit(
        &mut self,
        identity: &IdentityNumber,
        number: AccountNumber,
        request: TransactionRequest,
    ) -> Result<(), BankError> {
        let Self {
            customers,
            accounts,
            ..
        } = self;
        let customer = customers
            .iter()
            .find(|c| c.identity() == identity)
            .ok_or_else(|| BankError::CustomerNotFound {
                identity: identity.clone(),
            })?;
        let account = accounts
            .get_mut(&number)
            .filter(|_| customer.owns(number))
            .ok_or(BankError::AccountNotFound { number })?;
        if let Err(err) = customer.submit_transaction(account, request) {
            tracing::debug!(%identity, number, ?request, %err, "Transaction rejected");
            return Err(err.into());
        }
        tracing::debug!(%identity, number, ?request, balance = %account.balance(), "Transaction applied");
        Ok(())
    }
}

impl Bank for InMemoryBank {
    fn register_customer(&mut self, customer: NewCustomer) -> Result<IdentityNumber, BankError> {
        if self.find_customer(&customer.identity).is_some() {
            tracing::debug!(identity = %customer.identity, "Duplicate registration rejected");
            return Err(BankError::AlreadyExists {
                identity: customer.identity,
            });
        }
        let identity = customer.identity.clone();
        tracing::info!(%identity, name = %customer.full_name, "Customer registered");
        self.customers.push(Customer::from(customer));
        Ok(identity)
    }

    fn open_account(&mut self, identity: &IdentityNumber) -> Result<AccountNumber, BankError> {
        let policy = self.config.checking_policy();
        self.open_checking_account(identity, policy)
    }

    fn deposit(
        &mut self,
        identity: &IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.submit(identity, number, TransactionRequest::Deposit(amount))
    }

    fn withdraw(
        &mut self,
        identity: &IdentityNumber,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), BankError> {
        self.submit(identity, number, TransactionRequest::Withdrawal(amount))
    }

    fn balance(
        &self,
        identity: &IdentityNumber,
        number: AccountNumber,
    ) -> Result<Decimal, BankError> {
        self.resolve(identity, number).map(Account::balance)
    }

    fn statement(
        &self,
        identity: &IdentityNumber,
        number: AccountNumber,
    ) -> Result<Statement, BankError> {
        let account = self.resolve(identity, number)?;
        Ok(Statement {
            records: account.history().iter().copied().collect(),
            balance: account.balance(),
        })
    }

    fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .values()
            .map(|acc| AccountSummary {
                branch: acc.branch().to_string(),
                number: acc.number(),
                owner_name: self
                    .find_customer(acc.owner())
                    .map(|c| c.full_name().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::prelude::{FromPrimitive, Zero};

    use crate::account::{AccountError, TransactionKind};

    use super::*;

    fn new_customer(identity: &str, name: &str) -> NewCustomer {
        NewCustomer {
            identity: identity.into(),
            full_name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            address: "Rua A, 1 - Centro - SP/SP".to_string(),
        }
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn ana_silva_session() {
        let mut bank = InMemoryBank::default();
        let ana = bank
            .register_customer(new_customer("12345678900", "Ana Silva"))
            .unwrap();
        let number = bank.open_account(&ana).unwrap();
        assert_eq!(number, 1);

        bank.deposit(&ana, number, dec("500.00")).unwrap();
        assert_eq!(bank.balance(&ana, number).unwrap(), dec("500.00"));

        bank.withdraw(&ana, number, dec("200.00")).unwrap();
        assert_eq!(bank.balance(&ana, number).unwrap(), dec("300.00"));

        let err = bank.withdraw(&ana, number, dec("1000.00")).unwrap_err();
        assert!(matches!(
            err,
            BankError::AccountErr(AccountError::InsufficientFunds { .. })
        ));
        assert_eq!(bank.balance(&ana, number).unwrap(), dec("300.00"));

        let statement = bank.statement(&ana, number).unwrap();
        let records: Vec<_> = statement
            .records
            .iter()
            .map(|r| (r.kind(), r.amount()))
            .collect();
        assert_eq!(
            records,
            vec![
                (TransactionKind::Deposit, dec("500.00")),
                (TransactionKind::Withdrawal, dec("200.00")),
            ]
        );
        assert_eq!(statement.balance, dec("300.00"));
    }

    #[test]
    fn duplicate_registration() {
        let mut bank = InMemoryBank::default();
        bank.register_customer(new_customer("1", "Ana Silva"))
            .unwrap();
        let err = bank
            .register_customer(new_customer("1", "Someone Else"))
            .unwrap_err();
        assert_eq!(
            err,
            BankError::AlreadyExists {
                identity: "1".into()
            }
        );
        assert_eq!(bank.customers().count(), 1);
        assert_eq!(
            bank.find_customer(&"1".into()).unwrap().full_name(),
            "Ana Silva"
        );
    }

    #[test]
    fn account_numbers_are_sequential_across_customers() {
        let mut bank = InMemoryBank::default();
        let ana = bank.register_customer(new_customer("1", "Ana")).unwrap();
        let bia = bank.register_customer(new_customer("2", "Bia")).unwrap();
        assert_eq!(bank.open_account(&ana).unwrap(), 1);
        assert_eq!(bank.open_account(&bia).unwrap(), 2);
        assert_eq!(bank.open_account(&ana).unwrap(), 3);
        assert_eq!(bank.find_customer(&ana).unwrap().accounts(), &[1, 3]);

        let err = bank.open_account(&"3".into()).unwrap_err();
        assert!(matches!(err, BankError::CustomerNotFound { .. }));

        let summaries = bank.list_accounts();
        let listed: Vec<_> = summaries
            .iter()
            .map(|s| (s.branch.as_str(), s.number, s.owner_name.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![("0001", 1, "Ana"), ("0001", 2, "Bia"), ("0001", 3, "Ana")]
        );
    }

    #[test]
    fn lookup_is_scoped_to_owner() {
        let mut bank = InMemoryBank::default();
        let ana = bank.register_customer(new_customer("1", "Ana")).unwrap();
        let bia = bank.register_customer(new_customer("2", "Bia")).unwrap();
        let ana_acc = bank.open_account(&ana).unwrap();

        let err = bank.deposit(&bia, ana_acc, dec("10")).unwrap_err();
        assert_eq!(err, BankError::AccountNotFound { number: ana_acc });
        let err = bank.balance(&bia, ana_acc).unwrap_err();
        assert_eq!(err, BankError::AccountNotFound { number: ana_acc });

        let err = bank.statement(&"9".into(), ana_acc).unwrap_err();
        assert!(matches!(err, BankError::CustomerNotFound { .. }));

        let customer = bank.find_customer(&ana).unwrap();
        assert!(bank.find_account(customer, ana_acc).is_some());
        assert!(bank.find_account(customer, 42).is_none());
        assert_eq!(bank.balance(&ana, ana_acc).unwrap(), Decimal::zero());
    }

    #[test]
    fn rejected_transactions_leave_no_trace() {
        let mut bank = InMemoryBank::default();
        let ana = bank.register_customer(new_customer("1", "Ana")).unwrap();
        let number = bank.open_account(&ana).unwrap();
        bank.deposit(&ana, number, Decimal::from_u32(10).unwrap())
            .unwrap();

        let err = bank.deposit(&ana, number, Decimal::zero()).unwrap_err();
        assert!(matches!(
            err,
            BankError::AccountErr(AccountError::InvalidAmount { .. })
        ));
        let err = bank
            .withdraw(&ana, number, Decimal::from_i32(-5).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            BankError::AccountErr(AccountError::InvalidAmount { .. })
        ));
        assert!(bank
            .withdraw(&ana, number, Decimal::from_u32(11).unwrap())
            .is_err());

        let statement = bank.statement(&ana, number).unwrap();
        assert_eq!(statement.records.len(), 1);
        assert_eq!(statement.balance, Decimal::from_u32(10).unwrap());
    }

    #[test]
    fn deposit_overflow_is_rejected() {
        let mut bank = InMemoryBank::default();
        let ana = bank.register_customer(new_customer("1", "Ana")).unwrap();
        let number = bank.open_account(&ana).unwrap();
        bank.deposit(&ana, number, Decimal::MAX).unwrap();

        let err = bank.deposit(&ana, number, Decimal::MAX).unwrap_err();
        assert!(matches!(
            err,
            BankError::AccountErr(AccountError::BalanceOverflow { .. })
        ));

        let statement = bank.statement(&ana, number).unwrap();
        assert_eq!(statement.records.len(), 1);
        assert_eq!(statement.balance, Decimal::MAX);
    }

    #[test]
    fn custom_config_applies_to_new_accounts() {
        let config = BankConfig {
            branch: "0042".to_string(),
            overdraft_limit: Decimal::from_u32(50).unwrap(),
            withdrawal_cap: 1,
            ..Default::default()
        };
        let mut bank = InMemoryBank::new(config);
        let ana = bank.register_customer(new_customer("1", "Ana")).unwrap();
        let number = bank.open_account(&ana).unwrap();
        let acc = bank.find_account(bank.find_customer(&ana).unwrap(), number).unwrap();
        assert_eq!(acc.branch(), "0042");
        assert_eq!(
            acc.kind(),
            AccountKind::Checking(CheckingPolicy {
                overdraft_limit: Decimal::from_u32(50).unwrap(),
                withdrawal_cap: 1,
            })
        );

        let custom = bank
            .open_checking_account(&ana, CheckingPolicy::default())
            .unwrap();
        assert_eq!(custom, 2);
        assert_eq!(bank.list_accounts()[1].branch, "0042");
    }

    #[test]
    fn request_kind_and_amount() {
        let request = TransactionRequest::Withdrawal(dec("1.5"));
        assert_eq!(request.kind(), TransactionKind::Withdrawal);
        assert_eq!(request.amount(), dec("1.5"));
    }
}
