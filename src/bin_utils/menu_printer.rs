use std::io::Write;

use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    account::TransactionKind,
    processor::{AccountSummary, Statement},
};

pub const MENU: &str = "
================ MENU ================
[d]  Deposit
[s]  Withdraw
[sa] Balance
[e]  Statement
[nc] New account
[lc] List accounts
[nu] New customer
[q]  Quit
=> ";

const SEPARATOR: &str = "==============================";

pub struct MenuPrinter<'c> {
    currency: &'c str,
}

impl<'c> MenuPrinter<'c> {
    pub fn new(currency: &'c str) -> Self {
        Self { currency }
    }

    pub fn money(&self, amount: Decimal) -> String {
        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{} {:.2}", self.currency, amount)
    }

    pub fn print_balance<W: Write>(&self, output: &mut W, balance: Decimal) -> Result<()> {
        writeln!(output, "Balance: {}", self.money(balance))?;
        Ok(())
    }

    pub fn print_statement<W: Write>(&self, output: &mut W, statement: &Statement) -> Result<()> {
        writeln!(output, "\nStatement:")?;
        if statement.records.is_empty() {
            writeln!(output, "No transactions.")?;
        }
        for record in &statement.records {
            let kind = match record.kind() {
                TransactionKind::Deposit => "Deposit",
                TransactionKind::Withdrawal => "Withdrawal",
            };
            writeln!(output, "{kind}: {}", self.money(record.amount()))?;
        }
        writeln!(output, "\nBalance: {}", self.money(statement.balance))?;
        writeln!(output, "{SEPARATOR}")?;
        Ok(())
    }
}

pub fn print_accounts<W>(output: &mut W, accounts: &[AccountSummary]) -> Result<()>
where
    W: Write,
{
    if accounts.is_empty() {
        writeln!(output, "No accounts.")?;
    }
    for acc in accounts {
        writeln!(output, "{SEPARATOR}")?;
        writeln!(output, "Branch: {}", acc.branch)?;
        writeln!(output, "Account: {}", acc.number)?;
        writeln!(output, "Holder: {}", acc.owner_name)?;
    }
    Ok(())
}
