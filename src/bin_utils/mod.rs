//! Interactive menu on top of [`crate::processor::Bank`]. Reads operator input
//! line by line, turns it into [`BankCommand`]s and prints the outcome.
//! Domain errors are printed and the menu is shown again, only I/O errors end
//! the session early.

use std::io::{BufRead, Write};

use anyhow::Result;
use menu_parser::{
    InputError, MenuOption, parse_account_number, parse_amount, parse_birth_date, parse_identity,
    parse_text,
};
use menu_printer::{MENU, MenuPrinter, print_accounts};

use crate::{
    command::{BankCommand, CommandOutcome},
    config::BankConfig,
    customer::{IdentityNumber, NewCustomer},
    processor::{BankError, in_memory_processor::InMemoryBank},
};

pub mod menu_parser;
pub mod menu_printer;

enum Flow {
    Continue,
    Quit,
}

/// Bails out of the current handler with `Flow::Quit` on end of input.
macro_rules! prompt_or_quit {
    ($self:ident, $label:expr) => {
        match $self.prompt($label)? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        }
    };
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: BankConfig,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let mut bank = InMemoryBank::new(self.config.clone());
        loop {
            let Some(line) = self.prompt(MENU)? else {
                break;
            };
            let flow = match line.parse::<MenuOption>() {
                Ok(option) => self.handle(option, &mut bank)?,
                Err(err) => {
                    tracing::debug!(%err, "Invalid menu option");
                    writeln!(
                        self.output,
                        "Invalid operation, please select one of the menu options."
                    )?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    fn handle(&mut self, option: MenuOption, bank: &mut InMemoryBank) -> Result<Flow> {
        match option {
            MenuOption::Deposit | MenuOption::Withdraw => self.transaction(option, bank),
            MenuOption::Balance | MenuOption::Statement => self.inquiry(option, bank),
            MenuOption::NewAccount => self.new_account(bank),
            MenuOption::ListAccounts => {
                self.execute(BankCommand::ListAccounts, bank)?;
                Ok(Flow::Continue)
            }
            MenuOption::NewCustomer => self.new_customer(bank),
            MenuOption::Quit => Ok(Flow::Quit),
        }
    }

    fn transaction(&mut self, option: MenuOption, bank: &mut InMemoryBank) -> Result<Flow> {
        let Some(identity) = self.known_customer(bank)? else {
            return Ok(Flow::Continue);
        };
        let label = match option {
            MenuOption::Deposit => "Deposit amount: ",
            _ => "Withdrawal amount: ",
        };
        let line = prompt_or_quit!(self, label);
        let amount = match parse_amount(&line) {
            Ok(amount) => amount,
            Err(err) => return self.reject(err),
        };
        let line = prompt_or_quit!(self, "Account number: ");
        let number = match parse_account_number(&line) {
            Ok(number) => number,
            Err(err) => return self.reject(err),
        };
        let command = match option {
            MenuOption::Deposit => BankCommand::Deposit {
                identity,
                number,
                amount,
            },
            _ => BankCommand::Withdraw {
                identity,
                number,
                amount,
            },
        };
        self.execute(command, bank)?;
        Ok(Flow::Continue)
    }

    fn inquiry(&mut self, option: MenuOption, bank: &mut InMemoryBank) -> Result<Flow> {
        let Some(identity) = self.known_customer(bank)? else {
            return Ok(Flow::Continue);
        };
        let line = prompt_or_quit!(self, "Account number: ");
        let number = match parse_account_number(&line) {
            Ok(number) => number,
            Err(err) => return self.reject(err),
        };
        let command = match option {
            MenuOption::Balance => BankCommand::Balance { identity, number },
            _ => BankCommand::Statement { identity, number },
        };
        self.execute(command, bank)?;
        Ok(Flow::Continue)
    }

    fn new_account(&mut self, bank: &mut InMemoryBank) -> Result<Flow> {
        let line = prompt_or_quit!(self, "Customer identity number: ");
        let identity = match parse_identity(&line) {
            Ok(identity) => identity,
            Err(err) => return self.reject(err),
        };
        self.execute(BankCommand::OpenAccount { identity }, bank)?;
        Ok(Flow::Continue)
    }

    fn new_customer(&mut self, bank: &mut InMemoryBank) -> Result<Flow> {
        let line = prompt_or_quit!(self, "Identity number (digits only): ");
        let identity = match parse_identity(&line) {
            Ok(identity) => identity,
            Err(err) => return self.reject(err),
        };
        if bank.find_customer(&identity).is_some() {
            writeln!(
                self.output,
                "A customer with this identity number already exists."
            )?;
            return Ok(Flow::Continue);
        }
        let line = prompt_or_quit!(self, "Full name: ");
        let full_name = match parse_text(&line, "Full name") {
            Ok(name) => name,
            Err(err) => return self.reject(err),
        };
        let line = prompt_or_quit!(self, "Birth date (dd/mm/yyyy): ");
        let birth_date = match parse_birth_date(&line) {
            Ok(date) => date,
            Err(err) => return self.reject(err),
        };
        let line = prompt_or_quit!(self, "Address (street, number - district - city/state): ");
        let address = line.trim().to_string();

        let command = BankCommand::RegisterCustomer(NewCustomer {
            identity,
            full_name,
            birth_date,
            address,
        });
        self.execute(command, bank)?;
        Ok(Flow::Continue)
    }

    /// Asks for the account holder and reports right away when unknown.
    fn known_customer(&mut self, bank: &InMemoryBank) -> Result<Option<IdentityNumber>> {
        let Some(line) = self.prompt("Account holder identity number: ")? else {
            return Ok(None);
        };
        let identity = match parse_identity(&line) {
            Ok(identity) => identity,
            Err(err) => {
                self.reject(err)?;
                return Ok(None);
            }
        };
        if bank.find_customer(&identity).is_none() {
            writeln!(self.output, "Customer not found.")?;
            return Ok(None);
        }
        Ok(Some(identity))
    }

    fn execute(&mut self, command: BankCommand, bank: &mut InMemoryBank) -> Result<()> {
        let printer = MenuPrinter::new(&self.config.currency_symbol);
        match command.execute(bank) {
            Ok(CommandOutcome::CustomerRegistered(_)) => {
                writeln!(self.output, "Customer registered successfully!")?
            }
            Ok(CommandOutcome::AccountOpened(number)) => {
                writeln!(self.output, "Account {number} opened successfully!")?
            }
            Ok(CommandOutcome::Deposited) => writeln!(self.output, "Deposit completed!")?,
            Ok(CommandOutcome::Withdrawn) => writeln!(self.output, "Withdrawal completed!")?,
            Ok(CommandOutcome::Balance(balance)) => {
                printer.print_balance(&mut *self.output, balance)?
            }
            Ok(CommandOutcome::Statement(statement)) => {
                printer.print_statement(&mut *self.output, &statement)?
            }
            Ok(CommandOutcome::Accounts(accounts)) => {
                print_accounts(&mut *self.output, &accounts)?
            }
            Err(err) => self.print_error(&err)?,
        }
        Ok(())
    }

    fn print_error(&mut self, err: &BankError) -> Result<()> {
        match err {
            BankError::CustomerNotFound { .. } => writeln!(self.output, "Customer not found.")?,
            BankError::AccountNotFound { .. } => writeln!(self.output, "Account not found.")?,
            err => writeln!(self.output, "Operation failed: {err}")?,
        }
        Ok(())
    }

    fn reject(&mut self, err: InputError) -> Result<Flow> {
        writeln!(self.output, "Invalid input: {err}")?;
        Ok(Flow::Continue)
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
