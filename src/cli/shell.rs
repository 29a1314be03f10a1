//! Interactive text menu
//!
//! The shell reads menu choices and field values line by line, calls into
//! the [`Bank`] and prints the outcome. It is generic over its input and
//! output so the same loop runs on stdin/stdout and on in-memory buffers.
//!
//! # Error Handling
//!
//! Domain errors (unknown account, insufficient funds, ...) are printed and
//! the menu is shown again. Text that does not parse as the requested value
//! (including bytes that are not valid UTF-8) is reported and the same field
//! is asked for again. Only failures reading the input or writing the output
//! end the session with an error; end of input ends it normally.

use crate::cli::OutputFormat;
use crate::core::{AccountFilter, Bank};
use crate::io::{write_accounts, write_statement};
use crate::types::{AccountNumber, BankError, NewCustomer, TaxId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info};

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[bc]\tSearch accounts
[nu]\tNew customer
[q]\tQuit
=> ";

/// Birth date layout accepted at registration
const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Deposit,
    Withdraw,
    Statement,
    NewCustomer,
    NewAccount,
    ListAccounts,
    SearchAccounts,
    Quit,
}

impl MenuOption {
    /// Parse a menu choice, ignoring case and surrounding whitespace
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "d" => Some(MenuOption::Deposit),
            "s" => Some(MenuOption::Withdraw),
            "e" => Some(MenuOption::Statement),
            "nu" => Some(MenuOption::NewCustomer),
            "nc" => Some(MenuOption::NewAccount),
            "lc" => Some(MenuOption::ListAccounts),
            "bc" => Some(MenuOption::SearchAccounts),
            "q" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// What the loop does after an option completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Read-eval-print loop over a [`Bank`]
pub struct Shell<R, W> {
    bank: Bank,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(bank: Bank, input: R, output: W, format: OutputFormat) -> Self {
        Shell {
            bank,
            input,
            output,
            format,
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Tear the shell down into its bank and output sink
    pub fn into_parts(self) -> (Bank, W) {
        (self.bank, self.output)
    }

    /// Run the menu loop until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Returns an `IoError` if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), BankError> {
        info!("session started");

        while let Some(choice) = self.read_line(MENU, "menu option")? {
            let flow = match MenuOption::parse(&choice) {
                Some(option) => self.dispatch(option)?,
                None => {
                    self.notice("Invalid operation, please select a valid option.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        info!("session ended");
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<Flow, BankError> {
        debug!(?option, "menu option selected");
        match option {
            MenuOption::Deposit => self.deposit(),
            MenuOption::Withdraw => self.withdraw(),
            MenuOption::Statement => self.statement(),
            MenuOption::NewCustomer => self.new_customer(),
            MenuOption::NewAccount => self.new_account(),
            MenuOption::ListAccounts => self.list_accounts(),
            MenuOption::SearchAccounts => self.search_accounts(),
            MenuOption::Quit => Ok(Flow::Exit),
        }
    }

    fn deposit(&mut self) -> Result<Flow, BankError> {
        let Some(number) = self.prompt_account()? else {
            return Ok(Flow::Exit);
        };
        if !self.account_exists(number)? {
            return Ok(Flow::Continue);
        }
        let Some(amount) = self.prompt_parsed::<Decimal>("Deposit amount: ", "amount")? else {
            return Ok(Flow::Exit);
        };

        match self.bank.deposit(number, amount) {
            Ok(_) => self.success("Deposit completed successfully!")?,
            Err(e) => self.fail(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow, BankError> {
        let Some(number) = self.prompt_account()? else {
            return Ok(Flow::Exit);
        };
        if !self.account_exists(number)? {
            return Ok(Flow::Continue);
        }
        let Some(amount) = self.prompt_parsed::<Decimal>("Withdrawal amount: ", "amount")? else {
            return Ok(Flow::Exit);
        };

        match self.bank.withdraw(number, amount) {
            Ok(_) => self.success("Withdrawal completed successfully!")?,
            Err(e) => self.fail(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn statement(&mut self) -> Result<Flow, BankError> {
        let Some(number) = self.prompt_account()? else {
            return Ok(Flow::Exit);
        };

        match self.bank.statement(number) {
            Ok(statement) => write_statement(&statement, self.format, &mut self.output)?,
            Err(e) => self.fail(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn new_customer(&mut self) -> Result<Flow, BankError> {
        let Some(tax_id) = self.read_line("Tax ID (numbers only): ", "tax ID")? else {
            return Ok(Flow::Exit);
        };
        // Refuse duplicates before asking for the remaining fields
        if self.bank.find_customer(&tax_id).is_ok() {
            let normalized = TaxId::normalize(&tax_id);
            self.fail(&BankError::duplicate_identity(normalized.as_str()))?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.read_line("Full name: ", "name")? else {
            return Ok(Flow::Exit);
        };
        let Some(birth_date) = self.prompt_with("Birth date (dd-mm-yyyy): ", "birth date", |s| {
            NaiveDate::parse_from_str(s, BIRTH_DATE_FORMAT).ok()
        })?
        else {
            return Ok(Flow::Exit);
        };
        let Some(address) =
            self.read_line("Address (street, number - district - city/state): ", "address")?
        else {
            return Ok(Flow::Exit);
        };

        let result = self
            .bank
            .register_customer(NewCustomer {
                name,
                birth_date,
                tax_id,
                address,
            })
            .map(|_| ());

        match result {
            Ok(()) => self.success("Customer created successfully!")?,
            Err(e) => self.fail(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn new_account(&mut self) -> Result<Flow, BankError> {
        let Some(tax_id) = self.read_line("Customer tax ID: ", "tax ID")? else {
            return Ok(Flow::Exit);
        };

        let result = self
            .bank
            .open_account(&tax_id)
            .map(|account| account.number());

        match result {
            Ok(number) => self.success(&format!("Account {number} created successfully!"))?,
            Err(e) => self.fail(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn list_accounts(&mut self) -> Result<Flow, BankError> {
        let accounts = self.bank.list_accounts();
        if accounts.is_empty() {
            self.notice("No accounts registered.")?;
        } else {
            write_accounts(&accounts, self.format, &mut self.output)?;
        }
        Ok(Flow::Continue)
    }

    fn search_accounts(&mut self) -> Result<Flow, BankError> {
        let Some(name) =
            self.read_line("Holder name contains (blank for any): ", "name filter")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(tax_id) = self.read_line("Tax ID (blank for any): ", "tax ID filter")? else {
            return Ok(Flow::Exit);
        };

        let accounts = self.bank.search(&AccountFilter::from_input(&name, &tax_id));
        if accounts.is_empty() {
            self.notice("No accounts match the search.")?;
        } else {
            write_accounts(&accounts, self.format, &mut self.output)?;
        }
        Ok(Flow::Continue)
    }

    /// Report `AccountNotFound` and return false if the account is unknown
    fn account_exists(&mut self, number: AccountNumber) -> Result<bool, BankError> {
        match self.bank.find_account(number) {
            Ok(_) => Ok(true),
            Err(e) => {
                self.fail(&e)?;
                Ok(false)
            }
        }
    }

    fn prompt_account(&mut self) -> Result<Option<AccountNumber>, BankError> {
        self.prompt_parsed("Account number: ", "account number")
    }

    fn prompt_parsed<T: FromStr>(
        &mut self,
        prompt: &str,
        field: &str,
    ) -> Result<Option<T>, BankError> {
        self.prompt_with(prompt, field, |s| s.parse().ok())
    }

    /// Prompt until `parse` accepts the line; `None` means input ended
    fn prompt_with<T>(
        &mut self,
        prompt: &str,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, BankError> {
        loop {
            let Some(line) = self.read_line(prompt, field)? else {
                return Ok(None);
            };
            match parse(line.trim()) {
                Some(value) => return Ok(Some(value)),
                None => {
                    let err = BankError::invalid_input(field, line.trim());
                    debug!(error = %err, "input rejected");
                    self.fail(&err)?;
                }
            }
        }
    }

    /// Print a prompt and read one line without its terminator
    ///
    /// A line that is not valid UTF-8 is reported as invalid `field` input
    /// and the prompt is shown again.
    fn read_line(&mut self, prompt: &str, field: &str) -> Result<Option<String>, BankError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }

            match String::from_utf8(buf) {
                Ok(line) => {
                    return Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()));
                }
                Err(e) => {
                    let raw = String::from_utf8_lossy(e.as_bytes());
                    let err = BankError::invalid_input(field, raw.trim_end());
                    debug!(error = %err, "input rejected");
                    self.fail(&err)?;
                }
            }
        }
    }

    fn success(&mut self, message: &str) -> Result<(), BankError> {
        writeln!(self.output, "\n=== {message} ===")?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<(), BankError> {
        writeln!(self.output, "\n@@@ {message} @@@")?;
        Ok(())
    }

    fn fail(&mut self, err: &BankError) -> Result<(), BankError> {
        writeln!(self.output, "\n@@@ Operation failed! {err} @@@")?;
        Ok(())
    }
}
