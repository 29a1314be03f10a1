//! Bank facade
//!
//! This module provides the `Bank` that the interactive shell talks to. It
//! owns the [`Directory`], the configuration and the clock, and coordinates
//! lookups with the [`Ledger`] operations on accounts.
//!
//! Every accepted operation is logged at `info` level and every rejected one
//! at `warn` level with the error attached.

use crate::core::directory::{AccountFilter, Directory};
use crate::core::traits::Ledger;
use crate::types::{
    Account, AccountNumber, AccountSummary, BankError, Customer, NewCustomer, Statement,
    Transaction, WithdrawalPolicy, DEFAULT_BRANCH, DEFAULT_MAX_WITHDRAWALS,
    DEFAULT_WITHDRAWAL_CAP,
};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Source of transaction timestamps
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time
pub fn system_clock() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Bank configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BankConfig {
    /// Largest amount permitted in a single withdrawal
    pub withdrawal_cap: Decimal,
    /// Withdrawals allowed per account before further attempts are refused
    pub max_withdrawals: usize,
    /// Branch code attached to every new account
    pub branch: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            withdrawal_cap: DEFAULT_WITHDRAWAL_CAP,
            max_withdrawals: DEFAULT_MAX_WITHDRAWALS,
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl BankConfig {
    /// Create a BankConfig with custom values
    ///
    /// Invalid values (non-positive cap, zero withdrawals, blank branch) fall
    /// back to the defaults with a warning.
    pub fn new(withdrawal_cap: Decimal, max_withdrawals: usize, branch: &str) -> Self {
        let default = Self::default();

        let withdrawal_cap = if withdrawal_cap <= Decimal::ZERO {
            warn!(
                %withdrawal_cap,
                default = %default.withdrawal_cap,
                "invalid withdrawal cap, using default"
            );
            default.withdrawal_cap
        } else {
            withdrawal_cap
        };

        let max_withdrawals = if max_withdrawals == 0 {
            warn!(
                max_withdrawals,
                default = default.max_withdrawals,
                "invalid max withdrawals, using default"
            );
            default.max_withdrawals
        } else {
            max_withdrawals
        };

        let branch = if branch.trim().is_empty() {
            warn!(default = %default.branch, "blank branch code, using default");
            default.branch
        } else {
            branch.trim().to_string()
        };

        Self {
            withdrawal_cap,
            max_withdrawals,
            branch,
        }
    }

    /// Withdrawal limits applied to newly opened accounts
    pub fn policy(&self) -> WithdrawalPolicy {
        WithdrawalPolicy {
            cap: self.withdrawal_cap,
            max_withdrawals: self.max_withdrawals,
        }
    }
}

/// Single-threaded bank
///
/// Orchestrates customer registration, account opening and balance
/// operations on top of an owned [`Directory`].
pub struct Bank {
    directory: Directory,
    config: BankConfig,
    clock: Clock,
}

impl Bank {
    /// Create a bank with no customers, stamping transactions with local time
    pub fn new(config: BankConfig) -> Self {
        Self::with_clock(config, system_clock)
    }

    /// Create a bank with a custom timestamp source
    pub fn with_clock(config: BankConfig, clock: Clock) -> Self {
        Bank {
            directory: Directory::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Register a new customer
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for blank name, address or tax ID
    /// - `DuplicateIdentity` if the tax ID is already registered
    pub fn register_customer(&mut self, fields: NewCustomer) -> Result<&Customer, BankError> {
        match self.directory.register_customer(fields) {
            Ok(customer) => {
                info!(tax_id = %customer.tax_id(), name = customer.name(), "customer registered");
                Ok(customer)
            }
            Err(e) => {
                warn!(error = %e, "customer registration rejected");
                Err(e)
            }
        }
    }

    /// Open a checking account for an existing customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if no customer has the tax ID.
    pub fn open_account(&mut self, tax_id: &str) -> Result<&Account, BankError> {
        let policy = self.config.policy();
        match self
            .directory
            .open_account(tax_id, &self.config.branch, policy)
        {
            Ok(account) => {
                info!(account = account.number(), owner = %account.owner(), "account opened");
                Ok(account)
            }
            Err(e) => {
                warn!(error = %e, "account opening rejected");
                Err(e)
            }
        }
    }

    /// Look up a customer by tax ID
    pub fn find_customer(&self, tax_id: &str) -> Result<&Customer, BankError> {
        self.directory.find_customer(tax_id)
    }

    /// Look up an account by number
    pub fn find_account(&self, number: AccountNumber) -> Result<&Account, BankError> {
        self.directory.find_account(number)
    }

    /// Deposit into an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the number is unknown
    /// - `InvalidAmount` if the amount is not positive
    /// - `ArithmeticOverflow` if the balance would overflow
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Transaction, BankError> {
        let at = (self.clock)();
        let result = self
            .directory
            .find_account_mut(number)
            .and_then(|account| account.deposit(amount, at));

        log_outcome("deposit", number, amount, &result);
        result
    }

    /// Withdraw from an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the number is unknown
    /// - `InvalidAmount`, `ExceedsLimit`, `WithdrawalCountExceeded` or
    ///   `InsufficientFunds`, checked in that order
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Transaction, BankError> {
        let at = (self.clock)();
        let result = self
            .directory
            .find_account_mut(number)
            .and_then(|account| account.withdraw(amount, at));

        log_outcome("withdrawal", number, amount, &result);
        result
    }

    /// Snapshot of an account's history and balance
    pub fn statement(&self, number: AccountNumber) -> Result<Statement, BankError> {
        let account = self.directory.find_account(number)?;
        Ok(Statement {
            holder: self.holder_name(account),
            branch: account.branch().to_string(),
            number: account.number(),
            balance: account.balance(),
            transactions: account.history().transactions().to_vec(),
        })
    }

    /// Summaries of every account, in number order
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.directory
            .accounts()
            .map(|account| self.summarize(account))
            .collect()
    }

    /// Summaries of the accounts matching the filter, in number order
    pub fn search(&self, filter: &AccountFilter) -> Vec<AccountSummary> {
        self.directory
            .search(filter)
            .into_iter()
            .map(|account| self.summarize(account))
            .collect()
    }

    fn summarize(&self, account: &Account) -> AccountSummary {
        AccountSummary {
            branch: account.branch().to_string(),
            number: account.number(),
            holder: self.holder_name(account),
            tax_id: account.owner().to_string(),
            balance: account.balance(),
        }
    }

    fn holder_name(&self, account: &Account) -> String {
        self.directory
            .owner_of(account)
            .map(|customer| customer.name().to_string())
            .unwrap_or_default()
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

fn log_outcome(
    operation: &str,
    number: AccountNumber,
    amount: Decimal,
    result: &Result<Transaction, BankError>,
) {
    match result {
        Ok(_) => info!(operation, account = number, %amount, "operation accepted"),
        Err(e) => warn!(operation, account = number, %amount, error = %e, "operation rejected"),
    }
}
