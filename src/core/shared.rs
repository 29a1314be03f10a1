//! Thread-safe bank for multi-threaded hosts
//!
//! This module provides the `SharedBank` struct, which offers the same
//! operations as [`Bank`](crate::core::Bank) through `&self` so it can be
//! wrapped in an `Arc` and driven from many threads (for example behind a
//! network service).
//!
//! # Design
//!
//! Accounts live in a `DashMap` keyed by account number. A deposit or
//! withdrawal holds the account's entry guard for the whole
//! check-balance, mutate, append-to-history sequence, which gives each
//! account its own mutual exclusion without a global lock.
//!
//! Customers live in a second `DashMap` keyed by normalized tax ID.
//! Registration goes through the entry API, so two threads registering the
//! same tax ID cannot both succeed. Account numbers come from an atomic
//! counter that is only advanced once the owner is known to exist.
//!
//! # Lock Ordering
//!
//! `open_account` holds a customer guard while inserting into the account
//! map; no operation holds an account guard while touching the customer map,
//! so the two maps cannot deadlock.

use crate::core::bank::{system_clock, BankConfig, Clock};
use crate::core::directory::AccountFilter;
use crate::core::traits::Ledger;
use crate::types::{
    Account, AccountNumber, AccountSummary, BankError, Customer, NewCustomer, Statement, TaxId,
    Transaction,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{info, warn};

/// Bank state shareable across threads
#[derive(Debug)]
pub struct SharedBank {
    /// Customers by normalized tax ID
    customers: DashMap<TaxId, Customer>,
    /// Accounts by number; the entry guard serializes operations per account
    accounts: DashMap<AccountNumber, Account>,
    next_account_number: AtomicU32,
    config: BankConfig,
    clock: Clock,
}

impl SharedBank {
    /// Create an empty shared bank stamping transactions with local time
    pub fn new(config: BankConfig) -> Self {
        Self::with_clock(config, system_clock)
    }

    /// Create an empty shared bank with a custom timestamp source
    pub fn with_clock(config: BankConfig, clock: Clock) -> Self {
        Self {
            customers: DashMap::new(),
            accounts: DashMap::new(),
            next_account_number: AtomicU32::new(1),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Register a new customer
    ///
    /// Returns a snapshot of the stored customer.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the fields fail validation
    /// - `DuplicateIdentity` if the tax ID is already registered, even when
    ///   the competing registration happens concurrently
    pub fn register_customer(&self, fields: NewCustomer) -> Result<Customer, BankError> {
        let customer = Customer::register(fields)?;

        match self.customers.entry(customer.tax_id().clone()) {
            Entry::Occupied(existing) => {
                let err = BankError::duplicate_identity(existing.key().as_str());
                warn!(error = %err, "customer registration rejected");
                Err(err)
            }
            Entry::Vacant(slot) => {
                info!(tax_id = %customer.tax_id(), "customer registered");
                slot.insert(customer.clone());
                Ok(customer)
            }
        }
    }

    /// Open a checking account for an existing customer
    ///
    /// Returns the number assigned to the new account.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if no customer has the tax ID; no number is
    ///   consumed in that case
    /// - `ArithmeticOverflow` once the number space is exhausted; numbers
    ///   never wrap
    pub fn open_account(&self, tax_id: &str) -> Result<AccountNumber, BankError> {
        let key = TaxId::normalize(tax_id);
        let mut customer = self.customers.get_mut(&key).ok_or_else(|| {
            let err = BankError::customer_not_found(tax_id);
            warn!(error = %err, "account opening rejected");
            err
        })?;

        let number = self
            .next_account_number
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|n| {
                let err = BankError::arithmetic_overflow("open_account", n);
                warn!(error = %err, "account opening rejected");
                err
            })?;
        self.accounts.insert(
            number,
            Account::open(number, &self.config.branch, key, self.config.policy()),
        );
        customer.link_account(number);

        info!(account = number, "account opened");
        Ok(number)
    }

    /// Deposit into an account while holding its lock
    pub fn deposit(&self, number: AccountNumber, amount: Decimal) -> Result<Transaction, BankError> {
        self.with_account(number, "deposit", amount, |account, at| {
            account.deposit(amount, at)
        })
    }

    /// Withdraw from an account while holding its lock
    pub fn withdraw(
        &self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Transaction, BankError> {
        self.with_account(number, "withdrawal", amount, |account, at| {
            account.withdraw(amount, at)
        })
    }

    /// Current balance of an account
    pub fn balance(&self, number: AccountNumber) -> Result<Decimal, BankError> {
        self.accounts
            .get(&number)
            .map(|account| account.balance())
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Snapshot of an account
    pub fn find_account(&self, number: AccountNumber) -> Result<Account, BankError> {
        self.accounts
            .get(&number)
            .map(|account| account.value().clone())
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Summaries of every account, in number order
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.summaries(|_| true)
    }

    /// Summaries of the accounts matching the filter, in number order
    pub fn search(&self, filter: &AccountFilter) -> Vec<AccountSummary> {
        self.summaries(|customer| filter.matches(customer))
    }

    /// Snapshot of a customer
    pub fn find_customer(&self, tax_id: &str) -> Result<Customer, BankError> {
        self.customers
            .get(&TaxId::normalize(tax_id))
            .map(|customer| customer.clone())
            .ok_or_else(|| BankError::customer_not_found(tax_id))
    }

    /// Snapshot of an account's history and balance
    ///
    /// The account guard is released before the holder is looked up.
    pub fn statement(&self, number: AccountNumber) -> Result<Statement, BankError> {
        let (branch, owner, balance, transactions) = {
            let account = self
                .accounts
                .get(&number)
                .ok_or_else(|| BankError::account_not_found(number))?;
            (
                account.branch().to_string(),
                account.owner().clone(),
                account.balance(),
                account.history().transactions().to_vec(),
            )
        };

        let holder = self
            .customers
            .get(&owner)
            .map(|customer| customer.name().to_string())
            .unwrap_or_default();

        Ok(Statement {
            holder,
            branch,
            number,
            balance,
            transactions,
        })
    }

    /// Number of accounts opened so far
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Collect account rows first, then resolve holders with no account
    /// guard held
    fn summaries(&self, keep: impl Fn(&Customer) -> bool) -> Vec<AccountSummary> {
        let mut rows: Vec<(AccountNumber, String, TaxId, Decimal)> = self
            .accounts
            .iter()
            .map(|account| {
                (
                    account.number(),
                    account.branch().to_string(),
                    account.owner().clone(),
                    account.balance(),
                )
            })
            .collect();
        rows.sort_unstable_by_key(|(number, ..)| *number);

        rows.into_iter()
            .filter_map(|(number, branch, owner, balance)| {
                let customer = self.customers.get(&owner)?;
                keep(customer.value()).then(|| AccountSummary {
                    branch,
                    number,
                    holder: customer.name().to_string(),
                    tax_id: owner.to_string(),
                    balance,
                })
            })
            .collect()
    }

    fn with_account<F>(
        &self,
        number: AccountNumber,
        operation: &str,
        amount: Decimal,
        f: F,
    ) -> Result<Transaction, BankError>
    where
        F: FnOnce(&mut Account, chrono::NaiveDateTime) -> Result<Transaction, BankError>,
    {
        let result = match self.accounts.get_mut(&number) {
            Some(mut account) => f(account.value_mut(), (self.clock)()),
            None => Err(BankError::account_not_found(number)),
        };

        match &result {
            Ok(_) => info!(operation, account = number, %amount, "operation accepted"),
            Err(e) => warn!(operation, account = number, %amount, error = %e, "operation rejected"),
        }
        result
    }
}

impl Default for SharedBank {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;
    use std::thread;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn customer(name: &str, tax_id: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            tax_id: tax_id.to_string(),
            address: "Rua Augusta, 500 - Consolação - São Paulo/SP".to_string(),
        }
    }

    fn bank() -> SharedBank {
        SharedBank::with_clock(BankConfig::default(), fixed_clock)
    }

    #[test]
    fn test_register_and_open() {
        let bank = bank();
        bank.register_customer(customer("Fernanda", "10.20.30")).unwrap();

        assert_eq!(bank.open_account("102030").unwrap(), 1);
        assert_eq!(bank.open_account("10-20-30").unwrap(), 2);
        assert_eq!(bank.find_customer("102030").unwrap().accounts(), &[1, 2]);
        assert_eq!(bank.account_count(), 2);
    }

    #[test]
    fn test_open_account_unknown_customer_consumes_no_number() {
        let bank = bank();
        assert!(matches!(
            bank.open_account("1").unwrap_err(),
            BankError::CustomerNotFound { .. }
        ));

        bank.register_customer(customer("Gabriel", "1")).unwrap();
        assert_eq!(bank.open_account("1").unwrap(), 1);
    }

    #[test]
    fn test_rules_match_single_threaded_bank() {
        let bank = bank();
        bank.register_customer(customer("Helena", "7")).unwrap();
        let number = bank.open_account("7").unwrap();

        assert!(matches!(
            bank.withdraw(number, dec("600.00")).unwrap_err(),
            BankError::ExceedsLimit { .. }
        ));
        bank.deposit(number, dec("1000.00")).unwrap();
        bank.withdraw(number, dec("500.00")).unwrap();
        bank.withdraw(number, dec("500.00")).unwrap();
        assert!(matches!(
            bank.withdraw(number, dec("500.00")).unwrap_err(),
            BankError::InsufficientFunds { .. }
        ));

        let statement = bank.statement(number).unwrap();
        assert_eq!(statement.holder, "Helena");
        assert_eq!(statement.balance, Decimal::ZERO);
        assert_eq!(statement.transactions.len(), 3);
    }

    #[test]
    fn test_account_numbers_never_wrap() {
        let bank = bank();
        bank.register_customer(customer("Luana", "77")).unwrap();
        let first = bank.open_account("77").unwrap();
        bank.deposit(first, dec("10.00")).unwrap();
        bank.next_account_number.store(u32::MAX - 1, Ordering::SeqCst);

        assert_eq!(bank.open_account("77").unwrap(), u32::MAX - 1);
        assert!(matches!(
            bank.open_account("77").unwrap_err(),
            BankError::ArithmeticOverflow { .. }
        ));
        assert!(matches!(
            bank.open_account("77").unwrap_err(),
            BankError::ArithmeticOverflow { .. }
        ));

        assert_eq!(bank.account_count(), 2);
        assert_eq!(bank.balance(first).unwrap(), dec("10.00"));
        assert_eq!(
            bank.find_customer("77").unwrap().accounts(),
            &[first, u32::MAX - 1]
        );
    }

    #[test]
    fn test_find_list_and_search() {
        let bank = bank();
        bank.register_customer(customer("Marcos Lima", "111")).unwrap();
        bank.register_customer(customer("Nina Lima", "222")).unwrap();
        bank.open_account("111").unwrap();
        bank.open_account("222").unwrap();
        bank.open_account("111").unwrap();
        bank.deposit(2, dec("12.50")).unwrap();

        let account = bank.find_account(2).unwrap();
        assert_eq!(account.owner().as_str(), "222");
        assert_eq!(account.balance(), dec("12.50"));
        assert_eq!(
            bank.find_account(9).unwrap_err(),
            BankError::account_not_found(9)
        );

        let all = bank.list_accounts();
        let numbers: Vec<_> = all.iter().map(|summary| summary.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(all[1].holder, "Nina Lima");
        assert_eq!(all[1].balance, dec("12.50"));

        let marcos = bank.search(&AccountFilter::from_input("marcos", ""));
        let numbers: Vec<_> = marcos.iter().map(|summary| summary.number).collect();
        assert_eq!(numbers, vec![1, 3]);

        let lima = bank.search(&AccountFilter::from_input("LIMA", "222"));
        assert_eq!(lima.len(), 1);
        assert_eq!(lima[0].tax_id, "222");

        assert!(bank
            .search(&AccountFilter::from_input("", "333"))
            .is_empty());
    }

    #[test]
    fn test_unknown_account() {
        let bank = bank();
        assert_eq!(
            bank.deposit(3, Decimal::ONE).unwrap_err(),
            BankError::account_not_found(3)
        );
        assert_eq!(
            bank.balance(3).unwrap_err(),
            BankError::account_not_found(3)
        );
        assert!(bank.statement(3).is_err());
    }

    #[test]
    fn test_concurrent_registration_same_tax_id() {
        let bank = Arc::new(bank());
        let mut handles = vec![];

        for i in 0..16 {
            let bank_clone = Arc::clone(&bank);
            let handle = thread::spawn(move || {
                bank_clone
                    .register_customer(customer(&format!("Cliente {i}"), "555.555.555-55"))
                    .is_ok()
            });
            handles.push(handle);
        }

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert!(bank.find_customer("55555555555").is_ok());
    }

    #[test]
    fn test_concurrent_account_numbers_are_unique() {
        let bank = Arc::new(bank());
        bank.register_customer(customer("Igor", "42")).unwrap();
        let mut handles = vec![];

        for _ in 0..8 {
            let bank_clone = Arc::clone(&bank);
            let handle = thread::spawn(move || {
                (0..25)
                    .map(|_| bank_clone.open_account("42").unwrap())
                    .collect::<Vec<_>>()
            });
            handles.push(handle);
        }

        let mut numbers: Vec<AccountNumber> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        numbers.sort_unstable();

        assert_eq!(numbers, (1..=200).collect::<Vec<_>>());
        assert_eq!(bank.find_customer("42").unwrap().accounts().len(), 200);
    }

    #[test]
    fn test_concurrent_withdrawals_respect_count_and_balance() {
        let bank = Arc::new(bank());
        bank.register_customer(customer("Julia", "9")).unwrap();
        let number = bank.open_account("9").unwrap();
        bank.deposit(number, dec("1000.00")).unwrap();
        let mut handles = vec![];

        // 50 threads race to withdraw 400.00; only two can fit in the balance
        for _ in 0..50 {
            let bank_clone = Arc::clone(&bank);
            let handle = thread::spawn(move || bank_clone.withdraw(number, dec("400.00")).is_ok());
            handles.push(handle);
        }

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 2);
        assert_eq!(bank.balance(number).unwrap(), dec("200.00"));
    }

    #[test]
    fn test_concurrent_small_withdrawals_stop_at_limit() {
        let bank = Arc::new(bank());
        bank.register_customer(customer("Karina", "8")).unwrap();
        let number = bank.open_account("8").unwrap();
        bank.deposit(number, dec("1000.00")).unwrap();
        let mut handles = vec![];

        for _ in 0..20 {
            let bank_clone = Arc::clone(&bank);
            let handle = thread::spawn(move || {
                let _ = bank_clone.withdraw(number, dec("1.00"));
                let _ = bank_clone.deposit(number, dec("1.00"));
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let statement = bank.statement(number).unwrap();
        let withdrawals = statement
            .transactions
            .iter()
            .filter(|tx| tx.is_withdrawal())
            .count();
        assert_eq!(withdrawals, 3);
        // 1 initial deposit + 20 deposits + 3 withdrawals
        assert_eq!(statement.transactions.len(), 24);
        assert_eq!(statement.balance, dec("1017.00"));
    }
}
