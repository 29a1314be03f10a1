//! Core traits for account operations
//!
//! The `Ledger` trait is the capability interface every account kind exposes.
//! Only the checking account implements it today; the directory, the bank and
//! the shared bank all go through it.

use crate::core::history::History;
use crate::types::{BankError, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Balance-changing operations on an account
pub trait Ledger {
    /// Credit `amount` and record a deposit captured at `at`
    ///
    /// Returns the recorded transaction. On error the account is unchanged.
    fn deposit(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Transaction, BankError>;

    /// Debit `amount` and record a withdrawal captured at `at`
    ///
    /// Returns the recorded transaction. On error the account is unchanged.
    fn withdraw(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Transaction, BankError>;

    /// Current balance
    fn balance(&self) -> Decimal;

    /// Recorded transactions
    fn history(&self) -> &History;
}
