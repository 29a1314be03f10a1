//! Transaction-related types for the bank
//!
//! This module defines the transaction kinds and the immutable transaction
//! record appended to an account's history on every successful deposit or
//! withdrawal.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Account number
///
/// Assigned sequentially by the directory, starting at 1.
pub type AccountNumber = u32;

/// Kinds of value movement recorded in an account history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Counted against the account's maximum number of withdrawals.
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A single recorded value movement
///
/// Transactions are immutable once created: fields are private and only
/// exposed through accessors. The timestamp is the capture time taken from
/// the bank clock, never user-supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction record
    pub fn new(kind: TransactionKind, amount: Decimal, timestamp: NaiveDateTime) -> Self {
        Transaction {
            kind,
            amount,
            timestamp,
        }
    }

    /// Create a deposit record
    pub fn deposit(amount: Decimal, timestamp: NaiveDateTime) -> Self {
        Self::new(TransactionKind::Deposit, amount, timestamp)
    }

    /// Create a withdrawal record
    pub fn withdrawal(amount: Decimal, timestamp: NaiveDateTime) -> Self {
        Self::new(TransactionKind::Withdrawal, amount, timestamp)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Whether this record counts against the withdrawal limit
    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionKind::Withdrawal
    }
}
