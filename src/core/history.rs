//! Transaction history for a single account
//!
//! This module provides the History component that keeps every successful
//! deposit and withdrawal of an account in the order it happened. The history
//! is append-only: entries are never reordered, edited or removed.
//!
//! # Withdrawal Count
//!
//! The number of withdrawals is derived from the log on every call instead of
//! being tracked in a separate counter, so it can never drift from the
//! recorded transactions.

use crate::types::Transaction;

/// Append-only transaction log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Transactions in insertion (chronological) order
    transactions: Vec<Transaction>,
}

impl History {
    /// Create a new empty history
    pub fn new() -> Self {
        History {
            transactions: Vec::new(),
        }
    }

    /// Append a transaction at the end of the log
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Count the withdrawals recorded so far
    pub fn withdrawal_count(&self) -> usize {
        self.transactions
            .iter()
            .filter(|tx| tx.is_withdrawal())
            .count()
    }

    /// All recorded transactions in chronological order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
