//! Read-only snapshots handed to the renderers
//!
//! Both types are owned copies so the shell can render them after the
//! borrow on the bank ends.

use super::transaction::{AccountNumber, Transaction};
use rust_decimal::Decimal;

/// Chronological listing of an account plus its current balance
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Name of the owning customer
    pub holder: String,
    pub branch: String,
    pub number: AccountNumber,
    pub balance: Decimal,
    /// Transactions in the order they were recorded
    pub transactions: Vec<Transaction>,
}

/// One line of an account listing
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub holder: String,
    pub tax_id: String,
    pub balance: Decimal,
}
