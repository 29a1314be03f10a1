//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Checking account state and withdrawal policy
//! - `customer`: Customer identity and tax ID normalization
//! - `transaction`: Transaction records and identifiers
//! - `statement`: Read-only snapshots for rendering
//! - `error`: Error types for the bank

pub mod account;
pub mod customer;
pub mod error;
pub mod statement;
pub mod transaction;

pub use account::{
    Account, WithdrawalPolicy, DEFAULT_BRANCH, DEFAULT_MAX_WITHDRAWALS, DEFAULT_WITHDRAWAL_CAP,
};
pub use customer::{Customer, NewCustomer, TaxId};
pub use error::BankError;
pub use statement::{AccountSummary, Statement};
pub use transaction::{AccountNumber, Transaction, TransactionKind};
