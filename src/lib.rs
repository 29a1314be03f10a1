//! DIO Bank Library
//! # Overview
//!
//! This library provides a toy in-memory bank: customers identified by tax ID,
//! checking accounts with deposit and withdrawal rules, per-account history and
//! statements, driven by an interactive text menu.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, Account, Transaction, etc.)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Deposit and withdrawal rules
//!   - [`core::history`] - Append-only transaction history
//!   - [`core::directory`] - Customer and account registry
//!   - [`core::bank`] - Facade used by the shell
//!   - [`core::shared`] - Thread-safe facade for concurrent callers
//! - [`io`] - Statement and listing rendering (text or CSV)
//! - [`cli`] - CLI arguments, logging setup and the interactive shell
//!
//! # Withdrawal Rules
//!
//! A withdrawal is checked in this order, and the first failing check is
//! reported:
//!
//! 1. The amount must be positive
//! 2. The amount must not exceed the per-withdrawal cap (default 500.00)
//! 3. The account must have fewer withdrawals than the maximum (default 3)
//! 4. The balance must cover the amount
//!
//! A rejected operation leaves the account untouched.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{Bank, BankConfig, Directory, Ledger, SharedBank};
pub use types::{
    Account, AccountNumber, BankError, Customer, NewCustomer, Statement, Transaction,
    TransactionKind,
};
