//! Core business logic module
//!
//! This module contains the account and directory components:
//! - `traits` - The `Ledger` capability interface for accounts
//! - `history` - Append-only transaction history
//! - `ledger` - Deposit and withdrawal rules for checking accounts
//! - `directory` - Customer and account ownership, numbering and lookup
//! - `bank` - Single-threaded facade used by the shell
//! - `shared` - Thread-safe facade with per-account locking

pub mod bank;
pub mod directory;
pub mod history;
pub mod ledger;
pub mod shared;
pub mod traits;

pub use bank::{system_clock, Bank, BankConfig, Clock};
pub use directory::{AccountFilter, Directory};
pub use history::History;
pub use shared::SharedBank;
pub use traits::Ledger;
