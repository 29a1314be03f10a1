//! I/O module
//!
//! Renders statements and account listings for the shell.
//!
//! # Components
//!
//! - `text_format` - Framed, human-readable output
//! - `csv_format` - CSV output (record serialization)
//!
//! Rendering is a pure read: nothing here touches bank state.

pub mod csv_format;
pub mod text_format;

pub use csv_format::{write_accounts_csv, write_statement_csv};
pub use text_format::{write_accounts_text, write_statement_text};

use crate::cli::OutputFormat;
use crate::types::{AccountSummary, BankError, Statement};
use std::io::Write;

/// Timestamp layout used in statements (day-month-year)
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Write a statement in the requested format
pub fn write_statement(
    statement: &Statement,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match format {
        OutputFormat::Text => write_statement_text(statement, output),
        OutputFormat::Csv => write_statement_csv(statement, output),
    }
}

/// Write an account listing in the requested format
pub fn write_accounts(
    accounts: &[AccountSummary],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match format {
        OutputFormat::Text => write_accounts_text(accounts, output),
        OutputFormat::Csv => write_accounts_csv(accounts, output),
    }
}
