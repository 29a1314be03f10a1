//! CSV format handling for statements and account listings
//!
//! This module centralizes all CSV output concerns:
//! - `StatementRow` / `AccountRow` structures for serialization
//! - Statement serialization with a running balance column
//! - Account listing serialization
//!
//! The header row is always written, even when there are no rows.

use crate::types::{AccountNumber, AccountSummary, BankError, Statement, TransactionKind};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

use super::TIMESTAMP_FORMAT;

/// One statement line
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StatementRow {
    pub timestamp: String,
    pub kind: TransactionKind,
    pub amount: String,
    /// Balance right after this transaction
    pub balance: String,
}

/// One account listing line
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccountRow {
    pub branch: String,
    pub account: AccountNumber,
    pub holder: String,
    pub tax_id: String,
    pub balance: String,
}

/// Convert a statement into CSV rows with a running balance
///
/// Accounts start at zero and every balance change is recorded, so the
/// running balance of the last row equals the statement balance.
pub fn statement_rows(statement: &Statement) -> Vec<StatementRow> {
    let mut running = Decimal::ZERO;

    statement
        .transactions
        .iter()
        .map(|tx| {
            running = match tx.kind() {
                TransactionKind::Deposit => running + tx.amount(),
                TransactionKind::Withdrawal => running - tx.amount(),
            };
            StatementRow {
                timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                kind: tx.kind(),
                amount: format!("{:.2}", tx.amount()),
                balance: format!("{:.2}", running),
            }
        })
        .collect()
}

/// Write a statement in CSV format
///
/// Columns: timestamp, kind, amount, balance
pub fn write_statement_csv(statement: &Statement, output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["timestamp", "kind", "amount", "balance"])?;
    for row in statement_rows(statement) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write an account listing in CSV format
///
/// Columns: branch, account, holder, tax_id, balance
pub fn write_accounts_csv(
    accounts: &[AccountSummary],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["branch", "account", "holder", "tax_id", "balance"])?;
    for summary in accounts {
        writer.serialize(AccountRow {
            branch: summary.branch.clone(),
            account: summary.number,
            holder: summary.holder.clone(),
            tax_id: summary.tax_id.clone(),
            balance: format!("{:.2}", summary.balance),
        })?;
    }
    writer.flush()?;

    Ok(())
}
