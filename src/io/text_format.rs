//! Human-readable statement and listing output

use super::TIMESTAMP_FORMAT;
use crate::types::{AccountSummary, BankError, Statement};
use rust_decimal::Decimal;
use std::io::Write;

const RULE_WIDTH: usize = 100;

fn money(amount: Decimal) -> String {
    format!("R$ {:.2}", amount)
}

/// Write a statement as a framed, line-per-transaction listing
pub fn write_statement_text(
    statement: &Statement,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    writeln!(output, "\n================ STATEMENT ================")?;
    writeln!(output, "Holder:  {}", statement.holder)?;
    writeln!(output, "Branch:  {}", statement.branch)?;
    writeln!(output, "Account: {}", statement.number)?;
    writeln!(output, "Balance: {}", money(statement.balance))?;

    if statement.transactions.is_empty() {
        writeln!(output, "No transactions recorded.")?;
    }
    for tx in &statement.transactions {
        writeln!(
            output,
            "- {}: {} ({})",
            tx.kind(),
            money(tx.amount()),
            tx.timestamp().format(TIMESTAMP_FORMAT)
        )?;
    }

    writeln!(output, "===========================================")?;
    Ok(())
}

/// Write one framed block per account
pub fn write_accounts_text(
    accounts: &[AccountSummary],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let rule = "=".repeat(RULE_WIDTH);

    for summary in accounts {
        writeln!(output, "{rule}")?;
        writeln!(output, "Branch:\t\t{}", summary.branch)?;
        writeln!(output, "Account:\t{}", summary.number)?;
        writeln!(output, "Holder:\t\t{}", summary.holder)?;
        writeln!(output, "Tax ID:\t\t{}", summary.tax_id)?;
    }
    if !accounts.is_empty() {
        writeln!(output, "{rule}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transaction;
    use chrono::NaiveDate;

    #[test]
    fn test_statement_text_lists_transactions_in_order() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let statement = Statement {
            holder: "Carla Dias".to_string(),
            branch: "0001".to_string(),
            number: 1,
            balance: Decimal::new(6000, 2),
            transactions: vec![
                Transaction::deposit(Decimal::new(10000, 2), at),
                Transaction::withdrawal(Decimal::new(4000, 2), at),
            ],
        };

        let mut output = Vec::new();
        write_statement_text(&statement, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let expected = "\n================ STATEMENT ================\n\
                        Holder:  Carla Dias\n\
                        Branch:  0001\n\
                        Account: 1\n\
                        Balance: R$ 60.00\n\
                        - Deposit: R$ 100.00 (15-01-2024 10:30:00)\n\
                        - Withdrawal: R$ 40.00 (15-01-2024 10:30:00)\n\
                        ===========================================\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_statement_text_without_transactions() {
        let statement = Statement {
            holder: "Davi".to_string(),
            branch: "0001".to_string(),
            number: 2,
            balance: Decimal::ZERO,
            transactions: vec![],
        };

        let mut output = Vec::new();
        write_statement_text(&statement, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Balance: R$ 0.00\n"));
        assert!(text.contains("No transactions recorded.\n"));
    }

    #[test]
    fn test_accounts_text() {
        let accounts = vec![AccountSummary {
            branch: "0001".to_string(),
            number: 3,
            holder: "Eduardo Reis".to_string(),
            tax_id: "98765432100".to_string(),
            balance: Decimal::ZERO,
        }];

        let mut output = Vec::new();
        write_accounts_text(&accounts, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Account:\t3\n"));
        assert!(text.contains("Holder:\t\tEduardo Reis\n"));
    }

    #[test]
    fn test_accounts_text_empty_writes_nothing() {
        let mut output = Vec::new();
        write_accounts_text(&[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}
