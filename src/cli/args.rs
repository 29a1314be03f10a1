use crate::core::BankConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

/// Interactive in-memory checking account bank
#[derive(Parser, Debug)]
#[command(name = "diobank")]
#[command(about = "Interactive in-memory checking account bank", long_about = None)]
pub struct CliArgs {
    /// Largest amount permitted in a single withdrawal
    #[arg(
        long = "withdrawal-cap",
        value_name = "AMOUNT",
        help = "Per-withdrawal limit for new accounts (default: 500.00)"
    )]
    pub withdrawal_cap: Option<Decimal>,

    /// Withdrawals allowed per account
    #[arg(
        long = "max-withdrawals",
        value_name = "COUNT",
        help = "Maximum number of withdrawals per account (default: 3)"
    )]
    pub max_withdrawals: Option<usize>,

    /// Branch code for new accounts
    #[arg(
        long = "branch",
        value_name = "CODE",
        help = "Branch code attached to new accounts (default: 0001)"
    )]
    pub branch: Option<String>,

    /// Output format for statements and listings
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format: 'text' or 'csv'"
    )]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level written to stderr (overridden by RUST_LOG)"
    )]
    pub log_level: String,
}

/// Available output formats for statements and listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

impl CliArgs {
    /// Create a BankConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; invalid values are replaced
    /// by [`BankConfig::new`], which logs a warning.
    pub fn to_bank_config(&self) -> BankConfig {
        if self.withdrawal_cap.is_none() && self.max_withdrawals.is_none() && self.branch.is_none()
        {
            return BankConfig::default();
        }

        let default = BankConfig::default();
        BankConfig::new(
            self.withdrawal_cap.unwrap_or(default.withdrawal_cap),
            self.max_withdrawals.unwrap_or(default.max_withdrawals),
            self.branch.as_deref().unwrap_or(&default.branch),
        )
    }
}
