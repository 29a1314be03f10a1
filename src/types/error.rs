//! Error types for the bank
//!
//! This module defines every error that can occur while operating on customers
//! and accounts. Errors are designed to be descriptive and user-friendly since
//! the interactive shell prints them verbatim.
//!
//! # Error Categories
//!
//! - **Amount Errors**: non-positive amounts, per-withdrawal cap, withdrawal count
//! - **Balance Errors**: insufficient funds, arithmetic overflow
//! - **Directory Errors**: duplicate tax ID, unknown customer or account
//! - **Input Errors**: text that does not parse into the requested value
//! - **I/O Errors**: failures writing to the console
//!
//! Every category except I/O is recoverable: the operation is aborted and the
//! shell continues with the next menu choice.

use super::transaction::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Deposit or withdrawal amount is zero or negative
    #[error("Invalid {operation} amount {amount:.2}: amount must be positive")]
    InvalidAmount {
        /// Operation that received the amount
        operation: String,
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal amount is above the per-transaction cap
    #[error("Withdrawal of {requested:.2} exceeds the per-transaction limit of {cap:.2}")]
    ExceedsLimit {
        /// Requested withdrawal amount
        requested: Decimal,
        /// Configured cap
        cap: Decimal,
    },

    /// The account already recorded the maximum number of withdrawals
    #[error("Maximum number of withdrawals ({max}) reached for account {account}")]
    WithdrawalCountExceeded {
        /// Account number
        account: AccountNumber,
        /// Configured maximum
        max: usize,
    },

    /// Balance is lower than the requested withdrawal
    #[error(
        "Insufficient funds in account {account}: balance {balance:.2}, requested {requested:.2}"
    )]
    InsufficientFunds {
        /// Account number
        account: AccountNumber,
        /// Current balance
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// A customer with the same normalized tax ID is already registered
    #[error("A customer with tax ID {tax_id} already exists")]
    DuplicateIdentity {
        /// Normalized tax ID
        tax_id: String,
    },

    /// No customer registered under the tax ID
    #[error("Customer with tax ID {tax_id} not found")]
    CustomerNotFound {
        /// Tax ID as supplied
        tax_id: String,
    },

    /// No account with the given number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account number
        account: AccountNumber,
    },

    /// Text that could not be turned into the requested value
    #[error("Invalid {field}: '{input}'")]
    InvalidInput {
        /// Name of the field being read
        field: String,
        /// The raw text supplied
        input: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: AccountNumber,
    },

    /// I/O error while reading input or writing output
    ///
    /// This is the only fatal error: the shell stops.
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BankError (CSV output only)
impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str, amount: Decimal) -> Self {
        BankError::InvalidAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an ExceedsLimit error
    pub fn exceeds_limit(requested: Decimal, cap: Decimal) -> Self {
        BankError::ExceedsLimit { requested, cap }
    }

    /// Create a WithdrawalCountExceeded error
    pub fn withdrawal_count_exceeded(account: AccountNumber, max: usize) -> Self {
        BankError::WithdrawalCountExceeded { account, max }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a DuplicateIdentity error
    pub fn duplicate_identity(tax_id: &str) -> Self {
        BankError::DuplicateIdentity {
            tax_id: tax_id.to_string(),
        }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(tax_id: &str) -> Self {
        BankError::CustomerNotFound {
            tax_id: tax_id.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountNumber) -> Self {
        BankError::AccountNotFound { account }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: &str, input: &str) -> Self {
        BankError::InvalidInput {
            field: field.to_string(),
            input: input.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Whether the error should end the interactive session
    pub fn is_fatal(&self) -> bool {
        matches!(self, BankError::IoError { .. })
    }
}
