//! Checking account rules
//!
//! Implements [`Ledger`] for [`Account`]. Every operation validates first and
//! mutates last, using checked arithmetic, so a rejected operation leaves both
//! the balance and the history untouched.
//!
//! Withdrawal checks run in a fixed order and the first failure is reported:
//!
//! 1. amount must be positive (`InvalidAmount`)
//! 2. amount must not exceed the cap (`ExceedsLimit`)
//! 3. recorded withdrawals must be below the maximum (`WithdrawalCountExceeded`)
//! 4. amount must not exceed the balance (`InsufficientFunds`)

use crate::core::history::History;
use crate::core::traits::Ledger;
use crate::types::{Account, BankError, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

impl Ledger for Account {
    fn deposit(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Transaction, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount("deposit", amount));
        }

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", self.number))?;

        let transaction = Transaction::deposit(amount, at);
        self.balance = new_balance;
        self.history.append(transaction.clone());

        Ok(transaction)
    }

    fn withdraw(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<Transaction, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount("withdrawal", amount));
        }

        if amount > self.policy.cap {
            return Err(BankError::exceeds_limit(amount, self.policy.cap));
        }

        if self.history.withdrawal_count() >= self.policy.max_withdrawals {
            return Err(BankError::withdrawal_count_exceeded(
                self.number,
                self.policy.max_withdrawals,
            ));
        }

        if amount > self.balance {
            return Err(BankError::insufficient_funds(
                self.number,
                self.balance,
                amount,
            ));
        }

        let new_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", self.number))?;

        let transaction = Transaction::withdrawal(amount, at);
        self.balance = new_balance;
        self.history.append(transaction.clone());

        Ok(transaction)
    }

    fn balance(&self) -> Decimal {
        self.balance
    }

    fn history(&self) -> &History {
        &self.history
    }
}
