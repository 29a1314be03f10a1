//! Account-related types for the bank
//!
//! This module defines the checking account structure and its withdrawal
//! policy. Balance rules live in [`crate::core::ledger`]; this module only
//! holds state.

use super::customer::TaxId;
use super::transaction::AccountNumber;
use crate::core::history::History;
use rust_decimal::Decimal;

/// Branch code attached to every account unless configured otherwise
pub const DEFAULT_BRANCH: &str = "0001";

/// Default per-transaction withdrawal cap (500.00)
pub const DEFAULT_WITHDRAWAL_CAP: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

/// Default maximum number of withdrawals per statement period
pub const DEFAULT_MAX_WITHDRAWALS: usize = 3;

/// Limits enforced on withdrawals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalPolicy {
    /// Largest amount permitted in a single withdrawal
    pub cap: Decimal,
    /// Number of withdrawals allowed before further attempts are refused
    pub max_withdrawals: usize,
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        WithdrawalPolicy {
            cap: DEFAULT_WITHDRAWAL_CAP,
            max_withdrawals: DEFAULT_MAX_WITHDRAWALS,
        }
    }
}

/// Checking account state
///
/// Fields are crate-private so the balance can only change through the
/// [`Ledger`](crate::core::Ledger) operations, which keep the balance
/// non-negative and the history in step with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub(crate) number: AccountNumber,
    pub(crate) branch: String,
    pub(crate) owner: TaxId,
    pub(crate) balance: Decimal,
    pub(crate) policy: WithdrawalPolicy,
    pub(crate) history: History,
}

impl Account {
    /// Open a new account with zero balance and an empty history
    ///
    /// Only the directory calls this; it owns account numbering.
    pub(crate) fn open(
        number: AccountNumber,
        branch: &str,
        owner: TaxId,
        policy: WithdrawalPolicy,
    ) -> Self {
        Account {
            number,
            branch: branch.to_string(),
            owner,
            balance: Decimal::ZERO,
            policy,
            history: History::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Tax ID of the owning customer
    pub fn owner(&self) -> &TaxId {
        &self.owner
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = WithdrawalPolicy::default();
        assert_eq!(policy.cap, Decimal::new(50000, 2));
        assert_eq!(policy.max_withdrawals, 3);
    }

    #[test]
    fn test_open_starts_empty() {
        let account = Account::open(
            1,
            DEFAULT_BRANCH,
            TaxId::normalize("123"),
            WithdrawalPolicy::default(),
        );

        assert_eq!(account.number(), 1);
        assert_eq!(account.branch(), "0001");
        assert_eq!(account.owner().as_str(), "123");
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.history.is_empty());
    }
}
