//! Error types for account operations.

use thiserror::Error;

use crate::Amount;

/// The kind of balance-moving operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyOperation {
    Deposit,
    Withdrawal,
    Payment,
    Interest,
}

/// Error returned by [`Account`](super::Account) operations.
///
/// Every variant is raised before any balance or status is mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0:?} amount must be a positive number, got {1}")]
    NegativeAmount(MoneyOperation, Amount),

    #[error("insufficient funds: available {0}, requested {1}")]
    InsufficientFunds(Amount, Amount),

    #[error("{0} not found in list of payees")]
    PayeeNotFound(String),

    #[error("login failed for user {0}")]
    FailedLogin(String),

    #[error("cannot close account with non-zero balance {0}")]
    NonZeroBalance(Amount),

    #[error("{0:?} of {1} would overflow the balance")]
    Overflow(MoneyOperation, Amount),
}
