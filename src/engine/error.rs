//! Error types for operation processing.

use thiserror::Error;

use crate::account::AccountError;
use crate::model::Slot;

/// Top-level error returned by [`Bank::apply`](super::Bank::apply).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Unknown user, credentials rejected by every account, or slot out of range.
    #[error("no account {1} available to user {0}")]
    AccountNotFound(String, Slot),
}
