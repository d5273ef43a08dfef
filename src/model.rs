//! Operations the engine can replay against the account directory.

use crate::Amount;
use crate::account::{AccountKind, Payee};

/// Position of an account among those a user's credentials unlock, in
/// opening order.
pub type Slot = usize;

/// Credentials plus slot identifying one existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub user: String,
    pub secret: String,
    pub slot: Slot,
}

impl Target {
    pub fn new(user: impl Into<String>, secret: impl Into<String>, slot: Slot) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
            slot,
        }
    }
}

/// An operation representing the possible inputs of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open a new account for `user` and register it in the directory.
    Open {
        user: String,
        secret: String,
        kind: AccountKind,
    },
    Deposit {
        target: Target,
        amount: Amount,
    },
    Withdraw {
        target: Target,
        amount: Amount,
    },
    RegisterPayee {
        target: Target,
        payee: Payee,
    },
    /// Pay a registered payee, looked up by name.
    Payment {
        target: Target,
        payee: String,
        amount: Amount,
    },
    Interest {
        target: Target,
    },
    Close {
        target: Target,
    },
    Reactivate {
        target: Target,
    },
}

impl Operation {
    /// Short lowercase name, as used in logs and csv input.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Open { .. } => "open",
            Operation::Deposit { .. } => "deposit",
            Operation::Withdraw { .. } => "withdraw",
            Operation::RegisterPayee { .. } => "payee",
            Operation::Payment { .. } => "payment",
            Operation::Interest { .. } => "interest",
            Operation::Close { .. } => "close",
            Operation::Reactivate { .. } => "reactivate",
        }
    }

    pub fn user(&self) -> &str {
        match self {
            Operation::Open { user, .. } => user,
            Operation::Deposit { target, .. }
            | Operation::Withdraw { target, .. }
            | Operation::RegisterPayee { target, .. }
            | Operation::Payment { target, .. }
            | Operation::Interest { target }
            | Operation::Close { target }
            | Operation::Reactivate { target } => &target.user,
        }
    }

    /// Amount moved by the operation, if any.
    pub fn amount(&self) -> Option<Amount> {
        match self {
            Operation::Deposit { amount, .. }
            | Operation::Withdraw { amount, .. }
            | Operation::Payment { amount, .. } => Some(*amount),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let op = Operation::Withdraw {
            target: Target::new("dave", "pw", 1),
            amount: Amount::from_units(5),
        };
        assert_eq!(op.name(), "withdraw");
        assert_eq!(op.user(), "dave");
        assert_eq!(op.amount(), Some(Amount::from_units(5)));

        let op = Operation::Open {
            user: "steve".to_string(),
            secret: "pw".to_string(),
            kind: AccountKind::Savings,
        };
        assert_eq!(op.user(), "steve");
        assert_eq!(op.amount(), None);
    }
}
