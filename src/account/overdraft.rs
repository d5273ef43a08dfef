use crate::Amount;

use super::error::{AccountError, MoneyOperation};

/// Maximum amount a single overdraft withdrawal (or fine) may reach.
pub const OVERDRAFT_LIMIT: Amount = Amount::from_units(500);

/// Share of every overdraft withdrawal charged as a fine.
pub const FINE_RATE: f64 = 0.01;

/// Whether and how an account may go below zero.
///
/// The facility tracks its own sub-balance, which starts at zero and only
/// ever goes negative as the overdraft is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverdraftPolicy {
    None,
    Facility { balance: Amount },
}

impl OverdraftPolicy {
    pub fn facility() -> Self {
        OverdraftPolicy::Facility {
            balance: Amount::ZERO,
        }
    }

    pub fn has_facility(&self) -> bool {
        matches!(self, OverdraftPolicy::Facility { .. })
    }

    /// Overdraft contribution to the effective balance (zero or negative).
    pub fn balance(&self) -> Amount {
        match self {
            OverdraftPolicy::None => Amount::ZERO,
            OverdraftPolicy::Facility { balance } => *balance,
        }
    }

    /// Fine charged for drawing `withdrawal` from the overdraft.
    ///
    /// Note the limit is checked against the fine itself, not the withdrawal.
    pub fn fine_for(&self, withdrawal: Amount) -> Result<Amount, AccountError> {
        match self {
            OverdraftPolicy::None => Ok(Amount::ZERO),
            OverdraftPolicy::Facility { .. } => {
                let fine = withdrawal.scaled_by(FINE_RATE);
                if fine > OVERDRAFT_LIMIT {
                    return Err(AccountError::InsufficientFunds(OVERDRAFT_LIMIT, fine));
                }
                Ok(fine)
            }
        }
    }

    /// Deduct the fine for `withdrawal` from the sub-balance.
    pub fn deduct_fine(&mut self, withdrawal: Amount) -> Result<(), AccountError> {
        let fine = self.fine_for(withdrawal)?;
        if let OverdraftPolicy::Facility { balance } = self {
            *balance -= fine;
        }
        Ok(())
    }

    /// Draw `amount` from the overdraft and charge the fine on it.
    ///
    /// Both the fine check and the limit check run before the sub-balance is
    /// touched, so a rejected withdrawal leaves no trace.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), AccountError> {
        if !self.has_facility() {
            return Err(AccountError::InsufficientFunds(Amount::ZERO, amount));
        }

        let fine = self.fine_for(amount)?;
        if amount > OVERDRAFT_LIMIT {
            return Err(AccountError::InsufficientFunds(OVERDRAFT_LIMIT, amount));
        }

        if let OverdraftPolicy::Facility { balance } = self {
            *balance = balance
                .checked_sub(amount + fine)
                .ok_or(AccountError::Overflow(MoneyOperation::Withdrawal, amount))?;
        }
        Ok(())
    }

    /// Repay the overdraft with `amount`, returning what is left over for the
    /// main balance.
    pub fn deposit(&mut self, amount: Amount) -> Amount {
        match self {
            OverdraftPolicy::None => Amount::ZERO,
            OverdraftPolicy::Facility { balance } => {
                if balance.abs() < amount {
                    let remainder = amount + *balance;
                    *balance = Amount::ZERO;
                    remainder
                } else {
                    *balance += amount;
                    Amount::ZERO
                }
            }
        }
    }
}
