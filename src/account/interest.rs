use crate::Amount;

/// Flat multiplier applied to the balance when interest is calculated.
pub const INTEREST_RATE: f64 = 1.003;

/// Whether an account earns interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestPolicy {
    None,
    Flat,
}

impl InterestPolicy {
    /// Interest to add to `balance`. Pure; the caller credits the result.
    pub fn calculate(&self, balance: Amount) -> Amount {
        match self {
            InterestPolicy::None => Amount::ZERO,
            InterestPolicy::Flat => balance.scaled_by(INTEREST_RATE),
        }
    }
}
