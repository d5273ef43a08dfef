use std::fmt;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    /// Like [`Amount::from_float`], but `None` for non-finite values and
    /// values that do not fit once scaled.
    pub fn try_from_float(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).round();
        if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
            return None;
        }
        Some(Amount(scaled as i64))
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, e.g. `Amount::from_units(500)` is `500.0000`.
    pub const fn from_units(units: i64) -> Self {
        Amount(units * Self::SCALE)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn abs(self) -> Self {
        Amount(self.0.saturating_abs())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Amount(self.0.saturating_add(rhs.0))
    }

    /// Multiply by a rate, rounding to the nearest representable value.
    pub fn scaled_by(self, factor: f64) -> Self {
        Amount((self.0 as f64 * factor).round() as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(self.0.saturating_neg())
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
