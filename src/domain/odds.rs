//! American odds conversions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A price in American format (`-110`, `+150`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AmericanOdds(f64);

impl AmericanOdds {
    /// The standard `-110` vig price.
    pub const STANDARD: Self = Self(-110.0);

    /// Validate and wrap an American price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the magnitude is below 100
    /// or the value is not finite.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value.abs() < 100.0 {
            return Err(DomainError::InvalidOdds { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Decimal odds (total return per unit staked).
    #[must_use]
    pub fn decimal(&self) -> f64 {
        if self.0 > 0.0 {
            1.0 + self.0 / 100.0
        } else {
            1.0 + 100.0 / self.0.abs()
        }
    }

    /// Net profit per unit staked on a win.
    #[must_use]
    pub fn payout(&self) -> f64 {
        self.decimal() - 1.0
    }

    /// Break-even probability including the vig.
    #[must_use]
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.decimal()
    }

    /// Vig-free probabilities for a two-way market `(a, b)`.
    #[must_use]
    pub fn no_vig(a: Self, b: Self) -> (f64, f64) {
        let pa = a.implied_probability();
        let pb = b.implied_probability();
        let total = pa + pb;
        (pa / total, pb / total)
    }
}

impl Default for AmericanOdds {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<f64> for AmericanOdds {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<AmericanOdds> for f64 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0.0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
