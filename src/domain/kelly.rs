//! Fractional Kelly stake sizing.
//!
//! ```text
//! f* = (b × p − q) / b
//! stake = bankroll × max(0, f*) × fraction
//! ```
//!
//! Where `b` is decimal odds minus one, `p` the win probability and
//! `q = 1 − p`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::odds::AmericanOdds;

/// Full-Kelly fraction of bankroll. May be negative (no bet).
#[must_use]
pub fn kelly_fraction(win_probability: f64, decimal_odds: f64) -> f64 {
    let b = decimal_odds - 1.0;
    if !(b > 0.0) || !win_probability.is_finite() {
        return 0.0;
    }
    let p = win_probability;
    let q = 1.0 - p;
    (b * p - q) / b
}

/// A sized stake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    /// Currency amount to risk.
    pub amount: Decimal,
    /// Amount expressed in betting units, rounded to 0.1.
    pub units: Decimal,
    /// Full-Kelly fraction before scaling.
    pub kelly: f64,
}

impl Stake {
    #[must_use]
    pub fn none(kelly: f64) -> Self {
        Self {
            amount: Decimal::ZERO,
            units: Decimal::ZERO,
            kelly,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

/// Fractional Kelly sizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KellySizer {
    /// Multiplier on full Kelly (0.25 = quarter Kelly).
    pub fraction: f64,
    /// One unit as a share of bankroll.
    pub unit_ratio: f64,
    /// Largest stake in units.
    pub max_units: f64,
}

impl Default for KellySizer {
    fn default() -> Self {
        Self {
            fraction: 0.25,
            unit_ratio: 0.01,
            max_units: 5.0,
        }
    }
}

impl KellySizer {
    #[must_use]
    pub const fn new(fraction: f64, unit_ratio: f64, max_units: f64) -> Self {
        Self {
            fraction,
            unit_ratio,
            max_units,
        }
    }

    /// Size a stake. Never negative: a non-positive Kelly fraction or any
    /// invalid input yields a zero stake.
    #[must_use]
    pub fn size(&self, win_probability: f64, odds: AmericanOdds, bankroll: Decimal) -> Stake {
        if !(0.0..=1.0).contains(&win_probability) {
            return Stake::none(0.0);
        }
        let kelly = kelly_fraction(win_probability, odds.decimal());
        let Some(bankroll_f) = bankroll.to_f64() else {
            return Stake::none(kelly);
        };
        if bankroll_f <= 0.0 || kelly <= 0.0 || !(self.fraction > 0.0) {
            return Stake::none(kelly);
        }

        let raw = bankroll_f * kelly * self.fraction.min(1.0);
        let unit_size = bankroll_f * self.unit_ratio;
        let mut amount = raw;
        let mut units = if unit_size > 0.0 { raw / unit_size } else { 0.0 };
        if self.max_units > 0.0 && units > self.max_units {
            units = self.max_units;
            amount = units * unit_size;
        }

        let to_decimal = |x: f64, dp: u32| {
            Decimal::from_f64_retain(x.max(0.0))
                .unwrap_or(Decimal::ZERO)
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        };
        Stake {
            amount: to_decimal(amount, 2),
            units: to_decimal(units, 1),
            kelly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kelly_fraction_at_standard_vig() {
        let f = kelly_fraction(0.55, AmericanOdds::STANDARD.decimal());
        assert!((f - 0.055).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_kelly_stake() {
        let sizer = KellySizer::default();
        let stake = sizer.size(0.55, AmericanOdds::STANDARD, dec!(1000));
        assert_eq!(stake.amount, dec!(13.75));
        assert_eq!(stake.units, dec!(1.4));
    }

    #[test]
    fn test_negative_edge_is_zero() {
        let sizer = KellySizer::default();
        let stake = sizer.size(0.45, AmericanOdds::STANDARD, dec!(1000));
        assert!(stake.is_zero());
        assert!(stake.kelly < 0.0);
        assert_eq!(stake.units, Decimal::ZERO);
    }

    #[test]
    fn test_units_capped() {
        let sizer = KellySizer::new(1.0, 0.01, 3.0);
        let stake = sizer.size(0.8, AmericanOdds::try_new(150.0).unwrap(), dec!(1000));
        assert_eq!(stake.units, dec!(3.0));
        assert_eq!(stake.amount, dec!(30.00));
    }

    #[test]
    fn test_invalid_inputs_are_zero() {
        let sizer = KellySizer::default();
        assert!(sizer.size(1.5, AmericanOdds::STANDARD, dec!(1000)).is_zero());
        assert!(sizer.size(0.6, AmericanOdds::STANDARD, dec!(0)).is_zero());
        assert!(sizer.size(0.6, AmericanOdds::STANDARD, dec!(-50)).is_zero());
    }
}
