//! Bounded signal primitives shared by every factor.
//!
//! Factors derive a raw delta, clamp it to an outlier safety cap, squash it
//! through `tanh` and convert the resulting signal into a pair of directional
//! point scores. The pair obeys the single-positive-score rule: at most one
//! side is ever non-zero.

use serde::{Deserialize, Serialize};

/// Clamp `x` into `[lo, hi]`.
#[must_use]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Saturating odd squash: `squash(0) = 0`, `squash(±∞) → ±1`.
#[must_use]
pub fn squash(x: f64) -> f64 {
    x.tanh()
}

/// A delta after the safety cap and squash have been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturated {
    /// Signal in `[-1, 1]`.
    pub signal: f64,
    /// True when the raw delta exceeded the safety cap.
    pub capped: bool,
}

/// Cap `delta` to `±cap`, squash `delta / scale`, clamp to `[-1, 1]`.
///
/// Callers validate finiteness before calling; a non-finite delta yields a
/// neutral signal rather than NaN.
#[must_use]
pub fn saturate(delta: f64, cap: f64, scale: f64) -> Saturated {
    if !delta.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return Saturated {
            signal: 0.0,
            capped: false,
        };
    }
    let bounded = clamp(delta, -cap, cap);
    Saturated {
        signal: clamp(squash(bounded / scale), -1.0, 1.0),
        capped: bounded != delta,
    }
}

/// Directional point scores for one factor.
///
/// Side `a` is over (totals) or away (spread/moneyline); side `b` is under or
/// home. At most one of the two is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SidePoints {
    a: f64,
    b: f64,
}

impl SidePoints {
    /// Both sides zero.
    pub const NEUTRAL: Self = Self { a: 0.0, b: 0.0 };

    /// Convert a signal into directional points scaled by `max_points`.
    #[must_use]
    pub fn from_signal(signal: f64, max_points: f64) -> Self {
        if !signal.is_finite() || signal == 0.0 {
            return Self::NEUTRAL;
        }
        let magnitude = signal.abs() * max_points.max(0.0);
        if signal > 0.0 {
            Self { a: magnitude, b: 0.0 }
        } else {
            Self { a: 0.0, b: magnitude }
        }
    }

    #[must_use]
    pub const fn a(&self) -> f64 {
        self.a
    }

    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    /// `a − b`; positive favours side `a`.
    #[must_use]
    pub fn signed(&self) -> f64 {
        self.a - self.b
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Swap the two sides.
    #[must_use]
    pub const fn flipped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_is_odd_and_bounded() {
        assert_eq!(squash(0.0), 0.0);
        assert!((squash(3.0) + squash(-3.0)).abs() < 1e-12);
        assert!(squash(1e6) <= 1.0);
        assert!(squash(-1e6) >= -1.0);
    }

    #[test]
    fn test_saturate_caps_outliers() {
        let s = saturate(500.0, 30.0, 8.0);
        assert!(s.capped);
        assert!((s.signal - (30.0_f64 / 8.0).tanh()).abs() < 1e-12);

        let s = saturate(4.0, 30.0, 8.0);
        assert!(!s.capped);
        assert!((s.signal - 0.5_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_saturate_non_finite_is_neutral() {
        assert_eq!(saturate(f64::NAN, 10.0, 2.0).signal, 0.0);
        assert_eq!(saturate(f64::INFINITY, 10.0, 2.0).signal, 0.0);
        assert_eq!(saturate(1.0, 10.0, 0.0).signal, 0.0);
    }

    #[test]
    fn test_side_points_single_positive() {
        let p = SidePoints::from_signal(0.5, 2.0);
        assert_eq!(p.a(), 1.0);
        assert_eq!(p.b(), 0.0);

        let p = SidePoints::from_signal(-0.25, 2.0);
        assert_eq!(p.a(), 0.0);
        assert_eq!(p.b(), 0.5);
        assert_eq!(p.signed(), -0.5);

        assert!(SidePoints::from_signal(0.0, 2.0).is_neutral());
    }
}
