//! Availability impact from an external research source.
//!
//! The estimate arrives asynchronously through the
//! [`ImpactEstimator`](crate::port::outbound::impact::ImpactEstimator) port.
//! This module only turns an already-received estimate into a result.

use serde::{Deserialize, Serialize};

use crate::domain::bet::BetType;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::clamp;

pub const MAX_POINTS: f64 = 2.0;

/// Bounded impact estimate.
///
/// `impact` is in `[-1, 1]` with the usual orientation: for totals, positive
/// means more scoring (over); for spreads, positive favours the away side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub impact: f64,
    #[serde(default)]
    pub summary: String,
}

impl ImpactEstimate {
    #[must_use]
    pub fn new(impact: f64, summary: impl Into<String>) -> Self {
        Self {
            impact,
            summary: summary.into(),
        }
    }

    /// No measurable impact.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(0.0, "no impact")
    }
}

/// Convert an estimate into the injury factor's result.
#[must_use]
pub fn compute(estimate: &ImpactEstimate, bet_type: BetType) -> FactorComputationResult {
    let group = bet_type.factor_group();
    if !estimate.impact.is_finite() {
        return FactorComputationResult::bad_input(
            FactorKey::InjuryAvailability,
            group,
            format!("impact is not finite ({})", estimate.impact),
        );
    }
    let signal = clamp(estimate.impact, -1.0, 1.0);
    let rationale = if estimate.summary.is_empty() {
        format!("external impact {signal:+.2}")
    } else {
        format!("{} ({signal:+.2})", estimate.summary)
    };
    FactorComputationResult::computed(
        FactorKey::InjuryAvailability,
        group,
        signal,
        MAX_POINTS,
        rationale,
    )
    .with_caps(signal != estimate.impact)
    .with_input("impact", estimate.impact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range_impact() {
        let r = compute(&ImpactEstimate::new(3.0, "star out"), BetType::Total);
        assert_eq!(r.signal, 1.0);
        assert!(r.caps_applied);
        assert_eq!(r.points.a(), MAX_POINTS);
    }

    #[test]
    fn test_neutral_estimate() {
        let r = compute(&ImpactEstimate::neutral(), BetType::Spread);
        assert_eq!(r.signal, 0.0);
        assert!(r.points.is_neutral());
    }

    #[test]
    fn test_moneyline_maps_to_spread_group() {
        let r = compute(&ImpactEstimate::new(-0.4, ""), BetType::Moneyline);
        assert_eq!(r.bet_type, BetType::Spread);
        assert!(r.points.b() > 0.0);
    }

    #[test]
    fn test_nan_is_bad_input() {
        let r = compute(&ImpactEstimate::new(f64::NAN, ""), BetType::Total);
        assert!(!r.status.is_computed());
    }
}
