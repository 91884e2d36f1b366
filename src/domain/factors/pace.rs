//! Pace index: expected possessions vs league pace.
//!
//! Faster games produce more possessions and more points, so a positive
//! delta argues for the over.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const MAX_POINTS: f64 = 2.0;
const SAFETY_CAP: f64 = 30.0;
const SCALE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceInput {
    pub away_pace: f64,
    pub home_pace: f64,
    pub league_pace: f64,
}

impl PaceInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            away_pace: bundle.away().pace,
            home_pace: bundle.home().pace,
            league_pace: bundle.league.pace,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::positive("away_pace", self.away_pace)?;
        check::positive("home_pace", self.home_pace)?;
        check::positive("league_pace", self.league_pace)?;
        Ok(())
    }
}

/// `delta = (away + home) / 2 − league`, signal `tanh(delta / 8)`.
#[must_use]
pub fn compute(input: &PaceInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(FactorKey::PaceIndex, BetType::Total, reason);
    }

    let expected = (input.away_pace + input.home_pace) / 2.0;
    let delta = expected - input.league_pace;
    let s = saturate(delta, SAFETY_CAP, SCALE);

    FactorComputationResult::computed(
        FactorKey::PaceIndex,
        BetType::Total,
        s.signal,
        MAX_POINTS,
        format!(
            "expected pace {expected:.1} vs league {:.1} ({delta:+.1})",
            input.league_pace
        ),
    )
    .with_caps(s.capped)
    .with_input("away_pace", input.away_pace)
    .with_input("home_pace", input.home_pace)
    .with_input("league_pace", input.league_pace)
    .with_input("expected_pace", expected)
    .with_input("delta", delta)
}

pub struct PaceIndex;

impl Factor for PaceIndex {
    fn key(&self) -> FactorKey {
        FactorKey::PaceIndex
    }

    fn bet_type(&self) -> BetType {
        BetType::Total
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(compute(&PaceInput::from_bundle(bundle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factor::ResultStatus;

    #[test]
    fn test_worked_example() {
        let r = compute(&PaceInput {
            away_pace: 104.0,
            home_pace: 103.0,
            league_pace: 99.5,
        });
        assert!((r.signal - 0.4621).abs() < 1e-4);
        assert!((r.points.a() - 0.924).abs() < 1e-3);
        assert_eq!(r.points.b(), 0.0);
        assert_eq!(r.inputs["expected_pace"], 103.5);
        assert!(!r.caps_applied);
    }

    #[test]
    fn test_slow_game_favours_under() {
        let r = compute(&PaceInput {
            away_pace: 96.0,
            home_pace: 97.0,
            league_pace: 99.5,
        });
        assert!(r.signal < 0.0);
        assert_eq!(r.points.a(), 0.0);
        assert!(r.points.b() > 0.0);
    }

    #[test]
    fn test_neutral_at_league_pace() {
        let r = compute(&PaceInput {
            away_pace: 99.5,
            home_pace: 99.5,
            league_pace: 99.5,
        });
        assert_eq!(r.signal, 0.0);
        assert!(r.points.is_neutral());
    }

    #[test]
    fn test_swapping_teams_leaves_pace_unchanged() {
        let a = compute(&PaceInput {
            away_pace: 101.0,
            home_pace: 97.0,
            league_pace: 99.5,
        });
        let b = compute(&PaceInput {
            away_pace: 97.0,
            home_pace: 101.0,
            league_pace: 99.5,
        });
        assert_eq!(a.signal, b.signal);
    }

    #[test]
    fn test_bad_input_is_neutral() {
        let r = compute(&PaceInput {
            away_pace: f64::NAN,
            home_pace: 100.0,
            league_pace: 99.5,
        });
        assert!(matches!(r.status, ResultStatus::BadInput(_)));
        assert_eq!(r.signal, 0.0);

        let r = compute(&PaceInput {
            away_pace: 100.0,
            home_pace: -3.0,
            league_pace: 99.5,
        });
        assert!(matches!(r.status, ResultStatus::BadInput(_)));
    }
}
