//! Dean Oliver's four factors as a single away-minus-home composite.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const MAX_POINTS: f64 = 2.0;
const COMPOSITE_CAP: f64 = 20.0;
const SCALE: f64 = 4.0;

const SHOOTING_WEIGHT: f64 = 0.40;
const TURNOVER_WEIGHT: f64 = 0.25;
const REBOUND_WEIGHT: f64 = 0.20;
const FREE_THROW_WEIGHT: f64 = 0.15;

/// One team's four factors, all as fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourFactorLine {
    pub effective_fg_pct: f64,
    pub turnover_pct: f64,
    pub offensive_rebound_pct: f64,
    pub free_throw_rate: f64,
}

impl FourFactorLine {
    fn validate(&self, side: &str) -> Result<(), String> {
        check::fraction(&format!("{side}_efg_pct"), self.effective_fg_pct)?;
        check::fraction(&format!("{side}_tov_pct"), self.turnover_pct)?;
        check::fraction(&format!("{side}_orb_pct"), self.offensive_rebound_pct)?;
        check::fraction(&format!("{side}_ft_rate"), self.free_throw_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourFactorsInput {
    pub away: FourFactorLine,
    pub home: FourFactorLine,
}

impl FourFactorsInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        let line = |t: crate::domain::bundle::ResolvedTeam| FourFactorLine {
            effective_fg_pct: t.effective_fg_pct,
            turnover_pct: t.turnover_pct,
            offensive_rebound_pct: t.offensive_rebound_pct,
            free_throw_rate: t.free_throw_rate,
        };
        Self {
            away: line(bundle.away()),
            home: line(bundle.home()),
        }
    }
}

/// `0.40·ΔeFG − 0.25·ΔTOV + 0.20·ΔORB + 0.15·ΔFTR`, away minus home, in
/// percentage points.
#[must_use]
pub fn compute(input: &FourFactorsInput) -> FactorComputationResult {
    let valid = input
        .away
        .validate("away")
        .and_then(|()| input.home.validate("home"));
    if let Err(reason) = valid {
        return FactorComputationResult::bad_input(FactorKey::FourFactors, BetType::Spread, reason);
    }

    let (a, h) = (input.away, input.home);
    let shooting = (a.effective_fg_pct - h.effective_fg_pct) * 100.0;
    let turnovers = (a.turnover_pct - h.turnover_pct) * 100.0;
    let boards = (a.offensive_rebound_pct - h.offensive_rebound_pct) * 100.0;
    let free_throws = (a.free_throw_rate - h.free_throw_rate) * 100.0;

    let delta = SHOOTING_WEIGHT * shooting - TURNOVER_WEIGHT * turnovers
        + REBOUND_WEIGHT * boards
        + FREE_THROW_WEIGHT * free_throws;
    let s = saturate(delta, COMPOSITE_CAP, SCALE);

    FactorComputationResult::computed(
        FactorKey::FourFactors,
        BetType::Spread,
        s.signal,
        MAX_POINTS,
        format!(
            "eFG {shooting:+.1}, TOV {turnovers:+.1}, ORB {boards:+.1}, FTR {free_throws:+.1} (away − home)"
        ),
    )
    .with_caps(s.capped)
    .with_input("efg_diff", shooting)
    .with_input("tov_diff", turnovers)
    .with_input("orb_diff", boards)
    .with_input("ftr_diff", free_throws)
    .with_input("delta", delta)
}

pub struct FourFactors;

impl Factor for FourFactors {
    fn key(&self) -> FactorKey {
        FactorKey::FourFactors
    }

    fn bet_type(&self) -> BetType {
        BetType::Spread
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(compute(&FourFactorsInput::from_bundle(bundle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average() -> FourFactorLine {
        FourFactorLine {
            effective_fg_pct: 0.54,
            turnover_pct: 0.135,
            offensive_rebound_pct: 0.25,
            free_throw_rate: 0.25,
        }
    }

    #[test]
    fn test_identical_teams_are_neutral() {
        let r = compute(&FourFactorsInput {
            away: average(),
            home: average(),
        });
        assert_eq!(r.signal, 0.0);
        assert!(r.points.is_neutral());
    }

    #[test]
    fn test_better_shooting_away_team_favoured() {
        let away = FourFactorLine {
            effective_fg_pct: 0.57,
            ..average()
        };
        let r = compute(&FourFactorsInput {
            away,
            home: average(),
        });
        assert!(r.signal > 0.0);
        assert!((r.inputs["delta"] - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_swap_flips_sign_and_scores() {
        let away = FourFactorLine {
            effective_fg_pct: 0.56,
            turnover_pct: 0.12,
            ..average()
        };
        let a = compute(&FourFactorsInput {
            away,
            home: average(),
        });
        let b = compute(&FourFactorsInput {
            away: average(),
            home: away,
        });
        assert!((a.signal + b.signal).abs() < 1e-12);
        assert!((a.points.a() - b.points.b()).abs() < 1e-12);
        assert_eq!(a.points.b(), 0.0);
        assert_eq!(b.points.a(), 0.0);
    }
}
