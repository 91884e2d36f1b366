//! Home court strength relative to the league's home edge.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const MAX_POINTS: f64 = 1.5;
const HOME_CAP: f64 = 30.0;
const SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeCourtInput {
    /// Home team's win rate at home.
    pub home_home_win_pct: f64,
    /// Away team's win rate on the road.
    pub away_road_win_pct: f64,
    pub league_home_win_pct: f64,
}

impl HomeCourtInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            home_home_win_pct: bundle.home().home_win_pct,
            away_road_win_pct: bundle.away().road_win_pct,
            league_home_win_pct: bundle.league.home_win_pct,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::fraction("home_home_win_pct", self.home_home_win_pct)?;
        check::fraction("away_road_win_pct", self.away_road_win_pct)?;
        check::fraction("league_home_win_pct", self.league_home_win_pct)?;
        Ok(())
    }
}

/// Home team beating the league home edge, or a weak road team ⇒ home.
///
/// Already-priced league home advantage is netted out, so a league-average
/// home team hosting a league-average road team is neutral.
#[must_use]
pub fn compute(input: &HomeCourtInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(FactorKey::HomeCourt, BetType::Spread, reason);
    }
    let home_excess = input.home_home_win_pct - input.league_home_win_pct;
    let road_excess = input.away_road_win_pct - (1.0 - input.league_home_win_pct);
    let delta = -(home_excess - road_excess) * 100.0;
    let s = saturate(delta, HOME_CAP, SCALE);

    FactorComputationResult::computed(
        FactorKey::HomeCourt,
        BetType::Spread,
        s.signal,
        MAX_POINTS,
        format!(
            "home at home {:+.1} pts, away on road {:+.1} pts vs league",
            home_excess * 100.0,
            road_excess * 100.0
        ),
    )
    .with_caps(s.capped)
    .with_input("home_home_win_pct", input.home_home_win_pct)
    .with_input("away_road_win_pct", input.away_road_win_pct)
    .with_input("league_home_win_pct", input.league_home_win_pct)
    .with_input("delta", delta)
}

pub struct HomeCourt;

impl Factor for HomeCourt {
    fn key(&self) -> FactorKey {
        FactorKey::HomeCourt
    }

    fn bet_type(&self) -> BetType {
        BetType::Spread
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(compute(&HomeCourtInput::from_bundle(bundle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_average_is_neutral() {
        let r = compute(&HomeCourtInput {
            home_home_win_pct: 0.55,
            away_road_win_pct: 0.45,
            league_home_win_pct: 0.55,
        });
        assert!(r.signal.abs() < 1e-9);
    }

    #[test]
    fn test_fortress_favours_home() {
        let r = compute(&HomeCourtInput {
            home_home_win_pct: 0.80,
            away_road_win_pct: 0.40,
            league_home_win_pct: 0.55,
        });
        assert!(r.signal < 0.0);
        assert!(r.points.b() > 0.0);
        assert_eq!(r.points.a(), 0.0);
    }

    #[test]
    fn test_strong_road_team_favours_away() {
        let r = compute(&HomeCourtInput {
            home_home_win_pct: 0.50,
            away_road_win_pct: 0.65,
            league_home_win_pct: 0.55,
        });
        assert!(r.signal > 0.0);
    }
}
