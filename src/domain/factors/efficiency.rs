//! Efficiency factors built on offensive and defensive ratings.
//!
//! Ratings are points per 100 possessions.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

const RATING_CAP: f64 = 30.0;
const TOTALS_SCALE: f64 = 10.0;
const NET_SCALE: f64 = 6.0;

pub const FORM_MAX_POINTS: f64 = 2.0;
pub const EROSION_MAX_POINTS: f64 = 2.0;
pub const NET_MAX_POINTS: f64 = 3.0;

/// Ratings of both teams against the league baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInput {
    pub away_offense: f64,
    pub away_defense: f64,
    pub home_offense: f64,
    pub home_defense: f64,
    pub league_offense: f64,
    pub league_defense: f64,
}

impl RatingInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        let away = bundle.away();
        let home = bundle.home();
        Self {
            away_offense: away.offensive_rating,
            away_defense: away.defensive_rating,
            home_offense: home.offensive_rating,
            home_defense: home.defensive_rating,
            league_offense: bundle.league.offensive_rating,
            league_defense: bundle.league.defensive_rating,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::positive("away_offensive_rating", self.away_offense)?;
        check::positive("away_defensive_rating", self.away_defense)?;
        check::positive("home_offensive_rating", self.home_offense)?;
        check::positive("home_defensive_rating", self.home_defense)?;
        check::positive("league_offensive_rating", self.league_offense)?;
        check::positive("league_defensive_rating", self.league_defense)?;
        Ok(())
    }

    fn with_inputs(&self, result: FactorComputationResult) -> FactorComputationResult {
        result
            .with_input("away_offensive_rating", self.away_offense)
            .with_input("away_defensive_rating", self.away_defense)
            .with_input("home_offensive_rating", self.home_offense)
            .with_input("home_defensive_rating", self.home_defense)
            .with_input("league_offensive_rating", self.league_offense)
            .with_input("league_defensive_rating", self.league_defense)
    }
}

/// Combined offensive rating above league ⇒ over.
#[must_use]
pub fn offensive_form(input: &RatingInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::OffensiveForm,
            BetType::Total,
            reason,
        );
    }
    let combined = (input.away_offense + input.home_offense) / 2.0;
    let delta = combined - input.league_offense;
    let s = saturate(delta, RATING_CAP, TOTALS_SCALE);

    let result = FactorComputationResult::computed(
        FactorKey::OffensiveForm,
        BetType::Total,
        s.signal,
        FORM_MAX_POINTS,
        format!("combined ORtg {combined:.1} vs league {:.1}", input.league_offense),
    )
    .with_caps(s.capped)
    .with_input("delta", delta);
    input.with_inputs(result)
}

/// Combined defensive rating above league (leakier defenses) ⇒ over.
#[must_use]
pub fn defensive_erosion(input: &RatingInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::DefensiveErosion,
            BetType::Total,
            reason,
        );
    }
    let combined = (input.away_defense + input.home_defense) / 2.0;
    let delta = combined - input.league_defense;
    let s = saturate(delta, RATING_CAP, TOTALS_SCALE);

    let result = FactorComputationResult::computed(
        FactorKey::DefensiveErosion,
        BetType::Total,
        s.signal,
        EROSION_MAX_POINTS,
        format!("combined DRtg {combined:.1} vs league {:.1}", input.league_defense),
    )
    .with_caps(s.capped)
    .with_input("delta", delta);
    input.with_inputs(result)
}

/// Away net rating minus home net rating ⇒ positive favours away.
#[must_use]
pub fn net_rating(input: &RatingInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(FactorKey::NetRating, BetType::Spread, reason);
    }
    let away_net = input.away_offense - input.away_defense;
    let home_net = input.home_offense - input.home_defense;
    let delta = away_net - home_net;
    let s = saturate(delta, RATING_CAP, NET_SCALE);

    let result = FactorComputationResult::computed(
        FactorKey::NetRating,
        BetType::Spread,
        s.signal,
        NET_MAX_POINTS,
        format!("net rating away {away_net:+.1} vs home {home_net:+.1}"),
    )
    .with_caps(s.capped)
    .with_input("delta", delta);
    input.with_inputs(result)
}

pub struct OffensiveForm;

impl Factor for OffensiveForm {
    fn key(&self) -> FactorKey {
        FactorKey::OffensiveForm
    }

    fn bet_type(&self) -> BetType {
        BetType::Total
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(offensive_form(&RatingInput::from_bundle(bundle)))
    }
}

pub struct DefensiveErosion;

impl Factor for DefensiveErosion {
    fn key(&self) -> FactorKey {
        FactorKey::DefensiveErosion
    }

    fn bet_type(&self) -> BetType {
        BetType::Total
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(defensive_erosion(&RatingInput::from_bundle(bundle)))
    }
}

pub struct NetRating;

impl Factor for NetRating {
    fn key(&self) -> FactorKey {
        FactorKey::NetRating
    }

    fn bet_type(&self) -> BetType {
        BetType::Spread
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(net_rating(&RatingInput::from_bundle(bundle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league() -> RatingInput {
        RatingInput {
            away_offense: 114.5,
            away_defense: 114.5,
            home_offense: 114.5,
            home_defense: 114.5,
            league_offense: 114.5,
            league_defense: 114.5,
        }
    }

    #[test]
    fn test_neutral_at_league_average() {
        for r in [
            offensive_form(&league()),
            defensive_erosion(&league()),
            net_rating(&league()),
        ] {
            assert_eq!(r.signal, 0.0);
            assert!(r.points.is_neutral());
        }
    }

    #[test]
    fn test_hot_offenses_favour_over() {
        let input = RatingInput {
            away_offense: 120.0,
            home_offense: 119.0,
            ..league()
        };
        let r = offensive_form(&input);
        assert!(r.signal > 0.0);
        assert!(r.points.a() > 0.0);
        assert_eq!(r.points.b(), 0.0);
    }

    #[test]
    fn test_stingy_defenses_favour_under() {
        let input = RatingInput {
            away_defense: 108.0,
            home_defense: 109.0,
            ..league()
        };
        let r = defensive_erosion(&input);
        assert!(r.signal < 0.0);
        assert!(r.points.b() > 0.0);
    }

    #[test]
    fn test_net_rating_is_antisymmetric() {
        let input = RatingInput {
            away_offense: 118.0,
            away_defense: 110.0,
            home_offense: 112.0,
            home_defense: 116.0,
            ..league()
        };
        let swapped = RatingInput {
            away_offense: input.home_offense,
            away_defense: input.home_defense,
            home_offense: input.away_offense,
            home_defense: input.away_defense,
            ..league()
        };
        let a = net_rating(&input);
        let b = net_rating(&swapped);
        assert!((a.signal + b.signal).abs() < 1e-12);
        assert_eq!(a.points.a(), b.points.b());
        assert_eq!(a.points.b(), b.points.a());
    }

    #[test]
    fn test_zero_rating_is_bad_input() {
        let input = RatingInput {
            home_defense: 0.0,
            ..league()
        };
        assert!(!net_rating(&input).status.is_computed());
    }
}
