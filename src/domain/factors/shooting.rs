//! Shooting environment factors for totals.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const THREE_MAX_POINTS: f64 = 1.0;
pub const WHISTLE_MAX_POINTS: f64 = 1.0;

const SHOOTING_CAP: f64 = 20.0;
const THREE_SCALE: f64 = 5.0;
const WHISTLE_SCALE: f64 = 4.0;
/// Volume counts for less than accuracy in the three-point blend.
const VOLUME_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointInput {
    pub away_attempt_rate: f64,
    pub home_attempt_rate: f64,
    pub away_pct: f64,
    pub home_pct: f64,
    pub league_attempt_rate: f64,
    pub league_pct: f64,
}

impl ThreePointInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        let away = bundle.away();
        let home = bundle.home();
        Self {
            away_attempt_rate: away.three_point_attempt_rate,
            home_attempt_rate: home.three_point_attempt_rate,
            away_pct: away.three_point_pct,
            home_pct: home.three_point_pct,
            league_attempt_rate: bundle.league.three_point_attempt_rate,
            league_pct: bundle.league.three_point_pct,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::fraction("away_3pa_rate", self.away_attempt_rate)?;
        check::fraction("home_3pa_rate", self.home_attempt_rate)?;
        check::fraction("away_3p_pct", self.away_pct)?;
        check::fraction("home_3p_pct", self.home_pct)?;
        check::fraction("league_3pa_rate", self.league_attempt_rate)?;
        check::fraction("league_3p_pct", self.league_pct)?;
        Ok(())
    }
}

/// More and better three-point shooting than league ⇒ over.
#[must_use]
pub fn three_point_environment(input: &ThreePointInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::ThreePointEnvironment,
            BetType::Total,
            reason,
        );
    }
    let rate_delta = (input.away_attempt_rate + input.home_attempt_rate) / 2.0
        - input.league_attempt_rate;
    let pct_delta = (input.away_pct + input.home_pct) / 2.0 - input.league_pct;
    let delta = VOLUME_WEIGHT * rate_delta * 100.0 + pct_delta * 100.0;
    let s = saturate(delta, SHOOTING_CAP, THREE_SCALE);

    FactorComputationResult::computed(
        FactorKey::ThreePointEnvironment,
        BetType::Total,
        s.signal,
        THREE_MAX_POINTS,
        format!(
            "3PA rate {:+.1} pts, 3P% {:+.1} pts vs league",
            rate_delta * 100.0,
            pct_delta * 100.0
        ),
    )
    .with_caps(s.capped)
    .with_input("away_3pa_rate", input.away_attempt_rate)
    .with_input("home_3pa_rate", input.home_attempt_rate)
    .with_input("away_3p_pct", input.away_pct)
    .with_input("home_3p_pct", input.home_pct)
    .with_input("delta", delta)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeThrowInput {
    pub away_rate: f64,
    pub home_rate: f64,
    pub league_rate: f64,
}

impl FreeThrowInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            away_rate: bundle.away().free_throw_rate,
            home_rate: bundle.home().free_throw_rate,
            league_rate: bundle.league.free_throw_rate,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::fraction("away_ft_rate", self.away_rate)?;
        check::fraction("home_ft_rate", self.home_rate)?;
        check::fraction("league_ft_rate", self.league_rate)?;
        Ok(())
    }
}

/// Whistle-heavy matchups stop the clock and add free points ⇒ over.
#[must_use]
pub fn free_throw_environment(input: &FreeThrowInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::FreeThrowEnvironment,
            BetType::Total,
            reason,
        );
    }
    let combined = (input.away_rate + input.home_rate) / 2.0;
    let delta = (combined - input.league_rate) * 100.0;
    let s = saturate(delta, SHOOTING_CAP, WHISTLE_SCALE);

    FactorComputationResult::computed(
        FactorKey::FreeThrowEnvironment,
        BetType::Total,
        s.signal,
        WHISTLE_MAX_POINTS,
        format!("FT rate {combined:.3} vs league {:.3}", input.league_rate),
    )
    .with_caps(s.capped)
    .with_input("away_ft_rate", input.away_rate)
    .with_input("home_ft_rate", input.home_rate)
    .with_input("league_ft_rate", input.league_rate)
    .with_input("delta", delta)
}

pub struct ThreePointEnvironment;

impl Factor for ThreePointEnvironment {
    fn key(&self) -> FactorKey {
        FactorKey::ThreePointEnvironment
    }

    fn bet_type(&self) -> BetType {
        BetType::Total
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(three_point_environment(&ThreePointInput::from_bundle(bundle)))
    }
}

pub struct FreeThrowEnvironment;

impl Factor for FreeThrowEnvironment {
    fn key(&self) -> FactorKey {
        FactorKey::FreeThrowEnvironment
    }

    fn bet_type(&self) -> BetType {
        BetType::Total
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(free_throw_environment(&FreeThrowInput::from_bundle(bundle)))
    }
}
