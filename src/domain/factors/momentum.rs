//! Shooting momentum, read as regression to the mean.
//!
//! A team shooting well above its season three-point percentage over the
//! recent window is expected to cool off, and vice versa.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const MAX_POINTS: f64 = 1.0;
const MOMENTUM_CAP: f64 = 20.0;
const SCALE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumInput {
    pub away_recent_pct: f64,
    pub away_season_pct: f64,
    pub home_recent_pct: f64,
    pub home_season_pct: f64,
}

impl MomentumInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        let away = bundle.away();
        let home = bundle.home();
        Self {
            away_recent_pct: away.recent_three_point_pct,
            away_season_pct: away.three_point_pct,
            home_recent_pct: home.recent_three_point_pct,
            home_season_pct: home.three_point_pct,
        }
    }

    fn validate(&self) -> Result<(), String> {
        check::fraction("away_recent_3p_pct", self.away_recent_pct)?;
        check::fraction("away_season_3p_pct", self.away_season_pct)?;
        check::fraction("home_recent_3p_pct", self.home_recent_pct)?;
        check::fraction("home_season_3p_pct", self.home_season_pct)?;
        Ok(())
    }

    /// Percentage points each team is running hot (positive) or cold.
    fn heat(&self) -> (f64, f64) {
        (
            (self.away_recent_pct - self.away_season_pct) * 100.0,
            (self.home_recent_pct - self.home_season_pct) * 100.0,
        )
    }

    fn with_inputs(&self, result: FactorComputationResult) -> FactorComputationResult {
        result
            .with_input("away_recent_3p_pct", self.away_recent_pct)
            .with_input("away_season_3p_pct", self.away_season_pct)
            .with_input("home_recent_3p_pct", self.home_recent_pct)
            .with_input("home_season_3p_pct", self.home_season_pct)
    }
}

/// Both teams hot ⇒ expect regression ⇒ under.
#[must_use]
pub fn totals(input: &MomentumInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::ShootingMomentum,
            BetType::Total,
            reason,
        );
    }
    let (away_heat, home_heat) = input.heat();
    let delta = -(away_heat + home_heat);
    let s = saturate(delta, MOMENTUM_CAP, SCALE);
    let result = FactorComputationResult::computed(
        FactorKey::ShootingMomentum,
        BetType::Total,
        s.signal,
        MAX_POINTS,
        format!("recent 3P% vs season: away {away_heat:+.1}, home {home_heat:+.1}"),
    )
    .with_caps(s.capped)
    .with_input("delta", delta);
    input.with_inputs(result)
}

/// Hotter away team ⇒ expect it to cool relative to home ⇒ home.
#[must_use]
pub fn spread(input: &MomentumInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(
            FactorKey::ShootingMomentum,
            BetType::Spread,
            reason,
        );
    }
    let (away_heat, home_heat) = input.heat();
    let delta = -(away_heat - home_heat);
    let s = saturate(delta, MOMENTUM_CAP, SCALE);
    let result = FactorComputationResult::computed(
        FactorKey::ShootingMomentum,
        BetType::Spread,
        s.signal,
        MAX_POINTS,
        format!("relative 3P% heat away {away_heat:+.1} vs home {home_heat:+.1}"),
    )
    .with_caps(s.capped)
    .with_input("delta", delta);
    input.with_inputs(result)
}

/// Momentum factor registered once per catalog.
pub struct ShootingMomentum {
    bet_type: BetType,
}

impl ShootingMomentum {
    #[must_use]
    pub const fn totals() -> Self {
        Self {
            bet_type: BetType::Total,
        }
    }

    #[must_use]
    pub const fn spread() -> Self {
        Self {
            bet_type: BetType::Spread,
        }
    }
}

impl Factor for ShootingMomentum {
    fn key(&self) -> FactorKey {
        FactorKey::ShootingMomentum
    }

    fn bet_type(&self) -> BetType {
        self.bet_type
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        let input = MomentumInput::from_bundle(bundle);
        Ok(match self.bet_type {
            BetType::Total => totals(&input),
            BetType::Spread | BetType::Moneyline => spread(&input),
        })
    }
}
