//! Possession battle: turnovers and rebounding.

use super::{check, Factor};
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const TURNOVER_MAX_POINTS: f64 = 1.5;
pub const REBOUND_MAX_POINTS: f64 = 1.5;

const POSSESSION_CAP: f64 = 20.0;
const TURNOVER_SCALE: f64 = 4.0;
const REBOUND_SCALE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnoverInput {
    /// Turnovers per possession.
    pub away_turnover_pct: f64,
    pub home_turnover_pct: f64,
}

impl TurnoverInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            away_turnover_pct: bundle.away().turnover_pct,
            home_turnover_pct: bundle.home().turnover_pct,
        }
    }
}

/// Home coughing it up more often than away ⇒ away.
#[must_use]
pub fn turnover_differential(input: &TurnoverInput) -> FactorComputationResult {
    let valid = check::fraction("away_tov_pct", input.away_turnover_pct)
        .and_then(|_| check::fraction("home_tov_pct", input.home_turnover_pct));
    if let Err(reason) = valid {
        return FactorComputationResult::bad_input(
            FactorKey::TurnoverDifferential,
            BetType::Spread,
            reason,
        );
    }
    let delta = (input.home_turnover_pct - input.away_turnover_pct) * 100.0;
    let s = saturate(delta, POSSESSION_CAP, TURNOVER_SCALE);
    FactorComputationResult::computed(
        FactorKey::TurnoverDifferential,
        BetType::Spread,
        s.signal,
        TURNOVER_MAX_POINTS,
        format!(
            "TOV% away {:.1} vs home {:.1}",
            input.away_turnover_pct * 100.0,
            input.home_turnover_pct * 100.0
        ),
    )
    .with_caps(s.capped)
    .with_input("away_tov_pct", input.away_turnover_pct)
    .with_input("home_tov_pct", input.home_turnover_pct)
    .with_input("delta", delta)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReboundInput {
    /// Share of available rebounds collected.
    pub away_rebound_share: f64,
    pub home_rebound_share: f64,
}

impl ReboundInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            away_rebound_share: bundle.away().rebound_share,
            home_rebound_share: bundle.home().rebound_share,
        }
    }
}

/// Away owning the glass ⇒ away.
#[must_use]
pub fn rebounding_differential(input: &ReboundInput) -> FactorComputationResult {
    let valid = check::fraction("away_reb_share", input.away_rebound_share)
        .and_then(|_| check::fraction("home_reb_share", input.home_rebound_share));
    if let Err(reason) = valid {
        return FactorComputationResult::bad_input(
            FactorKey::ReboundingDifferential,
            BetType::Spread,
            reason,
        );
    }
    let delta = (input.away_rebound_share - input.home_rebound_share) * 100.0;
    let s = saturate(delta, POSSESSION_CAP, REBOUND_SCALE);
    FactorComputationResult::computed(
        FactorKey::ReboundingDifferential,
        BetType::Spread,
        s.signal,
        REBOUND_MAX_POINTS,
        format!("rebound share gap {delta:+.1} pts"),
    )
    .with_caps(s.capped)
    .with_input("away_reb_share", input.away_rebound_share)
    .with_input("home_reb_share", input.home_rebound_share)
    .with_input("delta", delta)
}

pub struct TurnoverDifferential;

impl Factor for TurnoverDifferential {
    fn key(&self) -> FactorKey {
        FactorKey::TurnoverDifferential
    }

    fn bet_type(&self) -> BetType {
        BetType::Spread
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(turnover_differential(&TurnoverInput::from_bundle(bundle)))
    }
}

pub struct ReboundingDifferential;

impl Factor for ReboundingDifferential {
    fn key(&self) -> FactorKey {
        FactorKey::ReboundingDifferential
    }

    fn bet_type(&self) -> BetType {
        BetType::Spread
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(rebounding_differential(&ReboundInput::from_bundle(bundle)))
    }
}
