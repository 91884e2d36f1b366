//! Rest and fatigue.
//!
//! The totals variant sums both teams' freshness (tired legs ⇒ under); the
//! spread variant compares them (fresher away team ⇒ away).

use super::Factor;
use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::domain::signal::saturate;
use crate::error::FactorError;

pub const MAX_POINTS: f64 = 1.0;
const REST_CAP: f64 = 10.0;
const TOTALS_SCALE: f64 = 2.0;
const SPREAD_SCALE: f64 = 1.5;
/// Longer layoffs are treated as data errors.
const MAX_REST_DAYS: u32 = 30;

/// Freshness score for days of rest: back-to-back hurts, extra days help
/// with diminishing returns.
#[must_use]
pub fn rest_score(days: u32) -> f64 {
    match days {
        0 => -1.5,
        1 => 0.0,
        2 => 0.5,
        _ => 0.75,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestInput {
    pub away_rest_days: u32,
    pub home_rest_days: u32,
}

impl RestInput {
    #[must_use]
    pub fn from_bundle(bundle: &DataBundle) -> Self {
        Self {
            away_rest_days: bundle.away().rest_days,
            home_rest_days: bundle.home().rest_days,
        }
    }

    fn validate(&self) -> Result<(), String> {
        for (name, days) in [
            ("away_rest_days", self.away_rest_days),
            ("home_rest_days", self.home_rest_days),
        ] {
            if days > MAX_REST_DAYS {
                return Err(format!("{name} must be at most {MAX_REST_DAYS}, got {days}"));
            }
        }
        Ok(())
    }
}

fn label(days: u32) -> &'static str {
    match days {
        0 => "back-to-back",
        1 => "1 day",
        2 => "2 days",
        _ => "3+ days",
    }
}

/// Combined freshness of both teams, for totals.
#[must_use]
pub fn totals(input: &RestInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(FactorKey::RestFatigue, BetType::Total, reason);
    }
    let delta = rest_score(input.away_rest_days) + rest_score(input.home_rest_days);
    let s = saturate(delta, REST_CAP, TOTALS_SCALE);
    FactorComputationResult::computed(
        FactorKey::RestFatigue,
        BetType::Total,
        s.signal,
        MAX_POINTS,
        format!(
            "away {} / home {}",
            label(input.away_rest_days),
            label(input.home_rest_days)
        ),
    )
    .with_caps(s.capped)
    .with_input("away_rest_days", f64::from(input.away_rest_days))
    .with_input("home_rest_days", f64::from(input.home_rest_days))
    .with_input("delta", delta)
}

/// Freshness gap, for spreads. Positive favours away.
#[must_use]
pub fn spread(input: &RestInput) -> FactorComputationResult {
    if let Err(reason) = input.validate() {
        return FactorComputationResult::bad_input(FactorKey::RestFatigue, BetType::Spread, reason);
    }
    let delta = rest_score(input.away_rest_days) - rest_score(input.home_rest_days);
    let s = saturate(delta, REST_CAP, SPREAD_SCALE);
    FactorComputationResult::computed(
        FactorKey::RestFatigue,
        BetType::Spread,
        s.signal,
        MAX_POINTS,
        format!(
            "rest edge {delta:+.2} (away {} / home {})",
            label(input.away_rest_days),
            label(input.home_rest_days)
        ),
    )
    .with_caps(s.capped)
    .with_input("away_rest_days", f64::from(input.away_rest_days))
    .with_input("home_rest_days", f64::from(input.home_rest_days))
    .with_input("delta", delta)
}

/// Rest factor registered once per catalog.
pub struct RestFatigue {
    bet_type: BetType,
}

impl RestFatigue {
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

impl Factor for RestFatigue {
    fn key(&self) -> FactorKey {
        FactorKey::RestFatigue
    }

    fn bet_type(&self) -> BetType {
        self.bet_type
    }

    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        let input = RestInput::from_bundle(bundle);
        Ok(match self.bet_type {
            BetType::Total => totals(&input),
            BetType::Spread | BetType::Moneyline => spread(&input),
        })
    }
}
