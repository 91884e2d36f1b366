//! Factor identities, catalog records and computation results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::bet::{BetType, Side, Sport};
use super::signal::SidePoints;

/// Identifier of a factor.
///
/// Keys are scoped by (sport, bet type): the same key may appear in both the
/// totals and spread catalogs with a bet-type-specific formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    PaceIndex,
    OffensiveForm,
    DefensiveErosion,
    ThreePointEnvironment,
    FreeThrowEnvironment,
    RestFatigue,
    ShootingMomentum,
    InjuryAvailability,
    RefereeTendency,
    NetRating,
    TurnoverDifferential,
    ReboundingDifferential,
    HomeCourt,
    FourFactors,
    TotalEdge,
    SpreadEdge,
}

impl FactorKey {
    /// Stable snake_case name used in config files and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaceIndex => "pace_index",
            Self::OffensiveForm => "offensive_form",
            Self::DefensiveErosion => "defensive_erosion",
            Self::ThreePointEnvironment => "three_point_environment",
            Self::FreeThrowEnvironment => "free_throw_environment",
            Self::RestFatigue => "rest_fatigue",
            Self::ShootingMomentum => "shooting_momentum",
            Self::InjuryAvailability => "injury_availability",
            Self::RefereeTendency => "referee_tendency",
            Self::NetRating => "net_rating",
            Self::TurnoverDifferential => "turnover_differential",
            Self::ReboundingDifferential => "rebounding_differential",
            Self::HomeCourt => "home_court",
            Self::FourFactors => "four_factors",
            Self::TotalEdge => "total_edge",
            Self::SpreadEdge => "spread_edge",
        }
    }

    /// Market-edge keys sit outside the weight budget.
    #[must_use]
    pub const fn is_market_edge(&self) -> bool {
        matches!(self, Self::TotalEdge | Self::SpreadEdge)
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How broad a factor's view of the matchup is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorScope {
    Global,
    Matchup,
    Team,
}

/// Raw statistic groups a factor reads from the data bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Pace,
    Ratings,
    Shooting,
    FreeThrows,
    Rest,
    Possession,
    Splits,
    RecentForm,
    Injuries,
    Market,
}

/// Whether a catalog factor has a working implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Active,
    Planned,
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorDefinition {
    pub key: FactorKey,
    pub name: &'static str,
    pub description: &'static str,
    pub sport: Sport,
    pub bet_type: BetType,
    pub scope: FactorScope,
    pub default_weight: f64,
    pub max_points: f64,
    pub sources: &'static [DataSource],
    pub status: FactorStatus,
}

impl FactorDefinition {
    #[must_use]
    pub const fn is_market_edge(&self) -> bool {
        self.key.is_market_edge()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == FactorStatus::Active
    }

    /// Whether the async external-impact path computes this factor.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.sources.contains(&DataSource::Injuries)
    }
}

/// Why a result carries (or does not carry) a real signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ResultStatus {
    /// Computed from valid inputs.
    Computed,
    /// Inputs were non-finite or out of domain; result is neutral.
    BadInput(String),
    /// The factor raised an error or panicked; result is neutral.
    Failed(String),
    /// Catalog entry has no implementation yet.
    NotImplemented,
    /// No data bundle was available for this evaluation.
    Unavailable,
    /// The external estimate did not arrive in time.
    TimedOut,
}

impl ResultStatus {
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed)
    }
}

/// Output of one factor for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorComputationResult {
    pub key: FactorKey,
    pub bet_type: BetType,
    pub signal: f64,
    pub points: SidePoints,
    pub inputs: BTreeMap<String, f64>,
    pub rationale: String,
    pub caps_applied: bool,
    /// Configured weight (0–100), attached by the orchestrator.
    pub weight: f64,
    pub status: ResultStatus,
}

impl FactorComputationResult {
    /// Build a computed result from a signal, enforcing the `[-1, 1]` bound.
    #[must_use]
    pub fn computed(
        key: FactorKey,
        bet_type: BetType,
        signal: f64,
        max_points: f64,
        rationale: impl Into<String>,
    ) -> Self {
        let signal = if signal.is_finite() {
            signal.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            key,
            bet_type,
            signal,
            points: SidePoints::from_signal(signal, max_points),
            inputs: BTreeMap::new(),
            rationale: rationale.into(),
            caps_applied: false,
            weight: 0.0,
            status: ResultStatus::Computed,
        }
    }

    /// Zero-signal result carrying `status`.
    #[must_use]
    pub fn neutral(key: FactorKey, bet_type: BetType, status: ResultStatus) -> Self {
        let rationale = match &status {
            ResultStatus::Computed => "no edge".to_string(),
            ResultStatus::BadInput(reason) => format!("bad_input: {reason}"),
            ResultStatus::Failed(error) => format!("factor failed: {error}"),
            ResultStatus::NotImplemented => "not implemented".to_string(),
            ResultStatus::Unavailable => "data unavailable".to_string(),
            ResultStatus::TimedOut => "external estimate timed out".to_string(),
        };
        Self {
            key,
            bet_type,
            signal: 0.0,
            points: SidePoints::NEUTRAL,
            inputs: BTreeMap::new(),
            rationale,
            caps_applied: false,
            weight: 0.0,
            status,
        }
    }

    /// Neutral result for invalid inputs.
    #[must_use]
    pub fn bad_input(key: FactorKey, bet_type: BetType, reason: impl Into<String>) -> Self {
        Self::neutral(key, bet_type, ResultStatus::BadInput(reason.into()))
    }

    #[must_use]
    pub fn with_input(mut self, name: &str, value: f64) -> Self {
        self.inputs.insert(name.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_caps(mut self, capped: bool) -> Self {
        self.caps_applied = capped;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Signed points scaled by weight: `(a − b) × weight / 100`.
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.points.signed() * self.weight / 100.0
    }

    /// Side this result argues for, if any.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        let signed = self.points.signed();
        if signed == 0.0 {
            None
        } else {
            Some(self.bet_type.side_for(signed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_roundtrip_serde() {
        let json = serde_json::to_string(&FactorKey::ThreePointEnvironment).unwrap();
        assert_eq!(json, "\"three_point_environment\"");
        assert_eq!(FactorKey::ThreePointEnvironment.to_string(), "three_point_environment");
    }

    #[test]
    fn test_computed_clamps_signal() {
        let r = FactorComputationResult::computed(
            FactorKey::PaceIndex,
            BetType::Total,
            1.7,
            2.0,
            "test",
        );
        assert_eq!(r.signal, 1.0);
        assert_eq!(r.points.a(), 2.0);
    }

    #[test]
    fn test_weighted_points_signed() {
        let r = FactorComputationResult::computed(
            FactorKey::NetRating,
            BetType::Spread,
            -0.5,
            3.0,
            "test",
        )
        .with_weight(50.0);
        assert_eq!(r.weighted_points(), -0.75);
        assert_eq!(r.side(), Some(Side::Home));
    }

    #[test]
    fn test_neutral_tags_reason() {
        let r = FactorComputationResult::bad_input(FactorKey::RestFatigue, BetType::Total, "nan");
        assert_eq!(r.signal, 0.0);
        assert!(r.points.is_neutral());
        assert!(r.rationale.starts_with("bad_input"));
        assert_eq!(r.side(), None);
    }
}
