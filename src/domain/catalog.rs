//! Read-only factor catalog.
//!
//! Catalogs are scoped by (sport, bet type). Default weights of the active,
//! budget-eligible entries in each catalog sum to [`DEFAULT_BUDGET`]; market
//! edge entries always carry [`MARKET_EDGE_WEIGHT`].

use std::collections::HashSet;

use super::bet::{BetType, Sport};
use super::error::DomainError;
use super::factor::{DataSource, FactorDefinition, FactorKey, FactorScope, FactorStatus};

/// Default weight budget shared by enabled, budget-eligible factors.
pub const DEFAULT_BUDGET: f64 = 250.0;

/// Fixed weight of market-edge factors.
pub const MARKET_EDGE_WEIGHT: f64 = 100.0;

#[allow(clippy::too_many_arguments)]
const fn def(
    key: FactorKey,
    name: &'static str,
    description: &'static str,
    bet_type: BetType,
    scope: FactorScope,
    default_weight: f64,
    max_points: f64,
    sources: &'static [DataSource],
    status: FactorStatus,
) -> FactorDefinition {
    FactorDefinition {
        key,
        name,
        description,
        sport: Sport::Nba,
        bet_type,
        scope,
        default_weight,
        max_points,
        sources,
        status,
    }
}

static NBA_TOTALS: [FactorDefinition; 10] = [
    def(
        FactorKey::PaceIndex,
        "Pace Index",
        "Expected possessions vs league pace",
        BetType::Total,
        FactorScope::Matchup,
        40.0,
        2.0,
        &[DataSource::Pace],
        FactorStatus::Active,
    ),
    def(
        FactorKey::OffensiveForm,
        "Offensive Form",
        "Combined offensive rating vs league",
        BetType::Total,
        FactorScope::Matchup,
        40.0,
        2.0,
        &[DataSource::Ratings],
        FactorStatus::Active,
    ),
    def(
        FactorKey::DefensiveErosion,
        "Defensive Erosion",
        "Combined defensive rating vs league",
        BetType::Total,
        FactorScope::Matchup,
        40.0,
        2.0,
        &[DataSource::Ratings],
        FactorStatus::Active,
    ),
    def(
        FactorKey::ThreePointEnvironment,
        "3PT Environment",
        "Three-point volume and accuracy vs league",
        BetType::Total,
        FactorScope::Matchup,
        30.0,
        1.0,
        &[DataSource::Shooting],
        FactorStatus::Active,
    ),
    def(
        FactorKey::FreeThrowEnvironment,
        "Whistle Environment",
        "Free-throw rate vs league",
        BetType::Total,
        FactorScope::Matchup,
        20.0,
        1.0,
        &[DataSource::FreeThrows],
        FactorStatus::Active,
    ),
    def(
        FactorKey::RestFatigue,
        "Rest & Fatigue",
        "Combined rest of both teams",
        BetType::Total,
        FactorScope::Matchup,
        30.0,
        1.0,
        &[DataSource::Rest],
        FactorStatus::Active,
    ),
    def(
        FactorKey::ShootingMomentum,
        "Shooting Regression",
        "Recent three-point luck expected to regress",
        BetType::Total,
        FactorScope::Matchup,
        25.0,
        1.0,
        &[DataSource::RecentForm, DataSource::Shooting],
        FactorStatus::Active,
    ),
    def(
        FactorKey::InjuryAvailability,
        "Injury Impact",
        "Externally researched availability impact",
        BetType::Total,
        FactorScope::Team,
        25.0,
        2.0,
        &[DataSource::Injuries],
        FactorStatus::Active,
    ),
    def(
        FactorKey::RefereeTendency,
        "Referee Tendency",
        "Crew foul-rate tendencies",
        BetType::Total,
        FactorScope::Global,
        0.0,
        1.0,
        &[DataSource::FreeThrows],
        FactorStatus::Planned,
    ),
    def(
        FactorKey::TotalEdge,
        "Edge vs Market (Total)",
        "Predicted total vs market total",
        BetType::Total,
        FactorScope::Matchup,
        MARKET_EDGE_WEIGHT,
        5.0,
        &[DataSource::Market],
        FactorStatus::Active,
    ),
];

static NBA_SPREAD: [FactorDefinition; 9] = [
    def(
        FactorKey::NetRating,
        "Net Rating Differential",
        "Away net rating minus home net rating",
        BetType::Spread,
        FactorScope::Matchup,
        60.0,
        3.0,
        &[DataSource::Ratings],
        FactorStatus::Active,
    ),
    def(
        FactorKey::TurnoverDifferential,
        "Turnover Differential",
        "Ball security gap between the teams",
        BetType::Spread,
        FactorScope::Matchup,
        30.0,
        1.5,
        &[DataSource::Possession],
        FactorStatus::Active,
    ),
    def(
        FactorKey::ReboundingDifferential,
        "Rebounding Differential",
        "Total rebound share gap",
        BetType::Spread,
        FactorScope::Matchup,
        30.0,
        1.5,
        &[DataSource::Possession],
        FactorStatus::Active,
    ),
    def(
        FactorKey::HomeCourt,
        "Home Court Strength",
        "Home and road splits vs league home edge",
        BetType::Spread,
        FactorScope::Team,
        35.0,
        1.5,
        &[DataSource::Splits],
        FactorStatus::Active,
    ),
    def(
        FactorKey::FourFactors,
        "Four Factors",
        "Oliver-weighted shooting, turnovers, boards, free throws",
        BetType::Spread,
        FactorScope::Matchup,
        45.0,
        2.0,
        &[DataSource::Shooting, DataSource::Possession, DataSource::FreeThrows],
        FactorStatus::Active,
    ),
    def(
        FactorKey::RestFatigue,
        "Rest Advantage",
        "Rest gap between the teams",
        BetType::Spread,
        FactorScope::Matchup,
        25.0,
        1.0,
        &[DataSource::Rest],
        FactorStatus::Active,
    ),
    def(
        FactorKey::ShootingMomentum,
        "Shooting Regression",
        "Relative three-point luck expected to regress",
        BetType::Spread,
        FactorScope::Matchup,
        10.0,
        1.0,
        &[DataSource::RecentForm, DataSource::Shooting],
        FactorStatus::Active,
    ),
    def(
        FactorKey::InjuryAvailability,
        "Injury Impact",
        "Externally researched availability impact",
        BetType::Spread,
        FactorScope::Team,
        15.0,
        2.0,
        &[DataSource::Injuries],
        FactorStatus::Active,
    ),
    def(
        FactorKey::SpreadEdge,
        "Edge vs Market (Spread)",
        "Predicted margin vs market spread",
        BetType::Spread,
        FactorScope::Matchup,
        MARKET_EDGE_WEIGHT,
        5.0,
        &[DataSource::Market],
        FactorStatus::Active,
    ),
];

/// Catalog for a (sport, bet type) pair.
///
/// Moneyline has no catalog of its own; it borrows the spread group.
///
/// # Errors
///
/// Returns [`DomainError::NoCatalog`] for moneyline.
pub fn catalog(sport: Sport, bet_type: BetType) -> Result<&'static [FactorDefinition], DomainError> {
    match (sport, bet_type) {
        (Sport::Nba, BetType::Total) => Ok(&NBA_TOTALS),
        (Sport::Nba, BetType::Spread) => Ok(&NBA_SPREAD),
        (Sport::Nba, BetType::Moneyline) => Err(DomainError::NoCatalog { bet_type }),
    }
}

/// Look up a definition by scoped key.
#[must_use]
pub fn definition(sport: Sport, bet_type: BetType, key: FactorKey) -> Option<&'static FactorDefinition> {
    catalog(sport, bet_type.factor_group())
        .ok()?
        .iter()
        .find(|d| d.key == key)
}

/// The market-edge definition of a catalog, if any.
#[must_use]
pub fn market_edge(sport: Sport, bet_type: BetType) -> Option<&'static FactorDefinition> {
    catalog(sport, bet_type.factor_group())
        .ok()?
        .iter()
        .find(|d| d.is_market_edge())
}

/// Check catalog rules.
///
/// # Errors
///
/// Returns [`DomainError::MalformedCatalog`] on duplicate keys, a bet type
/// mismatch, non-positive max points, a market-edge entry without weight 100,
/// or active default weights that do not sum to [`DEFAULT_BUDGET`].
pub fn validate(defs: &[FactorDefinition], bet_type: BetType) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    let mut budget_sum = 0.0;

    for d in defs {
        let malformed = |reason: &str| DomainError::MalformedCatalog {
            key: d.key,
            reason: reason.to_string(),
        };
        if !seen.insert(d.key) {
            return Err(malformed("duplicate key"));
        }
        if d.bet_type != bet_type {
            return Err(malformed("bet type does not match catalog"));
        }
        if !(d.max_points > 0.0) {
            return Err(malformed("max points must be positive"));
        }
        if d.is_market_edge() {
            if d.default_weight != MARKET_EDGE_WEIGHT {
                return Err(malformed("market edge weight must be 100"));
            }
        } else if d.is_active() {
            budget_sum += d.default_weight;
        }
    }

    if (budget_sum - DEFAULT_BUDGET).abs() > 0.01 {
        let key = defs
            .first()
            .map(|d| d.key)
            .unwrap_or(FactorKey::PaceIndex);
        return Err(DomainError::MalformedCatalog {
            key,
            reason: format!("default weights sum to {budget_sum}, expected {DEFAULT_BUDGET}"),
        });
    }
    Ok(())
}
