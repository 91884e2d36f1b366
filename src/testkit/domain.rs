//! Builders for domain values used across tests.
//!
//! Concise factory functions for matchups, team statistics, bundles and
//! profiles so tests focus on assertions rather than construction
//! boilerplate.

use crate::domain::{
    AmericanOdds, BetType, Bundle, CapperProfile, DataBundle, LeagueAverages, MarketOdds, Matchup,
    Sport, TeamStats,
};

/// The `AWY @ HOM` matchup.
pub fn matchup() -> Matchup {
    Matchup::new("AWY", "HOM")
}

/// Team with the given offensive rating, defensive rating and pace.
pub fn team(offensive_rating: f64, defensive_rating: f64, pace: f64) -> TeamStats {
    TeamStats {
        pace: Some(pace),
        offensive_rating: Some(offensive_rating),
        defensive_rating: Some(defensive_rating),
        ..TeamStats::default()
    }
}

/// Bundle for `AWY @ HOM` with league-default averages.
pub fn bundle(away: TeamStats, home: TeamStats) -> DataBundle {
    DataBundle::new(matchup(), away, home, LeagueAverages::default())
}

/// Bundle in which both teams are league average.
pub fn league_bundle() -> DataBundle {
    DataBundle::league_only(matchup(), LeagueAverages::default())
}

/// Bundle in which the home team is clearly the better side.
///
/// Baseline away margin is roughly -13.
pub fn home_favourite_bundle() -> DataBundle {
    bundle(team(112.0, 116.0, 99.5), team(118.0, 111.0, 99.5))
}

/// Bundle in which both teams play fast and score efficiently.
pub fn shootout_bundle() -> DataBundle {
    let mut away = team(120.0, 118.0, 104.0);
    away.three_point_attempt_rate = Some(0.45);
    let mut home = team(119.0, 119.0, 103.5);
    home.three_point_attempt_rate = Some(0.44);
    bundle(away, home)
}

/// Wrap a data bundle as available.
pub fn available(bundle: DataBundle) -> Bundle {
    Bundle::Available(bundle)
}

/// Market with -110 prices on spread and total.
pub fn market(away_spread: f64, total: f64) -> MarketOdds {
    MarketOdds::new(away_spread, total)
}

/// Market with moneylines.
pub fn market_with_moneylines(away_spread: f64, total: f64, away_ml: f64, home_ml: f64) -> MarketOdds {
    MarketOdds::new(away_spread, total).with_moneylines(odds(away_ml), odds(home_ml))
}

/// American odds. Panics on an invalid price.
pub fn odds(value: f64) -> AmericanOdds {
    AmericanOdds::try_new(value).expect("valid American odds")
}

/// Catalog-default NBA profile for a bet type.
pub fn profile(bet_type: BetType) -> CapperProfile {
    CapperProfile::default_for("test", Sport::Nba, bet_type).expect("catalog exists")
}

/// Profile with only `keys` enabled, each at the same weight.
pub fn profile_with(bet_type: BetType, keys: &[crate::domain::FactorKey]) -> CapperProfile {
    let mut profile = profile(bet_type);
    for config in &mut profile.factors {
        if config.key.is_market_edge() {
            continue;
        }
        config.enabled = keys.contains(&config.key);
        config.weight = if config.enabled { 50.0 } else { 0.0 };
    }
    profile
}
