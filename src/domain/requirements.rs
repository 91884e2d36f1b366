//! Which statistic groups an evaluation actually needs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::bet::{BetType, Sport};
use super::bundle::TeamStats;
use super::catalog;
use super::factor::{DataSource, FactorKey};

/// Union of the data sources of a set of enabled factors.
///
/// Pace and ratings are always included: the zero-factor baseline reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequirements {
    sources: BTreeSet<DataSource>,
}

impl Default for DataRequirements {
    fn default() -> Self {
        Self {
            sources: [DataSource::Pace, DataSource::Ratings].into_iter().collect(),
        }
    }
}

impl DataRequirements {
    /// Every source in every catalog.
    #[must_use]
    pub fn all() -> Self {
        let mut req = Self::default();
        for bet_type in [BetType::Total, BetType::Spread] {
            if let Ok(defs) = catalog::catalog(Sport::Nba, bet_type) {
                req.sources
                    .extend(defs.iter().flat_map(|d| d.sources.iter().copied()));
            }
        }
        req
    }

    /// Sources needed by `keys` in the (sport, bet type) catalog. Unknown
    /// keys contribute nothing.
    #[must_use]
    pub fn for_keys(
        sport: Sport,
        bet_type: BetType,
        keys: impl IntoIterator<Item = FactorKey>,
    ) -> Self {
        let mut req = Self::default();
        for key in keys {
            if let Some(def) = catalog::definition(sport, bet_type, key) {
                req.sources.extend(def.sources.iter().copied());
            }
        }
        req
    }

    /// Merge another set of requirements into this one.
    pub fn extend(&mut self, other: &Self) {
        self.sources.extend(other.sources.iter().copied());
    }

    #[must_use]
    pub fn needs(&self, source: DataSource) -> bool {
        self.sources.contains(&source)
    }

    pub fn sources(&self) -> impl Iterator<Item = DataSource> + '_ {
        self.sources.iter().copied()
    }

    /// Drop the optional groups (rest, recent form, home/road splits) that
    /// no enabled factor reads.
    #[must_use]
    pub fn restrict(&self, mut stats: TeamStats) -> TeamStats {
        if !self.needs(DataSource::Rest) {
            stats.rest_days = None;
        }
        if !self.needs(DataSource::RecentForm) {
            stats.recent_three_point_pct = None;
        }
        if !self.needs(DataSource::Splits) {
            stats.home_win_pct = None;
            stats.road_win_pct = None;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_sources_always_present() {
        let req = DataRequirements::for_keys(Sport::Nba, BetType::Total, []);
        assert!(req.needs(DataSource::Pace));
        assert!(req.needs(DataSource::Ratings));
        assert!(!req.needs(DataSource::Rest));
    }

    #[test]
    fn test_union_of_factor_sources() {
        let req = DataRequirements::for_keys(
            Sport::Nba,
            BetType::Spread,
            [FactorKey::HomeCourt, FactorKey::ShootingMomentum],
        );
        assert!(req.needs(DataSource::Splits));
        assert!(req.needs(DataSource::RecentForm));
        assert!(req.needs(DataSource::Shooting));
        assert!(!req.needs(DataSource::Possession));
    }

    #[test]
    fn test_restrict_strips_unneeded_groups() {
        let req = DataRequirements::for_keys(Sport::Nba, BetType::Total, [FactorKey::PaceIndex]);
        let stats = TeamStats {
            pace: Some(101.0),
            rest_days: Some(0),
            recent_three_point_pct: Some(0.40),
            home_win_pct: Some(0.7),
            ..TeamStats::default()
        };
        let out = req.restrict(stats);
        assert_eq!(out.pace, Some(101.0));
        assert_eq!(out.rest_days, None);
        assert_eq!(out.recent_three_point_pct, None);
        assert_eq!(out.home_win_pct, None);
    }

    #[test]
    fn test_all_covers_every_group() {
        let req = DataRequirements::all();
        assert!(req.needs(DataSource::Splits));
        assert!(req.needs(DataSource::Injuries));
    }
}
