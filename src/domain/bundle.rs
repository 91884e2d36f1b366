//! Raw statistics snapshot shared by every factor in one evaluation.
//!
//! Team fields are optional: a missing field is filled from the documented
//! league-average fallback when the team is resolved, so a factor never fails
//! because one statistic was not fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub away: String,
    pub home: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Matchup {
    #[must_use]
    pub fn new(away: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            away: away.into(),
            home: home.into(),
            date: None,
        }
    }

    /// Same game seen from the other bench.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            away: self.home.clone(),
            home: self.away.clone(),
            date: self.date,
        }
    }
}

impl std::fmt::Display for Matchup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.away, self.home)
    }
}

/// League baselines. Every field has a concrete default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueAverages {
    pub pace: f64,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub three_point_attempt_rate: f64,
    pub three_point_pct: f64,
    pub free_throw_rate: f64,
    pub effective_fg_pct: f64,
    pub turnover_pct: f64,
    pub offensive_rebound_pct: f64,
    pub rebound_share: f64,
    pub home_win_pct: f64,
    pub home_court_points: f64,
    pub rest_days: u32,
}

impl Default for LeagueAverages {
    fn default() -> Self {
        Self {
            pace: 99.5,
            offensive_rating: 114.5,
            defensive_rating: 114.5,
            three_point_attempt_rate: 0.39,
            three_point_pct: 0.365,
            free_throw_rate: 0.25,
            effective_fg_pct: 0.54,
            turnover_pct: 0.135,
            offensive_rebound_pct: 0.25,
            rebound_share: 0.50,
            home_win_pct: 0.55,
            home_court_points: 2.5,
            rest_days: 1,
        }
    }
}

/// Season and recent statistics for one team. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStats {
    pub pace: Option<f64>,
    pub offensive_rating: Option<f64>,
    pub defensive_rating: Option<f64>,
    pub three_point_attempt_rate: Option<f64>,
    pub three_point_pct: Option<f64>,
    /// Three-point percentage over the recent window.
    pub recent_three_point_pct: Option<f64>,
    pub free_throw_rate: Option<f64>,
    pub effective_fg_pct: Option<f64>,
    pub turnover_pct: Option<f64>,
    pub offensive_rebound_pct: Option<f64>,
    pub rebound_share: Option<f64>,
    pub home_win_pct: Option<f64>,
    pub road_win_pct: Option<f64>,
    pub rest_days: Option<u32>,
}

/// A team with every field filled, tracking which values were fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTeam {
    pub pace: f64,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub three_point_attempt_rate: f64,
    pub three_point_pct: f64,
    pub recent_three_point_pct: f64,
    pub free_throw_rate: f64,
    pub effective_fg_pct: f64,
    pub turnover_pct: f64,
    pub offensive_rebound_pct: f64,
    pub rebound_share: f64,
    pub home_win_pct: f64,
    pub road_win_pct: f64,
    pub rest_days: u32,
    pub fallbacks: Vec<&'static str>,
}

impl ResolvedTeam {
    #[must_use]
    pub fn net_rating(&self) -> f64 {
        self.offensive_rating - self.defensive_rating
    }

    /// True when `field` came from the league fallback.
    #[must_use]
    pub fn is_fallback(&self, field: &str) -> bool {
        self.fallbacks.contains(&field)
    }
}

impl TeamStats {
    /// Fill missing fields from league averages.
    ///
    /// Recent three-point percentage falls back to the team's season figure
    /// before the league figure; road win percentage falls back to the
    /// league's road win rate.
    #[must_use]
    pub fn resolve(&self, league: &LeagueAverages) -> ResolvedTeam {
        let mut fallbacks = Vec::new();
        let mut pick = |value: Option<f64>, name: &'static str, default: f64| match value {
            Some(v) => v,
            None => {
                fallbacks.push(name);
                default
            }
        };

        let pace = pick(self.pace, "pace", league.pace);
        let offensive_rating = pick(
            self.offensive_rating,
            "offensive_rating",
            league.offensive_rating,
        );
        let defensive_rating = pick(
            self.defensive_rating,
            "defensive_rating",
            league.defensive_rating,
        );
        let three_point_attempt_rate = pick(
            self.three_point_attempt_rate,
            "three_point_attempt_rate",
            league.three_point_attempt_rate,
        );
        let three_point_pct = pick(
            self.three_point_pct,
            "three_point_pct",
            league.three_point_pct,
        );
        let recent_three_point_pct = pick(
            self.recent_three_point_pct,
            "recent_three_point_pct",
            three_point_pct,
        );
        let free_throw_rate = pick(
            self.free_throw_rate,
            "free_throw_rate",
            league.free_throw_rate,
        );
        let effective_fg_pct = pick(
            self.effective_fg_pct,
            "effective_fg_pct",
            league.effective_fg_pct,
        );
        let turnover_pct = pick(self.turnover_pct, "turnover_pct", league.turnover_pct);
        let offensive_rebound_pct = pick(
            self.offensive_rebound_pct,
            "offensive_rebound_pct",
            league.offensive_rebound_pct,
        );
        let rebound_share = pick(self.rebound_share, "rebound_share", league.rebound_share);
        let home_win_pct = pick(self.home_win_pct, "home_win_pct", league.home_win_pct);
        let road_win_pct = pick(
            self.road_win_pct,
            "road_win_pct",
            1.0 - league.home_win_pct,
        );
        let rest_days = match self.rest_days {
            Some(days) => days,
            None => {
                fallbacks.push("rest_days");
                league.rest_days
            }
        };

        ResolvedTeam {
            pace,
            offensive_rating,
            defensive_rating,
            three_point_attempt_rate,
            three_point_pct,
            recent_three_point_pct,
            free_throw_rate,
            effective_fg_pct,
            turnover_pct,
            offensive_rebound_pct,
            rebound_share,
            home_win_pct,
            road_win_pct,
            rest_days,
            fallbacks,
        }
    }
}

/// Everything factors need for one matchup. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBundle {
    pub matchup: Matchup,
    #[serde(default)]
    pub away: TeamStats,
    #[serde(default)]
    pub home: TeamStats,
    #[serde(default)]
    pub league: LeagueAverages,
}

impl DataBundle {
    #[must_use]
    pub fn new(matchup: Matchup, away: TeamStats, home: TeamStats, league: LeagueAverages) -> Self {
        Self {
            matchup,
            away,
            home,
            league,
        }
    }

    /// A bundle with no team data: every factor sees league averages.
    #[must_use]
    pub fn league_only(matchup: Matchup, league: LeagueAverages) -> Self {
        Self::new(matchup, TeamStats::default(), TeamStats::default(), league)
    }

    #[must_use]
    pub fn away(&self) -> ResolvedTeam {
        self.away.resolve(&self.league)
    }

    #[must_use]
    pub fn home(&self) -> ResolvedTeam {
        self.home.resolve(&self.league)
    }

    /// Swap home and away teams.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            matchup: self.matchup.swapped(),
            away: self.home.clone(),
            home: self.away.clone(),
            league: self.league.clone(),
        }
    }
}

/// A data bundle that may not exist for this evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Bundle {
    Available(DataBundle),
    Unavailable,
}

impl Bundle {
    #[must_use]
    pub const fn as_available(&self) -> Option<&DataBundle> {
        match self {
            Self::Available(bundle) => Some(bundle),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl From<Option<DataBundle>> for Bundle {
    fn from(bundle: Option<DataBundle>) -> Self {
        bundle.map_or(Self::Unavailable, Self::Available)
    }
}
