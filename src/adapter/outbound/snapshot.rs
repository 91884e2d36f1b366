//! Stats provider backed by a JSON snapshot.
//!
//! ```json
//! {
//!   "league": { "pace": 99.5, "offensive_rating": 114.5 },
//!   "teams": { "BOS": { "pace": 98.1, "offensive_rating": 121.0 } }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DataRequirements, LeagueAverages, TeamStats};
use crate::error::{Error, Result};
use crate::port::outbound::stats::StatsProvider;

/// Serialized snapshot of league and team statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub league: LeagueAverages,
    #[serde(default)]
    pub teams: HashMap<String, TeamStats>,
}

/// Serves statistics from a [`StatsSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStatsProvider {
    snapshot: StatsSnapshot,
}

impl SnapshotStatsProvider {
    #[must_use]
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl StatsProvider for SnapshotStatsProvider {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn team(&self, team: &str, _requirements: &DataRequirements) -> Result<TeamStats> {
        self.snapshot
            .teams
            .get(team)
            .cloned()
            .ok_or_else(|| Error::Stats(format!("team '{team}' not in snapshot")))
    }

    async fn league(&self) -> Result<LeagueAverages> {
        Ok(self.snapshot.league.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_team_is_error() {
        let provider = SnapshotStatsProvider::default();
        let result = provider.team("XYZ", &DataRequirements::default()).await;
        assert!(matches!(result, Err(Error::Stats(_))));
    }

    #[tokio::test]
    async fn test_partial_league_uses_defaults() {
        let json = r#"{"league": {"pace": 101.0}, "teams": {"BOS": {"pace": 98.0}}}"#;
        let snapshot: StatsSnapshot = serde_json::from_str(json).unwrap();
        let provider = SnapshotStatsProvider::new(snapshot);
        let league = provider.league().await.unwrap();
        assert_eq!(league.pace, 101.0);
        assert_eq!(league.offensive_rating, LeagueAverages::default().offensive_rating);
        let bos = provider.team("BOS", &DataRequirements::default()).await.unwrap();
        assert_eq!(bos.pace, Some(98.0));
    }
}
