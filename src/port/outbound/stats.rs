//! Team statistics port.

use async_trait::async_trait;

use crate::domain::{DataRequirements, LeagueAverages, TeamStats};
use crate::error::Result;

/// Provider of team and league statistics.
///
/// Implementations may leave any [`TeamStats`] field empty; factors fall back
/// to league averages for missing values.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch one team's statistics. `requirements` lists the groups the
    /// caller will read; providers may skip the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if the team is unknown or the source fails.
    async fn team(&self, team: &str, requirements: &DataRequirements) -> Result<TeamStats>;

    /// Fetch league-wide averages.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    async fn league(&self) -> Result<LeagueAverages>;
}
