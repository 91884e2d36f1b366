//! Impact estimators that need no external service.
//!
//! [`TableImpactEstimator`] serves pre-researched estimates loaded from a
//! JSON file, keyed by matchup and factor group. Matchups missing from the
//! table get a neutral estimate.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::factors::injury::ImpactEstimate;
use crate::domain::{BetType, Matchup};
use crate::error::Result;
use crate::port::outbound::impact::ImpactEstimator;

/// One row of the estimate table.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactEntry {
    pub away: String,
    pub home: String,
    /// `total` or `spread`.
    pub bet_type: BetType,
    #[serde(flatten)]
    pub estimate: ImpactEstimate,
}

/// Estimator backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct TableImpactEstimator {
    entries: HashMap<(String, String, BetType), ImpactEstimate>,
}

impl TableImpactEstimator {
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = ImpactEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| ((e.away, e.home, e.bet_type.factor_group()), e.estimate))
            .collect();
        Self { entries }
    }

    /// Load a JSON array of [`ImpactEntry`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<ImpactEntry> = serde_json::from_str(&content)?;
        Ok(Self::new(entries))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ImpactEstimator for TableImpactEstimator {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn estimate(&self, matchup: &Matchup, bet_type: BetType) -> Result<ImpactEstimate> {
        let key = (
            matchup.away.clone(),
            matchup.home.clone(),
            bet_type.factor_group(),
        );
        Ok(self
            .entries
            .get(&key)
            .cloned()
            .unwrap_or_else(ImpactEstimate::neutral))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_and_neutral_default() {
        let json = r#"[
            {"away": "LAL", "home": "BOS", "bet_type": "spread", "impact": -0.4, "summary": "LAL starter out"}
        ]"#;
        let entries: Vec<ImpactEntry> = serde_json::from_str(json).unwrap();
        let estimator = TableImpactEstimator::new(entries);
        assert_eq!(estimator.len(), 1);

        let matchup = Matchup::new("LAL", "BOS");
        let hit = estimator.estimate(&matchup, BetType::Moneyline).await.unwrap();
        assert_eq!(hit.impact, -0.4);

        let miss = estimator.estimate(&matchup, BetType::Total).await.unwrap();
        assert_eq!(miss, ImpactEstimate::neutral());
    }
}
