//! Mock impact estimators.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::factors::injury::ImpactEstimate;
use crate::domain::{BetType, Matchup};
use crate::error::{Error, Result};
use crate::port::outbound::impact::ImpactEstimator;

/// Returns the same impact immediately.
#[derive(Debug, Clone, Copy)]
pub struct FixedImpact(pub f64);

#[async_trait]
impl ImpactEstimator for FixedImpact {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn estimate(&self, _matchup: &Matchup, _bet_type: BetType) -> Result<ImpactEstimate> {
        Ok(ImpactEstimate::new(self.0, "fixed estimate"))
    }
}

/// Answers only after `delay`.
#[derive(Debug, Clone, Copy)]
pub struct SlowImpact {
    pub delay: Duration,
    pub impact: f64,
}

impl SlowImpact {
    pub const fn new(delay: Duration, impact: f64) -> Self {
        Self { delay, impact }
    }
}

#[async_trait]
impl ImpactEstimator for SlowImpact {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn estimate(&self, _matchup: &Matchup, _bet_type: BetType) -> Result<ImpactEstimate> {
        tokio::time::sleep(self.delay).await;
        Ok(ImpactEstimate::new(self.impact, "late estimate"))
    }
}

/// Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingImpact;

#[async_trait]
impl ImpactEstimator for FailingImpact {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn estimate(&self, _matchup: &Matchup, _bet_type: BetType) -> Result<ImpactEstimate> {
        Err(Error::Impact("research service unavailable".into()))
    }
}

/// Panics inside the estimate future.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingImpact;

#[async_trait]
impl ImpactEstimator for PanickingImpact {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn estimate(&self, _matchup: &Matchup, _bet_type: BetType) -> Result<ImpactEstimate> {
        panic!("research client exploded")
    }
}
