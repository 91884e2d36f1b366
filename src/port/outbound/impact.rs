//! External availability-impact port.
//!
//! Research-style estimates (injury reports, lineup news) come from an
//! opaque asynchronous source. The port only promises a bounded
//! [`ImpactEstimate`]; the orchestrator enforces the deadline and clamps the
//! value.

use async_trait::async_trait;

use crate::domain::factors::injury::ImpactEstimate;
use crate::domain::{BetType, Matchup};
use crate::error::Result;

/// Source of availability-impact estimates.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `estimate` may be slow; callers wrap it in a timeout and treat a late
///   answer as neutral
/// - Return `impact` in `[-1, 1]` oriented to side `a` of the bet type
#[async_trait]
pub trait ImpactEstimator: Send + Sync {
    /// Return the estimator name for logging.
    fn name(&self) -> &'static str;

    /// Estimate the availability impact for one matchup and bet type.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing source fails.
    async fn estimate(&self, matchup: &Matchup, bet_type: BetType) -> Result<ImpactEstimate>;
}
