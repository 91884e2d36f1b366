//! Factor orchestration.
//!
//! Runs the enabled factors of one profile against a shared bundle. Every
//! factor is isolated: an error or a panic in one factor yields a neutral
//! `Failed` result for that factor only and is reported to the
//! [`DiagnosticSink`]. The external impact factor runs last under a deadline.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::scoring;
use crate::domain::catalog;
use crate::domain::factors::injury;
use crate::domain::{
    BetType, Bundle, CapperProfile, DataBundle, Factor, FactorComputationResult, FactorConfig,
    FactorKey, FactorRegistry, Matchup, ResultStatus, ScorePrediction, SidePoints,
};
use crate::port::outbound::diagnostics::{Diagnostic, DiagnosticSink};
use crate::port::outbound::impact::ImpactEstimator;

/// Default deadline for the external impact estimate.
pub const DEFAULT_IMPACT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Results of one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorReport {
    pub bet_type: BetType,
    /// One result per enabled, non-edge factor, in profile order.
    pub results: Vec<FactorComputationResult>,
    /// Zero-factor score prediction for the same bundle.
    pub baseline: ScorePrediction,
}

impl FactorReport {
    /// Σ signed points × weight / 100.
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.results
            .iter()
            .map(FactorComputationResult::weighted_points)
            .sum()
    }

    #[must_use]
    pub fn result(&self, key: FactorKey) -> Option<&FactorComputationResult> {
        self.results.iter().find(|r| r.key == key)
    }

    /// Results that carry a real signal.
    pub fn computed(&self) -> impl Iterator<Item = &FactorComputationResult> {
        self.results.iter().filter(|r| r.status.is_computed())
    }
}

/// Runs a profile's factors for one bet-type group.
pub struct FactorOrchestrator {
    bet_type: BetType,
    registry: Arc<FactorRegistry>,
    sink: Arc<dyn DiagnosticSink>,
    impact_timeout: Duration,
}

impl FactorOrchestrator {
    #[must_use]
    pub fn new(
        bet_type: BetType,
        registry: Arc<FactorRegistry>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            bet_type: bet_type.factor_group(),
            registry,
            sink,
            impact_timeout: DEFAULT_IMPACT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_impact_timeout(mut self, timeout: Duration) -> Self {
        self.impact_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Evaluate every enabled factor of `profile`.
    ///
    /// Market-edge keys are skipped; the reconciler produces them. With no
    /// enabled factors the result list is empty and only the baseline is
    /// returned.
    pub async fn evaluate(
        &self,
        profile: &CapperProfile,
        bundle: &Bundle,
        impact: Option<&dyn ImpactEstimator>,
        matchup: &Matchup,
    ) -> FactorReport {
        let configs: Vec<&FactorConfig> = profile
            .factors
            .iter()
            .filter(|c| c.enabled && !c.key.is_market_edge())
            .collect();

        let mut slots: Vec<Option<FactorComputationResult>> = Vec::with_capacity(configs.len());
        let mut deferred = Vec::new();

        for (index, config) in configs.iter().enumerate() {
            let def = catalog::definition(profile.sport, self.bet_type, config.key);
            let result = match (bundle, def) {
                (_, None) => Some(self.unregistered(config.key)),
                (_, Some(def)) if !def.is_active() => Some(FactorComputationResult::neutral(
                    config.key,
                    self.bet_type,
                    ResultStatus::NotImplemented,
                )),
                (Bundle::Unavailable, Some(_)) => Some(FactorComputationResult::neutral(
                    config.key,
                    self.bet_type,
                    ResultStatus::Unavailable,
                )),
                (Bundle::Available(_), Some(def)) if def.is_external() => {
                    deferred.push(index);
                    None
                }
                (Bundle::Available(data), Some(_)) => {
                    Some(match self.registry.get(self.bet_type, config.key) {
                        Some(factor) => self.run_isolated(factor, data),
                        None => self.unregistered(config.key),
                    })
                }
            };
            slots.push(result);
        }

        for index in deferred {
            let key = configs[index].key;
            slots[index] = Some(self.run_external(key, impact, matchup).await);
        }

        let results = slots
            .into_iter()
            .zip(configs.iter())
            .filter_map(|(slot, config)| slot.map(|r| apply_config(r, config)))
            .collect::<Vec<_>>();

        let report = FactorReport {
            bet_type: self.bet_type,
            results,
            baseline: scoring::for_bundle(bundle),
        };
        debug!(
            bet_type = %self.bet_type,
            factors = report.results.len(),
            weighted_points = report.weighted_points(),
            "Factors evaluated"
        );
        report
    }

    fn run_isolated(&self, factor: &dyn Factor, bundle: &DataBundle) -> FactorComputationResult {
        let key = factor.key();
        match catch_unwind(AssertUnwindSafe(|| factor.compute(bundle))) {
            Ok(Ok(result)) => {
                if let ResultStatus::BadInput(reason) = &result.status {
                    self.sink.record(Diagnostic::BadInput {
                        key,
                        bet_type: self.bet_type,
                        reason: reason.clone(),
                    });
                }
                result
            }
            Ok(Err(error)) => {
                self.sink.record(Diagnostic::FactorFailed {
                    key,
                    bet_type: self.bet_type,
                    error: error.to_string(),
                });
                FactorComputationResult::neutral(
                    key,
                    self.bet_type,
                    ResultStatus::Failed(error.to_string()),
                )
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.sink.record(Diagnostic::FactorPanicked {
                    key,
                    bet_type: self.bet_type,
                    message: message.clone(),
                });
                FactorComputationResult::neutral(
                    key,
                    self.bet_type,
                    ResultStatus::Failed(format!("panicked: {message}")),
                )
            }
        }
    }

    async fn run_external(
        &self,
        key: FactorKey,
        impact: Option<&dyn ImpactEstimator>,
        matchup: &Matchup,
    ) -> FactorComputationResult {
        let Some(estimator) = impact else {
            return FactorComputationResult::neutral(key, self.bet_type, ResultStatus::Unavailable);
        };
        let estimate = AssertUnwindSafe(estimator.estimate(matchup, self.bet_type)).catch_unwind();
        match tokio::time::timeout(self.impact_timeout, estimate).await {
            Ok(Ok(Ok(estimate))) => injury::compute(&estimate, self.bet_type),
            Ok(Ok(Err(error))) => {
                self.sink.record(Diagnostic::ImpactFailed {
                    bet_type: self.bet_type,
                    error: error.to_string(),
                });
                FactorComputationResult::neutral(
                    key,
                    self.bet_type,
                    ResultStatus::Failed(error.to_string()),
                )
            }
            Ok(Err(payload)) => {
                let message = panic_message(payload.as_ref());
                self.sink.record(Diagnostic::FactorPanicked {
                    key,
                    bet_type: self.bet_type,
                    message: message.clone(),
                });
                FactorComputationResult::neutral(
                    key,
                    self.bet_type,
                    ResultStatus::Failed(format!("panicked: {message}")),
                )
            }
            Err(_) => {
                self.sink.record(Diagnostic::ImpactTimedOut {
                    bet_type: self.bet_type,
                    timeout_ms: u64::try_from(self.impact_timeout.as_millis()).unwrap_or(u64::MAX),
                });
                FactorComputationResult::neutral(key, self.bet_type, ResultStatus::TimedOut)
            }
        }
    }

    fn unregistered(&self, key: FactorKey) -> FactorComputationResult {
        self.sink.record(Diagnostic::FactorUnregistered {
            key,
            bet_type: self.bet_type,
        });
        FactorComputationResult::neutral(
            key,
            self.bet_type,
            ResultStatus::Failed("no factor registered".to_string()),
        )
    }
}

/// Attach the profile's weight and point ceiling.
fn apply_config(mut result: FactorComputationResult, config: &FactorConfig) -> FactorComputationResult {
    result.weight = config.weight;
    if result.status.is_computed() && config.max_points.is_finite() && config.max_points > 0.0 {
        result.points = SidePoints::from_signal(result.signal, config.max_points);
    }
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeagueAverages, Sport};
    use crate::port::outbound::diagnostics::NullSink;

    fn orchestrator(bet_type: BetType) -> FactorOrchestrator {
        FactorOrchestrator::new(
            bet_type,
            Arc::new(FactorRegistry::standard()),
            Arc::new(NullSink),
        )
    }

    fn league_bundle() -> Bundle {
        Bundle::Available(DataBundle::league_only(
            Matchup::new("AWY", "HOM"),
            LeagueAverages::default(),
        ))
    }

    #[tokio::test]
    async fn test_league_average_bundle_is_neutral() {
        let profile = CapperProfile::default_for("c", Sport::Nba, BetType::Total).unwrap();
        let report = orchestrator(BetType::Total)
            .evaluate(&profile, &league_bundle(), None, &Matchup::new("AWY", "HOM"))
            .await;
        assert_eq!(report.weighted_points(), 0.0);
        assert!(report.result(FactorKey::TotalEdge).is_none());
        assert!(report.result(FactorKey::RefereeTendency).is_none());
    }

    #[tokio::test]
    async fn test_disabled_factor_excluded() {
        let mut profile = CapperProfile::default_for("c", Sport::Nba, BetType::Spread).unwrap();
        profile.set_enabled(FactorKey::HomeCourt, false);
        let report = orchestrator(BetType::Spread)
            .evaluate(&profile, &league_bundle(), None, &Matchup::new("AWY", "HOM"))
            .await;
        assert!(report.result(FactorKey::HomeCourt).is_none());
        assert!(report.result(FactorKey::NetRating).is_some());
    }

    #[tokio::test]
    async fn test_planned_factor_not_implemented() {
        let mut profile = CapperProfile::default_for("c", Sport::Nba, BetType::Total).unwrap();
        for config in &mut profile.factors {
            if config.key == FactorKey::RefereeTendency {
                config.enabled = true;
                config.weight = 10.0;
            }
        }
        let report = orchestrator(BetType::Total)
            .evaluate(&profile, &league_bundle(), None, &Matchup::new("AWY", "HOM"))
            .await;
        let r = report.result(FactorKey::RefereeTendency).unwrap();
        assert_eq!(r.status, ResultStatus::NotImplemented);
        assert!(r.points.is_neutral());
    }

    #[tokio::test]
    async fn test_unavailable_bundle_neutralizes_everything() {
        let profile = CapperProfile::default_for("c", Sport::Nba, BetType::Spread).unwrap();
        let report = orchestrator(BetType::Spread)
            .evaluate(&profile, &Bundle::Unavailable, None, &Matchup::new("AWY", "HOM"))
            .await;
        assert!(!report.results.is_empty());
        assert!(report
            .results
            .iter()
            .all(|r| r.status == ResultStatus::Unavailable));
        assert_eq!(
            report.baseline,
            scoring::league_baseline(&LeagueAverages::default())
        );
    }

    #[tokio::test]
    async fn test_unavailable_bundle_skips_estimator() {
        let profile = CapperProfile::default_for("c", Sport::Nba, BetType::Total).unwrap();
        let impact = crate::testkit::impact::FixedImpact(0.8);
        let report = orchestrator(BetType::Total)
            .evaluate(
                &profile,
                &Bundle::Unavailable,
                Some(&impact as &dyn ImpactEstimator),
                &Matchup::new("AWY", "HOM"),
            )
            .await;
        let r = report.result(FactorKey::InjuryAvailability).unwrap();
        assert_eq!(r.status, ResultStatus::Unavailable);
        assert!(r.points.is_neutral());
    }

    #[tokio::test]
    async fn test_missing_estimator_is_unavailable() {
        let profile = CapperProfile::default_for("c", Sport::Nba, BetType::Total).unwrap();
        let report = orchestrator(BetType::Total)
            .evaluate(&profile, &league_bundle(), None, &Matchup::new("AWY", "HOM"))
            .await;
        let r = report.result(FactorKey::InjuryAvailability).unwrap();
        assert_eq!(r.status, ResultStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_weight_and_max_points_attached() {
        let mut profile = CapperProfile::default_for("c", Sport::Nba, BetType::Total).unwrap();
        for config in &mut profile.factors {
            if config.key == FactorKey::PaceIndex {
                config.max_points = 4.0;
            }
        }
        let mut data = DataBundle::league_only(Matchup::new("AWY", "HOM"), LeagueAverages::default());
        data.away.pace = Some(104.0);
        data.home.pace = Some(103.0);
        let report = orchestrator(BetType::Total)
            .evaluate(&profile, &Bundle::Available(data), None, &Matchup::new("AWY", "HOM"))
            .await;
        let r = report.result(FactorKey::PaceIndex).unwrap();
        assert_eq!(r.weight, profile.weight_of(FactorKey::PaceIndex));
        assert!((r.points.a() - 4.0 * 0.4621).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_empty_registry_fails_each_factor() {
        let profile = CapperProfile::default_for("c", Sport::Nba, BetType::Spread).unwrap();
        let orchestrator = FactorOrchestrator::new(
            BetType::Spread,
            Arc::new(FactorRegistry::new()),
            Arc::new(NullSink),
        );
        let report = orchestrator
            .evaluate(&profile, &league_bundle(), None, &Matchup::new("AWY", "HOM"))
            .await;
        let r = report.result(FactorKey::NetRating).unwrap();
        assert_eq!(
            r.status,
            ResultStatus::Failed("no factor registered".to_string())
        );
    }
}
