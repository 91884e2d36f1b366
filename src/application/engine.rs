//! End-to-end matchup evaluation.
//!
//! ```text
//! bundle ─► orchestrators (totals, spread) ─► weighted points
//!        ─► baseline + points = adjusted prediction
//!        ─► reconcilers (total_edge, spread_edge)
//!        ─► heads ─► gates ─► Kelly ─► Decision
//! ```
//!
//! Evaluations share no mutable state; a slate runs them concurrently.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::application::bundle::BundleBuilder;
use crate::application::heads::{GateConfig, HeadEvaluator};
use crate::application::orchestrator::{FactorOrchestrator, FactorReport, DEFAULT_IMPACT_TIMEOUT};
use crate::domain::catalog::DEFAULT_BUDGET;
use crate::domain::error::DomainError;
use crate::domain::{
    BetType, Bundle, CapperProfile, DataRequirements, Decision, FactorComputationResult,
    FactorKey, FactorRegistry, KellySizer, MarketOdds, Matchup, PredictionHead, ReconciledEdge, Reconciler,
    ScorePrediction, Sport,
};
use crate::error::Result;
use crate::port::outbound::diagnostics::{Diagnostic, DiagnosticSink};
use crate::port::outbound::impact::ImpactEstimator;

/// Tunables for one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Weight budget every profile is normalized to.
    pub budget: f64,
    /// Standard deviation of the final margin, in points.
    pub sigma_margin: f64,
    /// Standard deviation of the final total, in points.
    pub sigma_total: f64,
    pub total_edge_scale: f64,
    pub spread_edge_scale: f64,
    /// Default ceiling of the market-edge points.
    pub edge_max_points: f64,
    pub gates: GateConfig,
    pub sizer: KellySizer,
    pub bankroll: Decimal,
    pub impact_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            sigma_margin: 12.0,
            sigma_total: 18.0,
            total_edge_scale: 6.0,
            spread_edge_scale: 4.0,
            edge_max_points: 5.0,
            gates: GateConfig::default(),
            sizer: KellySizer::default(),
            bankroll: Decimal::from(1000),
            impact_timeout: DEFAULT_IMPACT_TIMEOUT,
        }
    }
}

/// Everything needed to evaluate one matchup.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub matchup: Matchup,
    pub bundle: Bundle,
    pub market: MarketOdds,
    pub totals_profile: CapperProfile,
    pub spread_profile: CapperProfile,
}

impl EvaluationRequest {
    /// Request using the catalog default profiles.
    ///
    /// # Errors
    ///
    /// Fails only if a default catalog is missing.
    pub fn with_defaults(matchup: Matchup, bundle: Bundle, market: MarketOdds) -> Result<Self> {
        Ok(Self {
            matchup,
            bundle,
            market,
            totals_profile: CapperProfile::default_for("default", Sport::Nba, BetType::Total)?,
            spread_profile: CapperProfile::default_for("default", Sport::Nba, BetType::Spread)?,
        })
    }

    /// Data groups the factors of both profiles read once normalized.
    ///
    /// A profile with nothing enabled is evaluated with its whole catalog, so
    /// its requirements follow the normalized profile rather than the raw one.
    #[must_use]
    pub fn requirements(&self) -> DataRequirements {
        let mut req = DataRequirements::for_keys(
            self.totals_profile.sport,
            BetType::Total,
            evaluated_keys(&self.totals_profile),
        );
        req.extend(&DataRequirements::for_keys(
            self.spread_profile.sport,
            BetType::Spread,
            evaluated_keys(&self.spread_profile),
        ));
        req
    }
}

/// Keys enabled after normalization. Profiles that cannot be normalized keep
/// their raw enabled set; `evaluate` rejects them anyway.
fn evaluated_keys(profile: &CapperProfile) -> Vec<FactorKey> {
    match profile.normalized_default() {
        Ok(normalized) => normalized.enabled_keys().collect(),
        Err(_) => profile.enabled_keys().collect(),
    }
}

/// Net directional score per factor group: weighted factor points plus the
/// market-edge points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub totals: f64,
    pub spread: f64,
}

/// Full output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub matchup: Matchup,
    pub totals: FactorReport,
    pub spread: FactorReport,
    pub total_edge: ReconciledEdge,
    pub spread_edge: ReconciledEdge,
    /// Baseline shifted by the weighted factor points.
    pub prediction: ScorePrediction,
    pub confidence: Confidence,
    pub heads: Vec<PredictionHead>,
    pub decision: Decision,
}

impl Evaluation {
    /// Factor results of a group followed by its market-edge result.
    #[must_use]
    pub fn factor_results(&self, bet_type: BetType) -> Vec<FactorComputationResult> {
        let (report, edge) = match bet_type.factor_group() {
            BetType::Total => (&self.totals, &self.total_edge),
            _ => (&self.spread, &self.spread_edge),
        };
        let mut results = report.results.clone();
        results.push(edge.to_factor_result());
        results
    }

    #[must_use]
    pub fn head(&self, bet_type: BetType) -> Option<&PredictionHead> {
        self.heads.iter().find(|h| h.bet_type == bet_type)
    }
}

/// Matchup evaluation engine.
pub struct Engine {
    config: EngineConfig,
    registry: Arc<FactorRegistry>,
    sink: Arc<dyn DiagnosticSink>,
    impact: Option<Arc<dyn ImpactEstimator>>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            config,
            registry: Arc::new(FactorRegistry::standard()),
            sink,
            impact: None,
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: FactorRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    #[must_use]
    pub fn with_impact(mut self, estimator: Arc<dyn ImpactEstimator>) -> Self {
        self.impact = Some(estimator);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch the bundle for a request's matchup through `builder`, replacing
    /// whatever bundle the request carried.
    pub async fn prepare(&self, builder: &BundleBuilder, mut request: EvaluationRequest) -> EvaluationRequest {
        let requirements = request.requirements();
        request.bundle = builder.build(&request.matchup, &requirements).await;
        request
    }

    /// Evaluate one matchup.
    ///
    /// # Errors
    ///
    /// Returns a domain error if a profile is invalid, belongs to the wrong
    /// bet type, or cannot be normalized to the configured budget. Data and
    /// factor failures never fail the evaluation.
    #[instrument(skip_all, fields(matchup = %request.matchup))]
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation> {
        let totals_profile = self.prepare_profile(&request.totals_profile, BetType::Total)?;
        let spread_profile = self.prepare_profile(&request.spread_profile, BetType::Spread)?;

        if let Bundle::Available(data) = &request.bundle {
            for (team, resolved) in [
                (&data.matchup.away, data.away()),
                (&data.matchup.home, data.home()),
            ] {
                if !resolved.fallbacks.is_empty() {
                    self.sink.record(Diagnostic::FallbackUsed {
                        team: team.clone(),
                        fields: resolved.fallbacks,
                    });
                }
            }
        }

        let impact = self.impact.as_deref();
        let totals_orchestrator = self.orchestrator(BetType::Total);
        let spread_orchestrator = self.orchestrator(BetType::Spread);
        let (totals, spread) = tokio::join!(
            totals_orchestrator.evaluate(&totals_profile, &request.bundle, impact, &request.matchup),
            spread_orchestrator.evaluate(&spread_profile, &request.bundle, impact, &request.matchup),
        );

        let baseline = totals.baseline;
        let total_points = totals.weighted_points();
        let spread_points = spread.weighted_points();
        let prediction = baseline.adjusted(total_points, spread_points);

        let total_edge = Reconciler::new(
            BetType::Total,
            self.config.total_edge_scale,
            edge_max_points(&totals_profile, self.config.edge_max_points),
        )
        .reconcile(total_points, request.market.total, baseline.total);
        let spread_edge = Reconciler::new(
            BetType::Spread,
            self.config.spread_edge_scale,
            edge_max_points(&spread_profile, self.config.edge_max_points),
        )
        .reconcile(
            spread_points,
            request.market.implied_away_margin(),
            baseline.away_margin,
        );

        let confidence = Confidence {
            totals: total_points + total_edge.points.signed(),
            spread: spread_points + spread_edge.points.signed(),
        };

        let heads = HeadEvaluator::new(
            self.config.gates,
            self.config.sigma_margin,
            self.config.sigma_total,
        );
        let evaluated = heads.evaluate(&prediction, &request.market, &totals, &spread);
        let decision = heads.decide(
            &evaluated,
            &request.matchup,
            &request.market,
            &self.config.sizer,
            self.config.bankroll,
        );

        match &decision {
            Decision::Pick(pick) => info!(
                selection = %pick.selection,
                ev_pct = pick.ev_percentage,
                units = %pick.stake.units,
                "Matchup evaluated"
            ),
            Decision::NoPick { reason } => info!(reason = %reason, "Matchup evaluated, no pick"),
        }

        Ok(Evaluation {
            matchup: request.matchup.clone(),
            totals,
            spread,
            total_edge,
            spread_edge,
            prediction,
            confidence,
            heads: evaluated,
            decision,
        })
    }

    /// Evaluate a slate concurrently. Results keep the request order.
    pub async fn evaluate_slate(&self, requests: &[EvaluationRequest]) -> Vec<Result<Evaluation>> {
        join_all(requests.iter().map(|r| self.evaluate(r))).await
    }

    fn orchestrator(&self, bet_type: BetType) -> FactorOrchestrator {
        FactorOrchestrator::new(bet_type, Arc::clone(&self.registry), Arc::clone(&self.sink))
            .with_impact_timeout(self.config.impact_timeout)
    }

    fn prepare_profile(&self, profile: &CapperProfile, bet_type: BetType) -> Result<CapperProfile> {
        if profile.bet_type != bet_type {
            return Err(DomainError::ProfileMismatch {
                expected: bet_type,
                found: profile.bet_type,
            }
            .into());
        }
        profile.validate()?;
        Ok(profile.normalized(self.config.budget)?)
    }
}

fn edge_max_points(profile: &CapperProfile, default: f64) -> f64 {
    profile
        .factors
        .iter()
        .find(|c| c.key.is_market_edge())
        .map(|c| c.max_points)
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(default)
}
