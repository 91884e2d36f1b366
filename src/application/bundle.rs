//! Data bundle assembly.
//!
//! Fetches both teams and the league averages concurrently through the
//! [`StatsProvider`] port. A failed fetch never fails the evaluation: the
//! builder reports it and returns [`Bundle::Unavailable`], which the
//! orchestrator turns into neutral results.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Bundle, DataBundle, DataRequirements, Matchup};
use crate::port::outbound::diagnostics::{Diagnostic, DiagnosticSink};
use crate::port::outbound::stats::StatsProvider;

/// Builds a [`Bundle`] for one matchup.
pub struct BundleBuilder {
    provider: Arc<dyn StatsProvider>,
    sink: Arc<dyn DiagnosticSink>,
}

impl BundleBuilder {
    #[must_use]
    pub fn new(provider: Arc<dyn StatsProvider>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { provider, sink }
    }

    /// Fetch the teams and league averages `requirements` call for.
    pub async fn build(&self, matchup: &Matchup, requirements: &DataRequirements) -> Bundle {
        let fetched = tokio::try_join!(
            self.provider.team(&matchup.away, requirements),
            self.provider.team(&matchup.home, requirements),
            self.provider.league(),
        );

        match fetched {
            Ok((away, home, league)) => {
                debug!(
                    provider = self.provider.name(),
                    matchup = %matchup,
                    "Data bundle built"
                );
                Bundle::Available(DataBundle::new(
                    matchup.clone(),
                    requirements.restrict(away),
                    requirements.restrict(home),
                    league,
                ))
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    matchup = %matchup,
                    error = %e,
                    "Stats fetch failed, evaluating without data"
                );
                self.sink.record(Diagnostic::BundleUnavailable {
                    matchup: matchup.to_string(),
                    reason: e.to_string(),
                });
                Bundle::Unavailable
            }
        }
    }
}
