//! Infrastructure bootstrap helpers for wiring adapters into an engine.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::diagnostics::TracingSink;
use crate::adapter::outbound::impact::TableImpactEstimator;
use crate::adapter::outbound::snapshot::SnapshotStatsProvider;
use crate::application::bundle::BundleBuilder;
use crate::application::engine::Engine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::diagnostics::DiagnosticSink;
use crate::port::outbound::impact::ImpactEstimator;

/// Build the production diagnostics sink.
#[must_use]
pub fn build_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}

/// Build the impact estimator named by `[impact] table`, if any.
///
/// # Errors
///
/// Returns an error if the table file cannot be read or parsed.
pub fn build_impact(config: &Config) -> Result<Option<Arc<dyn ImpactEstimator>>> {
    let Some(path) = config.impact.table.as_deref() else {
        return Ok(None);
    };
    let table = TableImpactEstimator::load(path)?;
    info!(path, entries = table.len(), "Impact table loaded");
    Ok(Some(Arc::new(table)))
}

/// Build an engine from configuration with the tracing sink and the
/// configured impact estimator.
///
/// # Errors
///
/// Returns an error if the impact table cannot be loaded.
pub fn build_engine(config: &Config) -> Result<Engine> {
    build_engine_with_sink(config, build_sink())
}

/// Build an engine from configuration reporting to `sink`.
///
/// # Errors
///
/// Returns an error if the impact table cannot be loaded.
pub fn build_engine_with_sink(config: &Config, sink: Arc<dyn DiagnosticSink>) -> Result<Engine> {
    let mut engine = Engine::new(config.engine_config(), sink);
    if let Some(impact) = build_impact(config)? {
        engine = engine.with_impact(impact);
    }
    Ok(engine)
}

/// Build a bundle builder over a JSON statistics snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or parsed.
pub fn build_bundle_builder<P: AsRef<Path>>(
    snapshot: P,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<BundleBuilder> {
    let provider = SnapshotStatsProvider::load(snapshot.as_ref())?;
    info!(path = %snapshot.as_ref().display(), "Stats snapshot loaded");
    Ok(BundleBuilder::new(Arc::new(provider), sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_engine_without_impact_table() {
        let config = Config::default();
        let engine = build_engine(&config).unwrap();
        assert_eq!(engine.config(), &config.engine_config());
    }

    #[test]
    fn test_missing_impact_table_fails() {
        let mut config = Config::default();
        config.impact.table = Some("/nonexistent/impact.json".into());
        assert!(build_engine(&config).is_err());
    }

    #[test]
    fn test_impact_table_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"away":"BOS","home":"LAL","bet_type":"total","impact":-0.2}}]"#
        )
        .unwrap();
        let mut config = Config::default();
        config.impact.table = Some(file.path().display().to_string());
        assert!(build_impact(&config).unwrap().is_some());
    }
}
