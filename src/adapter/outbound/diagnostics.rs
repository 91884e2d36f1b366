//! Diagnostics sink backed by `tracing`.

use tracing::{debug, warn};

use crate::port::outbound::diagnostics::{Diagnostic, DiagnosticSink};

/// Forwards diagnostics to the tracing subscriber with structured fields.
///
/// Failures and timeouts log at `warn`; bad inputs and fallbacks at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FactorFailed {
                key,
                bet_type,
                error,
            } => {
                warn!(factor = %key, bet_type = %bet_type, error = %error, "Factor failed");
            }
            Diagnostic::FactorPanicked {
                key,
                bet_type,
                message,
            } => {
                warn!(factor = %key, bet_type = %bet_type, error = %message, "Factor panicked");
            }
            Diagnostic::FactorUnregistered { key, bet_type } => {
                warn!(factor = %key, bet_type = %bet_type, "No factor registered");
            }
            Diagnostic::BadInput {
                key,
                bet_type,
                reason,
            } => {
                debug!(factor = %key, bet_type = %bet_type, reason = %reason, "Bad factor input");
            }
            Diagnostic::ImpactTimedOut {
                bet_type,
                timeout_ms,
            } => {
                warn!(bet_type = %bet_type, timeout_ms, "Impact estimate timed out");
            }
            Diagnostic::ImpactFailed { bet_type, error } => {
                warn!(bet_type = %bet_type, error = %error, "Impact estimate failed");
            }
            Diagnostic::BundleUnavailable { matchup, reason } => {
                warn!(matchup = %matchup, error = %reason, "Data bundle unavailable");
            }
            Diagnostic::FallbackUsed { team, fields } => {
                debug!(team = %team, fields = ?fields, "League fallback used");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BetType, FactorKey};

    #[test]
    fn test_records_without_subscriber() {
        let sink = TracingSink;
        sink.record(Diagnostic::FactorFailed {
            key: FactorKey::PaceIndex,
            bet_type: BetType::Total,
            error: "boom".into(),
        });
        sink.record(Diagnostic::FallbackUsed {
            team: "BOS".into(),
            fields: vec!["pace"],
        });
    }
}
