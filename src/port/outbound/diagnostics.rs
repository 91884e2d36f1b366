//! Diagnostics port.
//!
//! The orchestrator never logs directly: every isolated failure, fallback or
//! degraded path is reported as a [`Diagnostic`] through an injected
//! [`DiagnosticSink`]. Production wires a tracing-backed sink; tests record.

use std::fmt;

use crate::domain::{BetType, FactorKey};

/// Something worth reporting that did not stop the evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A factor returned an error; its result was neutralized.
    FactorFailed {
        key: FactorKey,
        bet_type: BetType,
        error: String,
    },
    /// A factor panicked; its result was neutralized.
    FactorPanicked {
        key: FactorKey,
        bet_type: BetType,
        message: String,
    },
    /// An enabled key has no registered implementation.
    FactorUnregistered { key: FactorKey, bet_type: BetType },
    /// A factor produced a neutral `bad_input` result.
    BadInput {
        key: FactorKey,
        bet_type: BetType,
        reason: String,
    },
    /// The external estimate missed its deadline.
    ImpactTimedOut { bet_type: BetType, timeout_ms: u64 },
    /// The external estimator returned an error.
    ImpactFailed { bet_type: BetType, error: String },
    /// The data bundle could not be built.
    BundleUnavailable { matchup: String, reason: String },
    /// Team fields were filled from league averages.
    FallbackUsed {
        team: String,
        fields: Vec<&'static str>,
    },
}

impl Diagnostic {
    /// Short machine-friendly name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FactorFailed { .. } => "factor_failed",
            Self::FactorPanicked { .. } => "factor_panicked",
            Self::FactorUnregistered { .. } => "factor_unregistered",
            Self::BadInput { .. } => "bad_input",
            Self::ImpactTimedOut { .. } => "impact_timed_out",
            Self::ImpactFailed { .. } => "impact_failed",
            Self::BundleUnavailable { .. } => "bundle_unavailable",
            Self::FallbackUsed { .. } => "fallback_used",
        }
    }

    /// The factor this diagnostic concerns, if any.
    #[must_use]
    pub const fn factor(&self) -> Option<FactorKey> {
        match self {
            Self::FactorFailed { key, .. }
            | Self::FactorPanicked { key, .. }
            | Self::FactorUnregistered { key, .. }
            | Self::BadInput { key, .. } => Some(*key),
            Self::ImpactTimedOut { .. } | Self::ImpactFailed { .. } => {
                Some(FactorKey::InjuryAvailability)
            }
            Self::BundleUnavailable { .. } | Self::FallbackUsed { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FactorFailed {
                key,
                bet_type,
                error,
            } => write!(f, "{bet_type}/{key} failed: {error}"),
            Self::FactorPanicked {
                key,
                bet_type,
                message,
            } => write!(f, "{bet_type}/{key} panicked: {message}"),
            Self::FactorUnregistered { key, bet_type } => {
                write!(f, "{bet_type}/{key} has no registered factor")
            }
            Self::BadInput {
                key,
                bet_type,
                reason,
            } => write!(f, "{bet_type}/{key} bad input: {reason}"),
            Self::ImpactTimedOut {
                bet_type,
                timeout_ms,
            } => write!(f, "{bet_type} impact estimate timed out after {timeout_ms}ms"),
            Self::ImpactFailed { bet_type, error } => {
                write!(f, "{bet_type} impact estimate failed: {error}")
            }
            Self::BundleUnavailable { matchup, reason } => {
                write!(f, "no data bundle for {matchup}: {reason}")
            }
            Self::FallbackUsed { team, fields } => {
                write!(f, "{team} league fallback for {}", fields.join(", "))
            }
        }
    }
}

/// Receiver for [`Diagnostic`]s.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `record` is called inline on the evaluation path and must not block
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_factor() {
        let d = Diagnostic::ImpactTimedOut {
            bet_type: BetType::Total,
            timeout_ms: 50,
        };
        assert_eq!(d.kind(), "impact_timed_out");
        assert_eq!(d.factor(), Some(FactorKey::InjuryAvailability));
        assert_eq!(d.to_string(), "total impact estimate timed out after 50ms");
    }

    #[test]
    fn test_fallback_display_lists_fields() {
        let d = Diagnostic::FallbackUsed {
            team: "BOS".into(),
            fields: vec!["pace", "rest_days"],
        };
        assert_eq!(d.factor(), None);
        assert_eq!(d.to_string(), "BOS league fallback for pace, rest_days");
    }
}
