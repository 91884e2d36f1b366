//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::time::Duration;

use crate::application::engine::EngineConfig;
use crate::application::heads::{GateConfig, LineThresholds};

/// Default engine config with a short impact deadline.
pub fn engine() -> EngineConfig {
    EngineConfig {
        impact_timeout: Duration::from_millis(50),
        ..EngineConfig::default()
    }
}

/// Gates that let any head with non-negative EV and any factor support
/// through.
pub fn open_gates() -> GateConfig {
    let zero = LineThresholds {
        spread: 0.0,
        total: 0.0,
        moneyline: 0.0,
    };
    GateConfig {
        min_ev_pct: 0.0,
        min_deviation: zero,
        slippage: zero,
        min_attribution_points: 0.0,
    }
}

/// Engine config with [`open_gates`].
pub fn open_engine() -> EngineConfig {
    EngineConfig {
        gates: open_gates(),
        ..engine()
    }
}

/// Gates nothing can pass.
pub fn closed_gates() -> GateConfig {
    GateConfig {
        min_ev_pct: 1_000.0,
        ..GateConfig::default()
    }
}
