//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; an empty file yields the defaults.
//!
//! # Example
//!
//! ```no_run
//! use capline::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::engine::{EngineSection, ImpactConfig, KellyConfig};
use super::logging::LoggingConfig;
use crate::application::engine::EngineConfig;
use crate::application::heads::GateConfig;
use crate::domain::KellySizer;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Weight budget, outcome spreads and edge reconciliation.
    #[serde(default)]
    pub engine: EngineSection,

    /// Pick gates.
    #[serde(default)]
    pub gates: GateConfig,

    /// Stake sizing.
    #[serde(default)]
    pub kelly: KellyConfig,

    /// External availability estimates.
    #[serde(default)]
    pub impact: ImpactConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., non-positive budget)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let positive = |field: &'static str, value: f64| -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into())
            }
        };
        let non_negative = |field: &'static str, value: f64| -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be 0 or greater".to_string(),
                }
                .into())
            }
        };

        let engine = &self.engine;
        positive("budget", engine.budget)?;
        positive("sigma_margin", engine.sigma_margin)?;
        positive("sigma_total", engine.sigma_total)?;
        positive("total_edge_scale", engine.total_edge_scale)?;
        positive("spread_edge_scale", engine.spread_edge_scale)?;
        positive("edge_max_points", engine.edge_max_points)?;

        let gates = &self.gates;
        non_negative("min_ev_pct", gates.min_ev_pct)?;
        non_negative("min_attribution_points", gates.min_attribution_points)?;
        for (field, thresholds) in [
            ("min_deviation", gates.min_deviation),
            ("slippage", gates.slippage),
        ] {
            non_negative(field, thresholds.spread)?;
            non_negative(field, thresholds.total)?;
            non_negative(field, thresholds.moneyline)?;
        }

        let kelly = &self.kelly;
        if !(kelly.fraction > 0.0 && kelly.fraction <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "fraction",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        if !(kelly.unit_ratio > 0.0 && kelly.unit_ratio <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "unit_ratio",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        positive("max_units", kelly.max_units)?;
        if kelly.bankroll <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "bankroll",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.impact.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("unknown log format '{}'", self.logging.format),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging from the `[logging]` section, with the level
    /// raised for `-v` flags.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.clone().with_verbosity(verbose).init();
    }

    /// Engine settings assembled from every section.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            budget: self.engine.budget,
            sigma_margin: self.engine.sigma_margin,
            sigma_total: self.engine.sigma_total,
            total_edge_scale: self.engine.total_edge_scale,
            spread_edge_scale: self.engine.spread_edge_scale,
            edge_max_points: self.engine.edge_max_points,
            gates: self.gates,
            sizer: KellySizer::from(&self.kelly),
            bankroll: self.kelly.bankroll,
            impact_timeout: self.impact.timeout(),
        }
    }
}
