//! Engine, stake-sizing and impact sections.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::catalog::DEFAULT_BUDGET;
use crate::domain::KellySizer;

/// `[engine]`: weight budget, outcome spreads and edge reconciliation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineSection {
    /// Sum enabled factor weights are normalized to.
    #[serde(default = "default_budget")]
    pub budget: f64,
    /// Standard deviation of the final margin (points).
    #[serde(default = "default_sigma_margin")]
    pub sigma_margin: f64,
    /// Standard deviation of the final total (points).
    #[serde(default = "default_sigma_total")]
    pub sigma_total: f64,
    /// Points of total edge per unit of edge signal.
    #[serde(default = "default_total_edge_scale")]
    pub total_edge_scale: f64,
    /// Points of spread edge per unit of edge signal.
    #[serde(default = "default_spread_edge_scale")]
    pub spread_edge_scale: f64,
    /// Ceiling of the market-edge directional points.
    #[serde(default = "default_edge_max_points")]
    pub edge_max_points: f64,
}

const fn default_budget() -> f64 {
    DEFAULT_BUDGET
}

const fn default_sigma_margin() -> f64 {
    12.0
}

const fn default_sigma_total() -> f64 {
    18.0
}

const fn default_total_edge_scale() -> f64 {
    6.0
}

const fn default_spread_edge_scale() -> f64 {
    4.0
}

const fn default_edge_max_points() -> f64 {
    5.0
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            sigma_margin: default_sigma_margin(),
            sigma_total: default_sigma_total(),
            total_edge_scale: default_total_edge_scale(),
            spread_edge_scale: default_spread_edge_scale(),
            edge_max_points: default_edge_max_points(),
        }
    }
}

/// `[kelly]`: fractional Kelly stake sizing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KellyConfig {
    /// Multiplier on full Kelly (0.25 = quarter Kelly).
    #[serde(default = "default_fraction")]
    pub fraction: f64,
    /// Bankroll in currency.
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
    /// One unit as a share of bankroll (0.01 = 1%).
    #[serde(default = "default_unit_ratio")]
    pub unit_ratio: f64,
    /// Largest stake in units.
    #[serde(default = "default_max_units")]
    pub max_units: f64,
}

const fn default_fraction() -> f64 {
    0.25
}

fn default_bankroll() -> Decimal {
    Decimal::from(1000)
}

const fn default_unit_ratio() -> f64 {
    0.01
}

const fn default_max_units() -> f64 {
    5.0
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            fraction: default_fraction(),
            bankroll: default_bankroll(),
            unit_ratio: default_unit_ratio(),
            max_units: default_max_units(),
        }
    }
}

impl From<&KellyConfig> for KellySizer {
    fn from(config: &KellyConfig) -> Self {
        Self::new(config.fraction, config.unit_ratio, config.max_units)
    }
}

/// `[impact]`: the external availability estimate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImpactConfig {
    /// Deadline for one estimate in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Optional JSON table of pre-researched estimates.
    #[serde(default)]
    pub table: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    2500
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            table: None,
        }
    }
}

impl ImpactConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
