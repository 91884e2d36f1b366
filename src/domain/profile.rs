//! Capper profiles and per-factor configuration.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bet::{BetType, Sport};
use super::catalog::{self, DEFAULT_BUDGET, MARKET_EDGE_WEIGHT};
use super::error::DomainError;
use super::factor::FactorKey;
use super::normalize::normalize;

/// Where a factor's inputs come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    /// Derived from the statistics bundle.
    #[default]
    Computed,
    /// Entered by the capper.
    Manual,
    /// Supplied by an external research service.
    External,
}

/// One capper's setting for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    pub key: FactorKey,
    pub enabled: bool,
    /// 0–100; fixed at 100 for market-edge factors.
    pub weight: f64,
    #[serde(default)]
    pub data_source: DataSourceMode,
    pub max_points: f64,
}

impl FactorConfig {
    #[must_use]
    pub fn new(key: FactorKey, enabled: bool, weight: f64, max_points: f64) -> Self {
        Self {
            key,
            enabled,
            weight,
            data_source: DataSourceMode::Computed,
            max_points,
        }
    }
}

/// Factor configuration of one capper for one (sport, bet type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapperProfile {
    pub capper_id: String,
    pub sport: Sport,
    pub bet_type: BetType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub factors: Vec<FactorConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
}

fn default_true() -> bool {
    true
}

impl CapperProfile {
    /// Build a profile from catalog defaults.
    ///
    /// Planned factors start disabled; everything else starts enabled at its
    /// default weight.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoCatalog`] when the bet type has no catalog.
    pub fn default_for(
        capper_id: impl Into<String>,
        sport: Sport,
        bet_type: BetType,
    ) -> Result<Self, DomainError> {
        let defs = catalog::catalog(sport, bet_type)?;
        let factors = defs
            .iter()
            .map(|d| {
                let enabled = d.is_active();
                let weight = if enabled { d.default_weight } else { 0.0 };
                let mut config = FactorConfig::new(d.key, enabled, weight, d.max_points);
                if d.is_external() {
                    config.data_source = DataSourceMode::External;
                }
                config
            })
            .collect();
        let now = Utc::now();
        Ok(Self {
            capper_id: capper_id.into(),
            sport,
            bet_type,
            name: format!("{sport} {bet_type} default"),
            description: String::new(),
            factors,
            created_at: now,
            updated_at: now,
            is_active: true,
            is_default: true,
        })
    }

    /// Check keys are unique and belong to this profile's catalog.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate or unknown key found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let defs = catalog::catalog(self.sport, self.bet_type)?;
        let mut seen = HashSet::new();
        for config in &self.factors {
            if !seen.insert(config.key) {
                return Err(DomainError::DuplicateFactor { key: config.key });
            }
            if !defs.iter().any(|d| d.key == config.key) {
                return Err(DomainError::UnknownFactor {
                    key: config.key,
                    bet_type: self.bet_type,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self, key: FactorKey) -> Option<&FactorConfig> {
        self.factors.iter().find(|c| c.key == key)
    }

    /// Enabled factor keys, in profile order.
    pub fn enabled_keys(&self) -> impl Iterator<Item = FactorKey> + '_ {
        self.factors.iter().filter(|c| c.enabled).map(|c| c.key)
    }

    /// Weight of an enabled factor, 0 otherwise.
    #[must_use]
    pub fn weight_of(&self, key: FactorKey) -> f64 {
        self.config(key)
            .filter(|c| c.enabled)
            .map_or(0.0, |c| c.weight)
    }

    /// Sum of enabled, budget-eligible weights.
    #[must_use]
    pub fn budget_sum(&self) -> f64 {
        self.factors
            .iter()
            .filter(|c| c.enabled && !c.key.is_market_edge())
            .map(|c| c.weight)
            .sum()
    }

    /// Toggle a factor. Returns false if the key is not in the profile.
    pub fn set_enabled(&mut self, key: FactorKey, enabled: bool) -> bool {
        let Some(config) = self.factors.iter_mut().find(|c| c.key == key) else {
            return false;
        };
        config.enabled = enabled;
        if !enabled {
            config.weight = 0.0;
        }
        true
    }

    /// Set a raw weight (clamped to 0–100). Market-edge weights are fixed.
    pub fn set_weight(&mut self, key: FactorKey, weight: f64) -> bool {
        let Some(config) = self.factors.iter_mut().find(|c| c.key == key) else {
            return false;
        };
        config.weight = if key.is_market_edge() {
            MARKET_EDGE_WEIGHT
        } else {
            weight.clamp(0.0, 100.0)
        };
        true
    }

    /// Return a copy with weights normalized to `budget`.
    ///
    /// # Errors
    ///
    /// Fails when the budget is invalid or the profile has no catalog.
    pub fn normalized(&self, budget: f64) -> Result<Self, DomainError> {
        let defs = catalog::catalog(self.sport, self.bet_type)?;
        let mut out = self.clone();
        out.factors = normalize(&self.factors, budget, defs)?;
        out.updated_at = Utc::now();
        Ok(out)
    }

    /// Normalize against the default budget.
    ///
    /// # Errors
    ///
    /// See [`CapperProfile::normalized`].
    pub fn normalized_default(&self) -> Result<Self, DomainError> {
        self.normalized(DEFAULT_BUDGET)
    }
}
