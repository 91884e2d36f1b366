//! Weight-budget normalization.
//!
//! Enabled, budget-eligible factor weights are rescaled so they sum to the
//! configured budget. Market-edge factors are pinned at weight 100, always
//! enabled, and sit outside the budget. Disabled and planned factors carry
//! weight 0.
//!
//! # Examples
//!
//! ```
//! use capline::domain::catalog;
//! use capline::domain::normalize::normalize;
//! use capline::domain::{BetType, FactorConfig, FactorKey, Sport};
//!
//! let defs = catalog::catalog(Sport::Nba, BetType::Total).unwrap();
//! let configs = vec![
//!     FactorConfig::new(FactorKey::PaceIndex, true, 20.0, 2.0),
//!     FactorConfig::new(FactorKey::OffensiveForm, true, 20.0, 2.0),
//!     FactorConfig::new(FactorKey::DefensiveErosion, true, 20.0, 2.0),
//! ];
//! let out = normalize(&configs, 250.0, defs).unwrap();
//! let sum: f64 = out.iter().map(|c| c.weight).sum();
//! assert!((sum - 250.0).abs() < 0.01);
//! ```

use tracing::debug;

use super::catalog::MARKET_EDGE_WEIGHT;
use super::error::DomainError;
use super::factor::{FactorDefinition, FactorStatus};
use super::profile::FactorConfig;

/// Tolerance for the budget invariant.
pub const BUDGET_TOLERANCE: f64 = 0.01;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn is_planned(config: &FactorConfig, defs: &[FactorDefinition]) -> bool {
    defs.iter()
        .find(|d| d.key == config.key)
        .is_some_and(|d| d.status == FactorStatus::Planned)
}

fn catalog_rank(config: &FactorConfig, defs: &[FactorDefinition]) -> usize {
    defs.iter()
        .position(|d| d.key == config.key)
        .unwrap_or(usize::MAX)
}

/// Rescale enabled weights to `budget`.
///
/// Output preserves input order. Idempotent up to 2-decimal rounding.
///
/// # Errors
///
/// Returns [`DomainError::InvalidBudget`] for a non-positive or non-finite
/// budget.
pub fn normalize(
    configs: &[FactorConfig],
    budget: f64,
    defs: &[FactorDefinition],
) -> Result<Vec<FactorConfig>, DomainError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(DomainError::InvalidBudget { budget });
    }

    let mut out: Vec<FactorConfig> = configs.to_vec();

    // Market edge and planned entries are settled first; neither joins the budget.
    let mut eligible: Vec<usize> = Vec::new();
    for (i, config) in out.iter_mut().enumerate() {
        if config.key.is_market_edge() {
            config.enabled = true;
            config.weight = MARKET_EDGE_WEIGHT;
        } else if is_planned(config, defs) {
            config.enabled = false;
            config.weight = 0.0;
        } else {
            if !config.enabled || !config.weight.is_finite() || config.weight < 0.0 {
                config.weight = 0.0;
            }
            eligible.push(i);
        }
    }

    let enabled: Vec<usize> = eligible
        .iter()
        .copied()
        .filter(|&i| out[i].enabled)
        .collect();

    if enabled.is_empty() {
        if eligible.is_empty() {
            return Ok(out);
        }
        let mut ordered = eligible.clone();
        ordered.sort_by_key(|&i| catalog_rank(&out[i], defs));
        for &i in &ordered {
            out[i].enabled = true;
        }
        debug!(count = ordered.len(), budget, "No factors enabled, enabling all");
        split_evenly(&mut out, &ordered, budget);
        return Ok(out);
    }

    let current: f64 = enabled.iter().map(|&i| out[i].weight).sum();
    if current <= 0.0 {
        debug!(count = enabled.len(), budget, "Enabled weights sum to zero, splitting evenly");
        split_evenly(&mut out, &enabled, budget);
        return Ok(out);
    }

    let scale = budget / current;
    for &i in &enabled {
        out[i].weight = round2(out[i].weight * scale);
    }
    correct_first(&mut out, &enabled, budget);

    debug!(from = current, to = budget, count = enabled.len(), "Rescaled factor weights");
    Ok(out)
}

fn split_evenly(out: &mut [FactorConfig], indices: &[usize], budget: f64) {
    let share = round2(budget / indices.len() as f64);
    for &i in indices {
        out[i].weight = share;
    }
    correct_first(out, indices, budget);
}

/// Absorb the rounding residue into the first index so the sum is exact.
fn correct_first(out: &mut [FactorConfig], indices: &[usize], budget: f64) {
    let Some((&first, rest)) = indices.split_first() else {
        return;
    };
    let others: f64 = rest.iter().map(|&i| out[i].weight).sum();
    out[first].weight = round2(budget - others);
}

/// Sum of enabled, budget-eligible weights.
#[must_use]
pub fn budget_sum(configs: &[FactorConfig]) -> f64 {
    configs
        .iter()
        .filter(|c| c.enabled && !c.key.is_market_edge())
        .map(|c| c.weight)
        .sum()
}

/// Whether `configs` satisfy the budget invariant.
#[must_use]
pub fn satisfies_budget(configs: &[FactorConfig], budget: f64) -> bool {
    (budget_sum(configs) - budget).abs() <= BUDGET_TOLERANCE
}
