//! Mock factors for orchestrator isolation tests.
//!
//! Register one of these over a built-in key to replace that factor's
//! implementation for a single test.

use crate::domain::{BetType, DataBundle, Factor, FactorComputationResult, FactorKey};
use crate::error::FactorError;

/// Always returns the same signal.
#[derive(Debug, Clone, Copy)]
pub struct FixedFactor {
    pub key: FactorKey,
    pub bet_type: BetType,
    pub signal: f64,
    pub max_points: f64,
}

impl FixedFactor {
    pub const fn new(key: FactorKey, bet_type: BetType, signal: f64, max_points: f64) -> Self {
        Self {
            key,
            bet_type,
            signal,
            max_points,
        }
    }
}

impl Factor for FixedFactor {
    fn key(&self) -> FactorKey {
        self.key
    }

    fn bet_type(&self) -> BetType {
        self.bet_type
    }

    fn compute(&self, _bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Ok(FactorComputationResult::computed(
            self.key,
            self.bet_type,
            self.signal,
            self.max_points,
            "fixed",
        ))
    }
}

/// Always returns an error.
#[derive(Debug, Clone, Copy)]
pub struct ErroringFactor {
    pub key: FactorKey,
    pub bet_type: BetType,
}

impl ErroringFactor {
    pub const fn new(key: FactorKey, bet_type: BetType) -> Self {
        Self { key, bet_type }
    }
}

impl Factor for ErroringFactor {
    fn key(&self) -> FactorKey {
        self.key
    }

    fn bet_type(&self) -> BetType {
        self.bet_type
    }

    fn compute(&self, _bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        Err(FactorError::Computation("division by zero".into()))
    }
}

/// Panics on every call.
#[derive(Debug, Clone, Copy)]
pub struct PanickingFactor {
    pub key: FactorKey,
    pub bet_type: BetType,
}

impl PanickingFactor {
    pub const fn new(key: FactorKey, bet_type: BetType) -> Self {
        Self { key, bet_type }
    }
}

impl Factor for PanickingFactor {
    fn key(&self) -> FactorKey {
        self.key
    }

    fn bet_type(&self) -> BetType {
        self.bet_type
    }

    fn compute(&self, _bundle: &DataBundle) -> Result<FactorComputationResult, FactorError> {
        panic!("factor exploded")
    }
}
