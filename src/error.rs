use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure inside a single factor computation.
///
/// Never escapes the orchestrator: it is recorded on the factor's result and
/// the remaining factors keep running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactorError {
    #[error("computation failed: {0}")]
    Computation(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Factor(#[from] FactorError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stats provider error: {0}")]
    Stats(String),

    #[error("impact estimator error: {0}")]
    Impact(String),
}

pub type Result<T> = std::result::Result<T, Error>;
