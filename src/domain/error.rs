//! Domain validation errors.
//!
//! These are returned by constructors that validate catalog, profile and
//! odds inputs. They indicate malformed configuration rather than bad
//! statistical data, which factors absorb as neutral results instead.
//!
//! # Examples
//!
//! ```
//! use capline::domain::error::DomainError;
//! use capline::domain::odds::AmericanOdds;
//!
//! let result = AmericanOdds::try_new(50.0);
//! assert!(matches!(result, Err(DomainError::InvalidOdds { .. })));
//! ```

use thiserror::Error;

use super::bet::BetType;
use super::factor::FactorKey;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// American odds must be at least +100 or at most -100.
    #[error("invalid American odds {value}: magnitude must be at least 100")]
    InvalidOdds {
        /// The rejected odds value.
        value: f64,
    },

    /// A profile listed the same factor twice.
    #[error("duplicate factor '{key}' in profile")]
    DuplicateFactor {
        /// The repeated key.
        key: FactorKey,
    },

    /// A profile referenced a factor outside its (sport, bet type) catalog.
    #[error("factor '{key}' is not defined for {bet_type} catalogs")]
    UnknownFactor {
        /// The unknown key.
        key: FactorKey,
        /// Bet type of the profile.
        bet_type: BetType,
    },

    /// No catalog exists for the requested bet type.
    #[error("no factor catalog for {bet_type}")]
    NoCatalog {
        /// The requested bet type.
        bet_type: BetType,
    },

    /// A catalog entry violates catalog rules.
    #[error("malformed catalog entry '{key}': {reason}")]
    MalformedCatalog {
        /// Offending key.
        key: FactorKey,
        /// What is wrong with it.
        reason: String,
    },

    /// A weight budget must be positive and finite.
    #[error("weight budget must be positive and finite, got {budget}")]
    InvalidBudget {
        /// The rejected budget.
        budget: f64,
    },

    /// A profile was supplied where a different bet type was expected.
    #[error("expected a {expected} profile, got {found}")]
    ProfileMismatch {
        /// Bet type the caller needed.
        expected: BetType,
        /// Bet type of the supplied profile.
        found: BetType,
    },
}
