//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for matchups, team stats, bundles, markets and
//!   profiles.
//! - [`config`] - Canonical engine and gate configurations.
//! - [`factor`] - Mock [`Factor`](crate::domain::Factor) implementations:
//!   `FixedFactor`, `ErroringFactor`, `PanickingFactor`.
//! - [`impact`] - Mock [`ImpactEstimator`](crate::port::outbound::impact::ImpactEstimator)
//!   implementations: `FixedImpact`, `SlowImpact`, `FailingImpact`,
//!   `PanickingImpact`.

pub mod config;
pub mod domain;
pub mod factor;
pub mod impact;
