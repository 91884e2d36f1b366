//! Outbound adapters (driven side).

pub mod diagnostics;
pub mod impact;
pub mod snapshot;
