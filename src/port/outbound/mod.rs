//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the evaluation's external dependencies: team
//! statistics, the external availability estimate and the diagnostics sink.

pub mod diagnostics;
pub mod impact;
pub mod stats;
