//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement matchup evaluation.

pub mod bundle;
pub mod engine;
pub mod heads;
pub mod orchestrator;
pub mod scoring;
