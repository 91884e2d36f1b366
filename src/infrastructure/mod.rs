//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! scoring logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup
//! - [`bootstrap`] - Composition root wiring adapters into an engine

pub mod bootstrap;
pub mod config;
