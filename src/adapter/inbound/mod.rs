//! Inbound adapters (drive the application).

pub mod cli;
