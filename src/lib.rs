//! Capline - multi-factor matchup scoring and pick decisions.
//!
//! This crate scores a matchup with a library of independent statistical
//! factors, reconciles the weighted result against the market line, and
//! gates spread, total and moneyline predictions into at most one sized
//! pick.
//!
//! # Architecture
//!
//! - **`domain`** - Pure scoring logic: signal math, factor library,
//!   catalog, weight normalizer, reconciler, Kelly sizer
//! - **`port`** - Outbound traits: diagnostics sink, stats provider,
//!   impact estimator
//! - **`application`** - Orchestrator, bundle builder, baseline scoring,
//!   prediction heads and the end-to-end engine
//! - **`adapter`** - CLI (inbound) and tracing/snapshot/table adapters
//!   (outbound)
//! - **`infrastructure`** - TOML configuration, logging, composition root
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use capline::adapter::outbound::diagnostics::TracingSink;
//! use capline::application::engine::{Engine, EngineConfig, EvaluationRequest};
//! use capline::domain::{Bundle, MarketOdds, Matchup};
//!
//! # async fn run() -> capline::error::Result<()> {
//! let engine = Engine::new(EngineConfig::default(), Arc::new(TracingSink));
//! let request = EvaluationRequest::with_defaults(
//!     Matchup::new("BOS", "LAL"),
//!     Bundle::Unavailable,
//!     MarketOdds::new(-4.5, 228.5),
//! )?;
//! let evaluation = engine.evaluate(&request).await?;
//! println!("{:?}", evaluation.decision);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
