//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌────────────┐
//! │  Stats  │            │   Impact    │              │ Diagnostic │
//! │ Adapter │            │  Estimator  │              │    Sink    │
//! └─────────┘            └─────────────┘              └────────────┘
//! ```

pub mod outbound;
