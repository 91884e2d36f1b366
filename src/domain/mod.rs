//! Sport-agnostic scoring domain: signals, factors, weights, lines and stakes.
//!
//! Nothing here performs I/O. The application layer feeds data bundles in
//! and reads factor results, reconciled edges and picks out.

pub mod bet;
pub mod bundle;
pub mod catalog;
pub mod error;
pub mod factor;
pub mod factors;
pub mod kelly;
pub mod market;
pub mod normalize;
pub mod odds;
pub mod prediction;
pub mod probability;
pub mod profile;
pub mod reconcile;
pub mod requirements;
pub mod signal;

pub use bet::{BetType, Side, Sport};
pub use bundle::{Bundle, DataBundle, LeagueAverages, Matchup, ResolvedTeam, TeamStats};
pub use factor::{
    DataSource, FactorComputationResult, FactorDefinition, FactorKey, FactorScope, FactorStatus,
    ResultStatus,
};
pub use factors::{Factor, FactorRegistry};
pub use kelly::{KellySizer, Stake};
pub use market::MarketOdds;
pub use odds::AmericanOdds;
pub use prediction::{Decision, Pick, PredictionHead, ScorePrediction};
pub use profile::{CapperProfile, DataSourceMode, FactorConfig};
pub use reconcile::{ReconciledEdge, Reconciler};
pub use requirements::DataRequirements;
pub use signal::SidePoints;
