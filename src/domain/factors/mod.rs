//! Factor library.
//!
//! Each factor is a stateless, pure computation over its own input shape.
//! Factors implement the [`Factor`] trait so the orchestrator can run them
//! against a shared [`DataBundle`]; the [`FactorRegistry`] holds the set of
//! implementations for every catalog.
//!
//! All factors follow the same pipeline:
//!
//! 1. validate inputs (non-finite or out-of-domain ⇒ neutral `bad_input`),
//! 2. derive a scalar delta,
//! 3. clamp it to a safety cap and squash it into `[-1, 1]`,
//! 4. convert the signal into single-positive directional points.
//!
//! The market-edge factors are not registered here: they consume the other
//! factors' aggregate output and are produced by
//! [`Reconciler`](crate::domain::reconcile::Reconciler).

pub mod efficiency;
pub mod four_factors;
pub mod home_court;
pub mod injury;
pub mod momentum;
pub mod pace;
pub mod possession;
pub mod rest;
pub mod shooting;

use crate::domain::bet::BetType;
use crate::domain::bundle::DataBundle;
use crate::domain::factor::{FactorComputationResult, FactorKey};
use crate::error::FactorError;

/// A synchronous factor computed from the data bundle.
pub trait Factor: Send + Sync {
    /// Catalog key.
    fn key(&self) -> FactorKey;

    /// Catalog this implementation belongs to.
    fn bet_type(&self) -> BetType;

    /// Compute the factor.
    ///
    /// Invalid statistics produce a neutral `BadInput` result, not an error.
    /// An `Err` signals an unexpected failure that the orchestrator isolates.
    fn compute(&self, bundle: &DataBundle) -> Result<FactorComputationResult, FactorError>;
}

/// Registered factor implementations, looked up by (bet type, key).
#[derive(Default)]
pub struct FactorRegistry {
    factors: Vec<Box<dyn Factor>>,
}

impl FactorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in synchronous factor.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(pace::PaceIndex));
        registry.register(Box::new(efficiency::OffensiveForm));
        registry.register(Box::new(efficiency::DefensiveErosion));
        registry.register(Box::new(shooting::ThreePointEnvironment));
        registry.register(Box::new(shooting::FreeThrowEnvironment));
        registry.register(Box::new(rest::RestFatigue::totals()));
        registry.register(Box::new(momentum::ShootingMomentum::totals()));
        registry.register(Box::new(efficiency::NetRating));
        registry.register(Box::new(possession::TurnoverDifferential));
        registry.register(Box::new(possession::ReboundingDifferential));
        registry.register(Box::new(home_court::HomeCourt));
        registry.register(Box::new(four_factors::FourFactors));
        registry.register(Box::new(rest::RestFatigue::spread()));
        registry.register(Box::new(momentum::ShootingMomentum::spread()));
        registry
    }

    /// Register a factor. A later registration for the same (bet type, key)
    /// replaces the earlier one.
    pub fn register(&mut self, factor: Box<dyn Factor>) {
        self.factors
            .retain(|f| !(f.key() == factor.key() && f.bet_type() == factor.bet_type()));
        self.factors.push(factor);
    }

    #[must_use]
    pub fn get(&self, bet_type: BetType, key: FactorKey) -> Option<&dyn Factor> {
        let group = bet_type.factor_group();
        self.factors
            .iter()
            .find(|f| f.bet_type() == group && f.key() == key)
            .map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Input check helpers. Each returns the offending field in its error.
pub(crate) mod check {
    pub fn finite(name: &str, value: f64) -> Result<f64, String> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{name} is not finite ({value})"))
        }
    }

    /// Ratings and paces: finite and strictly positive.
    pub fn positive(name: &str, value: f64) -> Result<f64, String> {
        let value = finite(name, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(format!("{name} must be positive, got {value}"))
        }
    }

    /// Rates and percentages expressed as fractions.
    pub fn fraction(name: &str, value: f64) -> Result<f64, String> {
        let value = finite(name, value)?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(format!("{name} must be within [0, 1], got {value}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog;
    use crate::domain::Sport;

    #[test]
    fn test_standard_registry_covers_active_sync_catalog() {
        let registry = FactorRegistry::standard();
        for bet_type in [BetType::Total, BetType::Spread] {
            for def in catalog::catalog(Sport::Nba, bet_type).unwrap() {
                let expected = def.is_active() && !def.is_market_edge() && !def.is_external();
                assert_eq!(
                    registry.get(bet_type, def.key).is_some(),
                    expected,
                    "{bet_type}/{}",
                    def.key
                );
            }
        }
    }

    #[test]
    fn test_register_replaces_same_key() {
        let mut registry = FactorRegistry::standard();
        let before = registry.len();
        registry.register(Box::new(pace::PaceIndex));
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_moneyline_lookup_uses_spread_group() {
        let registry = FactorRegistry::standard();
        assert!(registry.get(BetType::Moneyline, FactorKey::NetRating).is_some());
    }

    #[test]
    fn test_max_points_match_catalog() {
        let registry = FactorRegistry::standard();
        let bundle = crate::domain::DataBundle::league_only(
            crate::domain::Matchup::new("A", "B"),
            crate::domain::LeagueAverages::default(),
        );
        // A saturated signal exposes the factor's ceiling through its points.
        let mut hot = bundle.clone();
        hot.away.pace = Some(160.0);
        hot.home.pace = Some(160.0);
        let r = registry
            .get(BetType::Total, FactorKey::PaceIndex)
            .unwrap()
            .compute(&hot)
            .unwrap();
        let def = catalog::definition(Sport::Nba, BetType::Total, FactorKey::PaceIndex).unwrap();
        assert!(r.points.a() <= def.max_points);
        assert!(r.caps_applied);
    }
}
