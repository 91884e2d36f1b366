//! Edge-vs-market reconciliation.
//!
//! The market-edge factors are the one place where the output of other
//! factors becomes an input: the weighted points of the ordinary factors are
//! added to a zero-factor statistical baseline to form a predicted line,
//! which is then compared against the market line. The result is applied
//! last, always at weight 100, outside the weight budget.
//!
//! Lines use the side-`a` orientation: totals are points, spreads are the
//! away margin (away score minus home score).

use serde::{Deserialize, Serialize};

use super::bet::BetType;
use super::catalog::MARKET_EDGE_WEIGHT;
use super::factor::{FactorComputationResult, FactorKey};
use super::signal::{clamp, SidePoints};

/// Bound of the reconciliation signal.
pub const EDGE_SIGNAL_LIMIT: f64 = 2.0;

/// Converts a predicted-vs-market gap into the final directional signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciler {
    bet_type: BetType,
    /// Points of edge per unit of signal.
    scale: f64,
    /// Ceiling of the directional score.
    max_points: f64,
}

impl Reconciler {
    #[must_use]
    pub fn new(bet_type: BetType, scale: f64, max_points: f64) -> Self {
        Self {
            bet_type: bet_type.factor_group(),
            scale,
            max_points,
        }
    }

    #[must_use]
    pub const fn bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Fold `weighted_points` onto `baseline` and compare to `market_line`.
    ///
    /// Non-finite inputs yield a zero edge at the baseline.
    #[must_use]
    pub fn reconcile(&self, weighted_points: f64, market_line: f64, baseline: f64) -> ReconciledEdge {
        let weighted_points = if weighted_points.is_finite() {
            weighted_points
        } else {
            0.0
        };
        let predicted_line = baseline + weighted_points;
        let edge_pts = if predicted_line.is_finite() && market_line.is_finite() {
            predicted_line - market_line
        } else {
            0.0
        };
        let signal = if self.scale > 0.0 {
            clamp(edge_pts / self.scale, -EDGE_SIGNAL_LIMIT, EDGE_SIGNAL_LIMIT)
        } else {
            0.0
        };
        ReconciledEdge {
            bet_type: self.bet_type,
            baseline,
            weighted_points,
            predicted_line,
            market_line,
            edge_pts,
            signal,
            points: SidePoints::from_signal(signal, self.max_points / EDGE_SIGNAL_LIMIT),
        }
    }
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledEdge {
    pub bet_type: BetType,
    pub baseline: f64,
    pub weighted_points: f64,
    pub predicted_line: f64,
    pub market_line: f64,
    pub edge_pts: f64,
    /// In `[-2, 2]`.
    pub signal: f64,
    pub points: SidePoints,
}

impl ReconciledEdge {
    #[must_use]
    pub fn key(&self) -> FactorKey {
        match self.bet_type {
            BetType::Total => FactorKey::TotalEdge,
            BetType::Spread | BetType::Moneyline => FactorKey::SpreadEdge,
        }
    }

    /// The market-edge factor's result.
    ///
    /// The stored signal is halved into `[-1, 1]`; the points keep the full
    /// edge ceiling.
    #[must_use]
    pub fn to_factor_result(&self) -> FactorComputationResult {
        let mut result = FactorComputationResult::computed(
            self.key(),
            self.bet_type,
            self.signal / EDGE_SIGNAL_LIMIT,
            0.0,
            format!(
                "predicted {:.1} vs market {:.1} ({:+.1} pts)",
                self.predicted_line, self.market_line, self.edge_pts
            ),
        )
        .with_weight(MARKET_EDGE_WEIGHT)
        .with_caps(self.signal.abs() >= EDGE_SIGNAL_LIMIT)
        .with_input("baseline", self.baseline)
        .with_input("weighted_points", self.weighted_points)
        .with_input("predicted_line", self.predicted_line)
        .with_input("market_line", self.market_line)
        .with_input("edge_pts", self.edge_pts);
        result.points = self.points;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_edge() {
        let r = Reconciler::new(BetType::Total, 6.0, 5.0);
        let edge = r.reconcile(2.0, 224.0, 227.0);
        assert_eq!(edge.predicted_line, 229.0);
        assert_eq!(edge.edge_pts, 5.0);
        assert!((edge.signal - 5.0 / 6.0).abs() < 1e-12);
        assert!(edge.points.a() > 0.0);
        assert_eq!(edge.points.b(), 0.0);
    }

    #[test]
    fn test_signal_bounded_at_two() {
        let r = Reconciler::new(BetType::Spread, 4.0, 5.0);
        let edge = r.reconcile(0.0, -30.0, 10.0);
        assert_eq!(edge.signal, EDGE_SIGNAL_LIMIT);
        assert_eq!(edge.points.a(), 5.0);

        let edge = r.reconcile(0.0, 30.0, -10.0);
        assert_eq!(edge.signal, -EDGE_SIGNAL_LIMIT);
        assert_eq!(edge.points.b(), 5.0);
    }

    #[test]
    fn test_factor_result_keeps_invariants() {
        let r = Reconciler::new(BetType::Spread, 4.0, 5.0);
        let result = r.reconcile(1.0, 3.0, -9.0).to_factor_result();
        assert_eq!(result.key, FactorKey::SpreadEdge);
        assert_eq!(result.weight, MARKET_EDGE_WEIGHT);
        assert!(result.signal >= -1.0 && result.signal <= 1.0);
        assert_eq!(result.points.a().min(result.points.b()), 0.0);
        assert!(result.caps_applied);
    }

    #[test]
    fn test_non_finite_market_is_neutral() {
        let r = Reconciler::new(BetType::Total, 6.0, 5.0);
        let edge = r.reconcile(1.0, f64::NAN, 220.0);
        assert_eq!(edge.signal, 0.0);
        assert!(edge.points.is_neutral());
    }
}
