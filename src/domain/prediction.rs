//! Score predictions, prediction heads and picks.

use serde::{Deserialize, Serialize};

use super::bet::{BetType, Side};
use super::kelly::Stake;
use super::odds::AmericanOdds;

/// Predicted final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePrediction {
    pub away_score: f64,
    pub home_score: f64,
    /// Away score minus home score.
    pub away_margin: f64,
    pub total: f64,
    pub pace: f64,
}

impl ScorePrediction {
    #[must_use]
    pub fn new(away_score: f64, home_score: f64, pace: f64) -> Self {
        Self {
            away_score,
            home_score,
            away_margin: away_score - home_score,
            total: away_score + home_score,
            pace,
        }
    }

    /// Rebuild from a total and away margin.
    #[must_use]
    pub fn from_lines(total: f64, away_margin: f64, pace: f64) -> Self {
        Self::new((total + away_margin) / 2.0, (total - away_margin) / 2.0, pace)
    }

    /// The line this prediction implies for a bet type (side-`a` orientation).
    #[must_use]
    pub fn line_for(&self, bet_type: BetType) -> f64 {
        match bet_type {
            BetType::Total => self.total,
            BetType::Spread | BetType::Moneyline => self.away_margin,
        }
    }

    /// Shift the total and margin by factor adjustments.
    #[must_use]
    pub fn adjusted(&self, total_delta: f64, margin_delta: f64) -> Self {
        Self::from_lines(
            self.total + total_delta,
            self.away_margin + margin_delta,
            self.pace,
        )
    }
}

/// One bet type's evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionHead {
    pub bet_type: BetType,
    pub side: Side,
    pub true_line: f64,
    pub market_line: f64,
    /// `true_line − market_line`.
    pub deviation: f64,
    pub win_probability: f64,
    /// Expected profit per unit staked.
    pub expected_value: f64,
    pub ev_percentage: f64,
    pub offered_odds: Option<AmericanOdds>,
    /// First gate this head failed, if any.
    pub threshold_reason: Option<String>,
}

impl PredictionHead {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.threshold_reason.is_none()
    }
}

/// A bet the engine recommends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub bet_type: BetType,
    pub side: Side,
    pub selection: String,
    pub expected_value: f64,
    pub ev_percentage: f64,
    pub win_probability: f64,
    pub offered_odds: AmericanOdds,
    pub stake: Stake,
}

/// Result of gating the three heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Pick(Pick),
    NoPick { reason: String },
}

impl Decision {
    #[must_use]
    pub const fn pick(&self) -> Option<&Pick> {
        match self {
            Self::Pick(pick) => Some(pick),
            Self::NoPick { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_pick(&self) -> bool {
        matches!(self, Self::Pick(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_roundtrip() {
        let p = ScorePrediction::from_lines(228.0, -4.0, 100.0);
        assert_eq!(p.away_score, 112.0);
        assert_eq!(p.home_score, 116.0);
        assert_eq!(p.away_margin, -4.0);
        assert_eq!(p.total, 228.0);
    }

    #[test]
    fn test_adjusted_shifts_lines() {
        let p = ScorePrediction::new(110.0, 114.0, 99.0).adjusted(2.0, 1.0);
        assert_eq!(p.total, 226.0);
        assert_eq!(p.away_margin, -3.0);
        assert_eq!(p.line_for(BetType::Moneyline), -3.0);
    }
}
