//! Prediction heads and gating.
//!
//! Each head turns the adjusted score prediction into a line, compares it
//! with the market, and prices the chosen side:
//!
//! ```text
//! deviation       = true_line − market_line
//! win_probability = Φ(|deviation| / σ)
//! EV              = p × payout(odds) − (1 − p)
//! ```
//!
//! A head survives only if it clears every gate, in order: minimum EV%,
//! minimum line deviation, slippage tolerance, factor attribution. The
//! surviving head with the highest EV becomes the pick.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::orchestrator::FactorReport;
use crate::domain::probability::{normal_cdf, normal_quantile};
use crate::domain::{
    AmericanOdds, BetType, Decision, KellySizer, MarketOdds, Matchup, Pick, PredictionHead,
    ScorePrediction, Side,
};

/// A value per bet type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineThresholds {
    pub spread: f64,
    pub total: f64,
    pub moneyline: f64,
}

impl LineThresholds {
    #[must_use]
    pub const fn get(&self, bet_type: BetType) -> f64 {
        match bet_type {
            BetType::Spread => self.spread,
            BetType::Total => self.total,
            BetType::Moneyline => self.moneyline,
        }
    }
}

/// Gate thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum expected value, in percent of stake.
    #[serde(default = "default_min_ev_pct")]
    pub min_ev_pct: f64,
    /// Minimum |true − market| in points.
    #[serde(default = "default_min_deviation")]
    pub min_deviation: LineThresholds,
    /// Line movement the edge must survive, in points.
    #[serde(default = "default_slippage")]
    pub slippage: LineThresholds,
    /// Smallest weighted contribution that counts as factor support.
    #[serde(default = "default_min_attribution_points")]
    pub min_attribution_points: f64,
}

const fn default_min_ev_pct() -> f64 {
    2.0
}

const fn default_min_deviation() -> LineThresholds {
    LineThresholds {
        spread: 1.5,
        total: 3.0,
        moneyline: 1.0,
    }
}

const fn default_slippage() -> LineThresholds {
    LineThresholds {
        spread: 0.5,
        total: 1.0,
        moneyline: 0.5,
    }
}

const fn default_min_attribution_points() -> f64 {
    0.10
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_ev_pct: default_min_ev_pct(),
            min_deviation: default_min_deviation(),
            slippage: default_slippage(),
            min_attribution_points: default_min_attribution_points(),
        }
    }
}

/// `p × payout − (1 − p)`.
#[must_use]
pub fn expected_value(win_probability: f64, odds: AmericanOdds) -> f64 {
    win_probability * odds.payout() - (1.0 - win_probability)
}

/// Builds and gates the three heads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadEvaluator {
    gates: GateConfig,
    sigma_margin: f64,
    sigma_total: f64,
}

impl HeadEvaluator {
    #[must_use]
    pub const fn new(gates: GateConfig, sigma_margin: f64, sigma_total: f64) -> Self {
        Self {
            gates,
            sigma_margin,
            sigma_total,
        }
    }

    #[must_use]
    pub const fn gates(&self) -> &GateConfig {
        &self.gates
    }

    /// Build and gate all three heads, in [`BetType::ALL`] order.
    #[must_use]
    pub fn evaluate(
        &self,
        prediction: &ScorePrediction,
        market: &MarketOdds,
        totals: &FactorReport,
        spread: &FactorReport,
    ) -> Vec<PredictionHead> {
        BetType::ALL
            .iter()
            .map(|&bet_type| {
                let (mut head, support) = match bet_type {
                    BetType::Spread => (self.spread_head(prediction, market), spread),
                    BetType::Total => (self.total_head(prediction, market), totals),
                    BetType::Moneyline => (self.moneyline_head(prediction, market), spread),
                };
                self.gate(&mut head, support);
                head
            })
            .collect()
    }

    /// Spread head: predicted away margin vs the market's implied margin.
    #[must_use]
    pub fn spread_head(&self, prediction: &ScorePrediction, market: &MarketOdds) -> PredictionHead {
        let true_line = prediction.away_margin;
        let market_line = market.implied_away_margin();
        let deviation = true_line - market_line;
        let side = BetType::Spread.side_for(deviation);
        let odds = if side == Side::Away {
            market.away_spread_odds
        } else {
            market.home_spread_odds
        };
        self.priced(
            BetType::Spread,
            side,
            true_line,
            market_line,
            normal_cdf(deviation.abs() / self.sigma_margin),
            odds,
        )
    }

    /// Totals head: predicted total vs the posted total.
    #[must_use]
    pub fn total_head(&self, prediction: &ScorePrediction, market: &MarketOdds) -> PredictionHead {
        let true_line = prediction.total;
        let market_line = market.total;
        let deviation = true_line - market_line;
        let side = BetType::Total.side_for(deviation);
        let odds = if side == Side::Over {
            market.over_odds
        } else {
            market.under_odds
        };
        self.priced(
            BetType::Total,
            side,
            true_line,
            market_line,
            normal_cdf(deviation.abs() / self.sigma_total),
            odds,
        )
    }

    /// Moneyline head: the vig-free away probability is mapped back to an
    /// implied away margin `σ × Φ⁻¹(p)` and compared with the prediction.
    #[must_use]
    pub fn moneyline_head(&self, prediction: &ScorePrediction, market: &MarketOdds) -> PredictionHead {
        let true_line = prediction.away_margin;
        let Some((away, home)) = market.moneylines() else {
            return PredictionHead {
                bet_type: BetType::Moneyline,
                side: BetType::Moneyline.side_for(true_line),
                true_line,
                market_line: 0.0,
                deviation: 0.0,
                win_probability: 0.5,
                expected_value: 0.0,
                ev_percentage: 0.0,
                offered_odds: None,
                threshold_reason: Some("moneyline: not offered".to_string()),
            };
        };
        let (p_away, _) = AmericanOdds::no_vig(away, home);
        let market_line = self.sigma_margin * normal_quantile(p_away);
        let deviation = true_line - market_line;
        let side = BetType::Moneyline.side_for(deviation);
        let (side_margin, odds) = if side == Side::Away {
            (true_line, away)
        } else {
            (-true_line, home)
        };
        self.priced(
            BetType::Moneyline,
            side,
            true_line,
            market_line,
            normal_cdf(side_margin / self.sigma_margin),
            odds,
        )
    }

    #[allow(clippy::unused_self)]
    fn priced(
        &self,
        bet_type: BetType,
        side: Side,
        true_line: f64,
        market_line: f64,
        win_probability: f64,
        odds: AmericanOdds,
    ) -> PredictionHead {
        let expected_value = expected_value(win_probability, odds);
        PredictionHead {
            bet_type,
            side,
            true_line,
            market_line,
            deviation: true_line - market_line,
            win_probability,
            expected_value,
            ev_percentage: expected_value * 100.0,
            offered_odds: Some(odds),
            threshold_reason: None,
        }
    }

    /// Apply the gates in order; the first failure sets `threshold_reason`.
    pub fn gate(&self, head: &mut PredictionHead, support: &FactorReport) {
        if head.threshold_reason.is_some() {
            return;
        }
        let bet_type = head.bet_type;
        let Some(odds) = head.offered_odds else {
            head.threshold_reason = Some(format!("{bet_type}: no price offered"));
            return;
        };

        if !(head.ev_percentage >= self.gates.min_ev_pct) {
            head.threshold_reason = Some(format!(
                "{bet_type}: EV {:.2}% below {:.2}%",
                head.ev_percentage, self.gates.min_ev_pct
            ));
            return;
        }

        let min_deviation = self.gates.min_deviation.get(bet_type);
        if head.deviation.abs() < min_deviation {
            head.threshold_reason = Some(format!(
                "{bet_type}: deviation {:.2} below {:.2}",
                head.deviation.abs(),
                min_deviation
            ));
            return;
        }

        let slippage = self.gates.slippage.get(bet_type);
        let slipped = expected_value(self.slipped_probability(head, slippage), odds);
        if slipped < 0.0 {
            head.threshold_reason = Some(format!(
                "{bet_type}: edge does not survive {slippage:.1} pts of slippage"
            ));
            return;
        }

        let supported = support.results.iter().any(|r| {
            let weighted = r.weighted_points();
            weighted.abs() >= self.gates.min_attribution_points
                && (weighted > 0.0) == head.side.is_a()
        });
        if !supported {
            head.threshold_reason = Some(format!("{bet_type}: no factor supports {}", head.side));
        }
    }

    /// Win probability after the line moves `slippage` points against us.
    fn slipped_probability(&self, head: &PredictionHead, slippage: f64) -> f64 {
        match head.bet_type {
            BetType::Spread => normal_cdf((head.deviation.abs() - slippage) / self.sigma_margin),
            BetType::Total => normal_cdf((head.deviation.abs() - slippage) / self.sigma_total),
            BetType::Moneyline => {
                let side_margin = if head.side == Side::Away {
                    head.true_line
                } else {
                    -head.true_line
                };
                normal_cdf((side_margin - slippage) / self.sigma_margin)
            }
        }
    }

    /// Pick the surviving head with the highest EV and size its stake.
    #[must_use]
    pub fn decide(
        &self,
        heads: &[PredictionHead],
        matchup: &Matchup,
        market: &MarketOdds,
        sizer: &KellySizer,
        bankroll: Decimal,
    ) -> Decision {
        let best = heads
            .iter()
            .filter(|h| h.passed())
            .fold(None::<&PredictionHead>, |best, h| match best {
                Some(b) if b.expected_value >= h.expected_value => Some(b),
                _ => Some(h),
            });

        let Some(head) = best else {
            let reason = heads
                .iter()
                .filter_map(|h| h.threshold_reason.as_deref())
                .collect::<Vec<_>>()
                .join("; ");
            debug!(matchup = %matchup, reason = %reason, "No pick");
            return Decision::NoPick { reason };
        };

        let Some(odds) = head.offered_odds else {
            return Decision::NoPick {
                reason: format!("{}: no price offered", head.bet_type),
            };
        };
        let stake = sizer.size(head.win_probability, odds, bankroll);
        debug!(
            matchup = %matchup,
            bet_type = %head.bet_type,
            side = %head.side,
            ev_pct = head.ev_percentage,
            units = %stake.units,
            "Pick selected"
        );
        Decision::Pick(Pick {
            bet_type: head.bet_type,
            side: head.side,
            selection: selection(head, matchup, market),
            expected_value: head.expected_value,
            ev_percentage: head.ev_percentage,
            win_probability: head.win_probability,
            offered_odds: odds,
            stake,
        })
    }
}

/// Human-readable selection, e.g. `BOS -4.5`, `OVER 228.5`, `LAL ML`.
#[must_use]
pub fn selection(head: &PredictionHead, matchup: &Matchup, market: &MarketOdds) -> String {
    let team = |side: Side| match side {
        Side::Away => matchup.away.as_str(),
        _ => matchup.home.as_str(),
    };
    match head.bet_type {
        BetType::Spread => {
            let line = if head.side == Side::Away {
                market.away_spread
            } else {
                -market.away_spread
            };
            format!("{} {}", team(head.side), format_line(line))
        }
        BetType::Total => format!("{} {}", head.side.to_string().to_uppercase(), market.total),
        BetType::Moneyline => format!("{} ML", team(head.side)),
    }
}

fn format_line(line: f64) -> String {
    if line == 0.0 {
        "PK".to_string()
    } else {
        format!("{line:+}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FactorComputationResult, FactorKey};
    use rust_decimal_macros::dec;

    fn evaluator() -> HeadEvaluator {
        HeadEvaluator::new(GateConfig::default(), 12.0, 18.0)
    }

    fn report(bet_type: BetType, signal: f64, weight: f64) -> FactorReport {
        let key = match bet_type {
            BetType::Total => FactorKey::PaceIndex,
            _ => FactorKey::NetRating,
        };
        FactorReport {
            bet_type,
            results: vec![
                FactorComputationResult::computed(key, bet_type, signal, 2.0, "t").with_weight(weight),
            ],
            baseline: ScorePrediction::new(110.0, 112.0, 99.5),
        }
    }

    fn head(bet_type: BetType, side: Side, deviation: f64, ev_pct: f64) -> PredictionHead {
        PredictionHead {
            bet_type,
            side,
            true_line: deviation,
            market_line: 0.0,
            deviation,
            win_probability: 0.55,
            expected_value: ev_pct / 100.0,
            ev_percentage: ev_pct,
            offered_odds: Some(AmericanOdds::STANDARD),
            threshold_reason: None,
        }
    }

    #[test]
    fn test_spread_line_convention() {
        // Market: away +4.5 ⇒ implied margin −4.5. Prediction: away loses by 1.
        let prediction = ScorePrediction::from_lines(226.0, -1.0, 100.0);
        let market = MarketOdds::new(4.5, 228.5);
        let h = evaluator().spread_head(&prediction, &market);
        assert_eq!(h.market_line, -4.5);
        assert_eq!(h.deviation, 3.5);
        assert_eq!(h.side, Side::Away);
        assert!((h.win_probability - normal_cdf(3.5 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_total_under() {
        let prediction = ScorePrediction::from_lines(220.0, 0.0, 100.0);
        let market = MarketOdds::new(0.0, 228.5);
        let h = evaluator().total_head(&prediction, &market);
        assert_eq!(h.side, Side::Under);
        assert_eq!(h.deviation, -8.5);
        assert!(h.expected_value > 0.0);
    }

    #[test]
    fn test_moneyline_market_line_from_no_vig() {
        let prediction = ScorePrediction::from_lines(220.0, 3.0, 100.0);
        let market = MarketOdds::new(0.0, 220.0).with_moneylines(
            AmericanOdds::try_new(-110.0).unwrap(),
            AmericanOdds::try_new(-110.0).unwrap(),
        );
        let h = evaluator().moneyline_head(&prediction, &market);
        assert!(h.market_line.abs() < 1e-6);
        assert_eq!(h.side, Side::Away);
        assert!((h.win_probability - normal_cdf(3.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_moneyline_without_prices_fails() {
        let prediction = ScorePrediction::from_lines(220.0, 3.0, 100.0);
        let h = evaluator().moneyline_head(&prediction, &MarketOdds::new(0.0, 220.0));
        assert!(!h.passed());
        assert!(h.offered_odds.is_none());
    }

    #[test]
    fn test_ev_gate_cites_ev() {
        let mut h = head(BetType::Total, Side::Over, 5.0, 1.5);
        evaluator().gate(&mut h, &report(BetType::Total, 0.5, 40.0));
        let reason = h.threshold_reason.unwrap();
        assert!(reason.starts_with("total: EV 1.50%"), "{reason}");
    }

    #[test]
    fn test_deviation_gate() {
        let mut h = head(BetType::Spread, Side::Away, 1.0, 5.0);
        evaluator().gate(&mut h, &report(BetType::Spread, 0.5, 40.0));
        assert!(h.threshold_reason.unwrap().contains("deviation"));
    }

    #[test]
    fn test_attribution_gate_requires_same_direction() {
        let mut h = head(BetType::Spread, Side::Away, 6.0, 10.0);
        evaluator().gate(&mut h, &report(BetType::Spread, -0.5, 40.0));
        assert_eq!(
            h.threshold_reason.as_deref(),
            Some("spread: no factor supports away")
        );

        let mut h = head(BetType::Spread, Side::Away, 6.0, 10.0);
        evaluator().gate(&mut h, &report(BetType::Spread, 0.5, 40.0));
        assert!(h.passed());
    }

    #[test]
    fn test_slippage_gate() {
        // 2.2 pts of edge left after slippage: p ≈ 0.549, below the −250
        // break-even of ≈ 0.714.
        let mut h = head(BetType::Total, Side::Over, 3.2, 3.0);
        h.offered_odds = Some(AmericanOdds::try_new(-250.0).unwrap());
        evaluator().gate(&mut h, &report(BetType::Total, 0.5, 40.0));
        assert!(h.threshold_reason.unwrap().contains("slippage"));
    }

    #[test]
    fn test_all_fail_joins_reasons() {
        let heads = vec![
            head(BetType::Spread, Side::Away, 0.1, 0.5),
            head(BetType::Total, Side::Over, 0.1, 0.5),
            head(BetType::Moneyline, Side::Away, 0.1, 0.5),
        ]
        .into_iter()
        .map(|mut h| {
            let r = report(h.bet_type, 0.0, 40.0);
            evaluator().gate(&mut h, &r);
            h
        })
        .collect::<Vec<_>>();
        let decision = evaluator().decide(
            &heads,
            &Matchup::new("LAL", "BOS"),
            &MarketOdds::new(4.5, 228.5),
            &KellySizer::default(),
            dec!(1000),
        );
        match decision {
            Decision::NoPick { reason } => assert_eq!(reason.matches("; ").count(), 2),
            Decision::Pick(_) => panic!("expected no pick"),
        }
    }

    #[test]
    fn test_highest_ev_wins_and_selection_format() {
        let heads = vec![
            head(BetType::Spread, Side::Home, -4.0, 4.0),
            head(BetType::Total, Side::Over, 6.0, 6.0),
        ];
        let matchup = Matchup::new("LAL", "BOS");
        let market = MarketOdds::new(4.5, 228.5);
        let decision =
            evaluator().decide(&heads, &matchup, &market, &KellySizer::default(), dec!(1000));
        let pick = decision.pick().unwrap();
        assert_eq!(pick.bet_type, BetType::Total);
        assert_eq!(pick.selection, "OVER 228.5");
        assert!(!pick.stake.is_zero());

        assert_eq!(selection(&heads[0], &matchup, &market), "BOS -4.5");
    }
}
