//! Market lines offered for a matchup.

use serde::{Deserialize, Serialize};

use super::odds::AmericanOdds;

/// Lines and prices for the three markets.
///
/// Spreads are quoted from the away side: `away_spread = +4.5` means the
/// away team is getting 4.5 points. Moneylines are optional; a board without
/// them leaves the moneyline head unpriced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    pub away_spread: f64,
    #[serde(default)]
    pub away_spread_odds: AmericanOdds,
    #[serde(default)]
    pub home_spread_odds: AmericanOdds,
    pub total: f64,
    #[serde(default)]
    pub over_odds: AmericanOdds,
    #[serde(default)]
    pub under_odds: AmericanOdds,
    #[serde(default)]
    pub away_moneyline: Option<AmericanOdds>,
    #[serde(default)]
    pub home_moneyline: Option<AmericanOdds>,
}

impl MarketOdds {
    /// Board with standard -110 prices and no moneylines.
    #[must_use]
    pub fn new(away_spread: f64, total: f64) -> Self {
        Self {
            away_spread,
            away_spread_odds: AmericanOdds::STANDARD,
            home_spread_odds: AmericanOdds::STANDARD,
            total,
            over_odds: AmericanOdds::STANDARD,
            under_odds: AmericanOdds::STANDARD,
            away_moneyline: None,
            home_moneyline: None,
        }
    }

    #[must_use]
    pub fn with_moneylines(mut self, away: AmericanOdds, home: AmericanOdds) -> Self {
        self.away_moneyline = Some(away);
        self.home_moneyline = Some(home);
        self
    }

    /// Market-implied away margin: the negated away spread.
    #[must_use]
    pub fn implied_away_margin(&self) -> f64 {
        -self.away_spread
    }

    /// Both moneylines, when offered.
    #[must_use]
    pub fn moneylines(&self) -> Option<(AmericanOdds, AmericanOdds)> {
        Some((self.away_moneyline?, self.home_moneyline?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_default_to_standard() {
        let json = r#"{"away_spread": 4.5, "total": 228.5}"#;
        let market: MarketOdds = serde_json::from_str(json).unwrap();
        assert_eq!(market.over_odds, AmericanOdds::STANDARD);
        assert_eq!(market.implied_away_margin(), -4.5);
        assert!(market.moneylines().is_none());
    }
}
