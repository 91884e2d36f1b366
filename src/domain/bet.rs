//! Sports, bet types and sides.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported sports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Nba,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nba => write!(f, "NBA"),
        }
    }
}

/// The three markets a matchup can be bet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Spread,
    Total,
    Moneyline,
}

impl BetType {
    /// All bet types in head evaluation order.
    pub const ALL: [Self; 3] = [Self::Spread, Self::Total, Self::Moneyline];

    /// Bet type whose factor catalog drives this market.
    ///
    /// Moneyline shares the spread group: both are margin markets.
    #[must_use]
    pub const fn factor_group(self) -> Self {
        match self {
            Self::Total => Self::Total,
            Self::Spread | Self::Moneyline => Self::Spread,
        }
    }

    /// Side favoured by a positive signal.
    #[must_use]
    pub const fn side_a(self) -> Side {
        match self {
            Self::Total => Side::Over,
            Self::Spread | Self::Moneyline => Side::Away,
        }
    }

    /// Side favoured by a negative signal.
    #[must_use]
    pub const fn side_b(self) -> Side {
        match self {
            Self::Total => Side::Under,
            Self::Spread | Self::Moneyline => Side::Home,
        }
    }

    /// Side picked by a signed quantity (positive → `a`).
    #[must_use]
    pub fn side_for(self, signed: f64) -> Side {
        if signed > 0.0 {
            self.side_a()
        } else {
            self.side_b()
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spread => "spread",
            Self::Total => "total",
            Self::Moneyline => "moneyline",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for BetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spread" | "ats" => Ok(Self::Spread),
            "total" | "totals" | "ou" => Ok(Self::Total),
            "moneyline" | "ml" => Ok(Self::Moneyline),
            other => Err(format!("unknown bet type '{other}'")),
        }
    }
}

/// A side of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
    Away,
    Home,
}

impl Side {
    /// True for the side favoured by a positive signal.
    #[must_use]
    pub const fn is_a(self) -> bool {
        matches!(self, Self::Over | Self::Away)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Over => "over",
            Self::Under => "under",
            Self::Away => "away",
            Self::Home => "home",
        };
        f.write_str(name)
    }
}
