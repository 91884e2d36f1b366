//! Handler for `capline evaluate`.
//!
//! The matchup file holds one game or an array of games:
//!
//! ```json
//! {
//!   "matchup": { "away": "BOS", "home": "LAL" },
//!   "market": { "away_spread": -4.5, "total": 228.5 },
//!   "bundle": { "matchup": { "away": "BOS", "home": "LAL" }, "away": {}, "home": {} }
//! }
//! ```
//!
//! Games without a `bundle` are fetched from `--snapshot` when given, and
//! evaluated on league baselines otherwise.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tabled::{Table, Tabled};

use super::command::EvaluateArgs;
use super::output;
use crate::application::engine::{Evaluation, EvaluationRequest};
use crate::domain::{
    BetType, Bundle, CapperProfile, DataBundle, Decision, FactorComputationResult, MarketOdds,
    Matchup, PredictionHead, ResultStatus, Sport,
};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// One game in a matchup file.
#[derive(Debug, Clone, Deserialize)]
pub struct GameInput {
    pub matchup: Matchup,
    pub market: MarketOdds,
    #[serde(default)]
    pub bundle: Option<DataBundle>,
}

/// A matchup file: a single game or a slate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GameFile {
    Slate(Vec<GameInput>),
    One(Box<GameInput>),
}

impl GameFile {
    #[must_use]
    pub fn into_games(self) -> Vec<GameInput> {
        match self {
            Self::Slate(games) => games,
            Self::One(game) => vec![*game],
        }
    }
}

/// Capper profiles used for every game in the run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSet {
    #[serde(default)]
    pub totals: Option<CapperProfile>,
    #[serde(default)]
    pub spread: Option<CapperProfile>,
}

impl ProfileSet {
    /// Resolve missing profiles to the catalog defaults.
    ///
    /// # Errors
    ///
    /// Fails only if a default catalog is missing.
    pub fn resolve(self) -> Result<(CapperProfile, CapperProfile)> {
        let totals = match self.totals {
            Some(profile) => profile,
            None => CapperProfile::default_for("default", Sport::Nba, BetType::Total)?,
        };
        let spread = match self.spread {
            Some(profile) => profile,
            None => CapperProfile::default_for("default", Sport::Nba, BetType::Spread)?,
        };
        Ok((totals, spread))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Evaluate every game in the matchup file and print the results.
///
/// # Errors
///
/// Returns an error if an input file cannot be read, the configuration is
/// invalid, or a profile fails validation.
pub async fn execute(args: &EvaluateArgs) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    config.init_logging(output::verbosity());

    let sink = bootstrap::build_sink();
    let engine = bootstrap::build_engine_with_sink(&config, Arc::clone(&sink))?;

    let games = read_json::<GameFile>(&args.matchup)?.into_games();
    let profiles = match &args.profiles {
        Some(path) => read_json::<ProfileSet>(path)?,
        None => ProfileSet::default(),
    };
    let (totals_profile, spread_profile) = profiles.resolve()?;

    let builder = args
        .snapshot
        .as_ref()
        .map(|path| bootstrap::build_bundle_builder(path, Arc::clone(&sink)))
        .transpose()?;

    let mut requests = Vec::with_capacity(games.len());
    for game in games {
        let request = EvaluationRequest {
            matchup: game.matchup,
            bundle: Bundle::from(game.bundle),
            market: game.market,
            totals_profile: totals_profile.clone(),
            spread_profile: spread_profile.clone(),
        };
        let request = match &builder {
            Some(builder) if !request.bundle.is_available() => {
                engine.prepare(builder, request).await
            }
            _ => request,
        };
        requests.push(request);
    }

    let evaluations = engine
        .evaluate_slate(&requests)
        .await
        .into_iter()
        .collect::<crate::error::Result<Vec<_>>>()?;

    if output::is_json() {
        let value = match evaluations.as_slice() {
            [single] => serde_json::to_value(single)?,
            many => serde_json::to_value(many)?,
        };
        output::json_output(&value);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    for evaluation in &evaluations {
        render(evaluation);
    }
    Ok(())
}

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Over/Away")]
    a: String,
    #[tabled(rename = "Under/Home")]
    b: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl From<&FactorComputationResult> for FactorRow {
    fn from(result: &FactorComputationResult) -> Self {
        Self {
            factor: result.key.to_string(),
            status: status_label(&result.status),
            signal: format!("{:+.3}", result.signal),
            a: format!("{:.2}", result.points.a()),
            b: format!("{:.2}", result.points.b()),
            weight: format!("{:.2}", result.weight),
            net: format!("{:+.2}", result.weighted_points()),
        }
    }
}

#[derive(Tabled)]
struct HeadRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "True")]
    true_line: String,
    #[tabled(rename = "Line")]
    market_line: String,
    #[tabled(rename = "Dev")]
    deviation: String,
    #[tabled(rename = "Win %")]
    win: String,
    #[tabled(rename = "EV %")]
    ev: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Gate")]
    gate: String,
}

impl From<&PredictionHead> for HeadRow {
    fn from(head: &PredictionHead) -> Self {
        Self {
            market: head.bet_type.to_string(),
            side: head.side.to_string(),
            true_line: format!("{:.1}", head.true_line),
            market_line: format!("{:.1}", head.market_line),
            deviation: format!("{:+.1}", head.deviation),
            win: format!("{:.1}", head.win_probability * 100.0),
            ev: format!("{:+.2}", head.ev_percentage),
            odds: head
                .offered_odds
                .map_or_else(|| "-".to_string(), |o| o.to_string()),
            gate: head
                .threshold_reason
                .clone()
                .unwrap_or_else(|| "pass".to_string()),
        }
    }
}

fn status_label(status: &ResultStatus) -> &'static str {
    match status {
        ResultStatus::Computed => "computed",
        ResultStatus::BadInput(_) => "bad_input",
        ResultStatus::Failed(_) => "failed",
        ResultStatus::NotImplemented => "planned",
        ResultStatus::Unavailable => "unavailable",
        ResultStatus::TimedOut => "timed_out",
    }
}

fn render(evaluation: &Evaluation) {
    let baseline = evaluation.totals.baseline;
    let prediction = evaluation.prediction;
    let matchup = &evaluation.matchup;

    output::section(&matchup.to_string());
    output::field(
        "Baseline",
        format!(
            "{} {:.1} - {} {:.1} (total {:.1})",
            matchup.away, baseline.away_score, matchup.home, baseline.home_score, baseline.total
        ),
    );
    output::field(
        "Predicted",
        format!(
            "{} {:.1} - {} {:.1} (total {:.1})",
            matchup.away,
            prediction.away_score,
            matchup.home,
            prediction.home_score,
            prediction.total
        ),
    );
    output::field(
        "Confidence",
        format!(
            "totals {:+.2}, spread {:+.2}",
            evaluation.confidence.totals, evaluation.confidence.spread
        ),
    );

    for (title, bet_type) in [("Totals factors", BetType::Total), ("Spread factors", BetType::Spread)] {
        let rows: Vec<FactorRow> = evaluation
            .factor_results(bet_type)
            .iter()
            .map(FactorRow::from)
            .collect();
        output::section(title);
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Heads");
    let rows: Vec<HeadRow> = evaluation.heads.iter().map(HeadRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    match &evaluation.decision {
        Decision::Pick(pick) => output::success(&format!(
            "Pick {} at {} (EV {}, {} units, {})",
            output::highlight(&pick.selection),
            pick.offered_odds,
            output::positive(format!("{:+.2}%", pick.ev_percentage)),
            pick.stake.units,
            pick.stake.amount.round_dp(2)
        )),
        Decision::NoPick { reason } => {
            output::warning(&format!("No pick: {}", output::muted(reason)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_file_accepts_single_and_slate() {
        let one = r#"{"matchup":{"away":"BOS","home":"LAL"},"market":{"away_spread":-4.5,"total":228.5}}"#;
        let games = serde_json::from_str::<GameFile>(one).unwrap().into_games();
        assert_eq!(games.len(), 1);
        assert!(games[0].bundle.is_none());

        let slate = format!("[{one},{one}]");
        let games = serde_json::from_str::<GameFile>(&slate).unwrap().into_games();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_missing_profiles_resolve_to_defaults() {
        let (totals, spread) = ProfileSet::default().resolve().unwrap();
        assert_eq!(totals.bet_type, BetType::Total);
        assert_eq!(spread.bet_type, BetType::Spread);
        assert!(totals.is_default);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(&ResultStatus::Computed), "computed");
        assert_eq!(status_label(&ResultStatus::Failed("x".into())), "failed");
        assert_eq!(status_label(&ResultStatus::TimedOut), "timed_out");
    }
}
