//! Command-line interface definitions.
//!
//! Defines the CLI structure for the capline application using `clap`.
//! Subcommands evaluate matchups, normalize capper profiles, list the
//! factor catalog and validate configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::BetType;

/// Multi-factor matchup scoring and pick decisions
#[derive(Parser, Debug)]
#[command(name = "capline")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the capline CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one matchup (or a slate) and print the decision
    Evaluate(EvaluateArgs),

    /// Rescale a capper profile's weights to the budget
    Normalize(NormalizeArgs),

    /// List the factor catalog
    Factors(FactorsArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `capline check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `capline evaluate`.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Matchup JSON: one game object or an array of games
    #[arg(short, long)]
    pub matchup: PathBuf,

    /// Capper profiles JSON (`totals` and/or `spread`); catalog defaults otherwise
    #[arg(short, long)]
    pub profiles: Option<PathBuf>,

    /// Statistics snapshot JSON used for games that carry no bundle
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
}

/// Arguments for `capline normalize`.
#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Capper profile JSON
    pub profile: PathBuf,

    /// Weight budget to normalize to
    #[arg(short, long, default_value_t = crate::domain::catalog::DEFAULT_BUDGET)]
    pub budget: f64,
}

/// Arguments for `capline factors`.
#[derive(Parser, Debug)]
pub struct FactorsArgs {
    /// Only list the catalog for this bet type (spread, total, moneyline)
    #[arg(short, long)]
    pub bet_type: Option<BetType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_parses_paths() {
        let cli = Cli::parse_from([
            "capline",
            "evaluate",
            "--config",
            "c.toml",
            "--matchup",
            "game.json",
            "--profiles",
            "profiles.json",
        ]);
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.config, PathBuf::from("c.toml"));
                assert_eq!(args.matchup, PathBuf::from("game.json"));
                assert_eq!(args.profiles, Some(PathBuf::from("profiles.json")));
                assert!(args.snapshot.is_none());
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["capline", "factors", "--bet-type", "total", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Factors(args) => assert_eq!(args.bet_type, Some(BetType::Total)),
            other => panic!("expected factors, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_default_budget() {
        let cli = Cli::parse_from(["capline", "normalize", "profile.json"]);
        match cli.command {
            Commands::Normalize(args) => assert_eq!(args.budget, 250.0),
            other => panic!("expected normalize, got {other:?}"),
        }
    }

    #[test]
    fn test_check_config_default_path() {
        let cli = Cli::parse_from(["capline", "check", "config"]);
        match cli.command {
            Commands::Check(CheckCommand::Config(arg)) => {
                assert_eq!(arg.config, PathBuf::from("config.toml"));
            }
            other => panic!("expected check config, got {other:?}"),
        }
    }
}
