use std::process::ExitCode;

use capline::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use capline::adapter::inbound::cli::output::{self, OutputConfig};
use capline::adapter::inbound::cli::{check, evaluate, factors, normalize};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(
        OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        cli.color,
    );

    let result = match &cli.command {
        Commands::Evaluate(args) => evaluate::execute(args).await,
        Commands::Normalize(args) => normalize::execute(args),
        Commands::Factors(args) => factors::execute(args),
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
