use std::path::Path;

use anyhow::{Context, Result};

use crate::adapter::inbound::cli::output;
use crate::domain::catalog;
use crate::domain::{BetType, Sport};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Validate a configuration file without evaluating anything.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed or fails validation,
/// or if the configured impact table cannot be loaded.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config =
        Config::load(path).with_context(|| format!("invalid config {}", path.display()))?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    let engine = config.engine_config();
    output::section("Summary");
    output::field("Budget", format!("{:.2}", engine.budget));
    output::field(
        "Sigmas",
        format!("margin {:.1}, total {:.1}", engine.sigma_margin, engine.sigma_total),
    );
    output::field(
        "Min EV",
        format!("{:.2}%", engine.gates.min_ev_pct),
    );
    output::field(
        "Kelly",
        format!(
            "{:.2} x bankroll {}, unit {:.1}%",
            engine.sizer.fraction,
            engine.bankroll,
            engine.sizer.unit_ratio * 100.0
        ),
    );
    output::field("Impact", format!("{} ms", config.impact.timeout_ms));

    for bet_type in [BetType::Total, BetType::Spread] {
        catalog::catalog(Sport::Nba, bet_type)
            .and_then(|defs| catalog::validate(defs, bet_type))
            .with_context(|| format!("{bet_type} catalog"))?;
    }
    output::success("Factor catalogs are valid");

    match bootstrap::build_impact(&config)? {
        Some(_) => output::success("Impact table loaded"),
        None => output::field("Impact table", "none (injury factor stays neutral)"),
    }

    output::success("Configuration check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_valid_config_passes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nbudget = 250.0").unwrap();
        assert!(execute_config(file.path()).is_ok());
    }

    #[test]
    fn test_invalid_config_fails_with_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[kelly]\nfraction = 2.0").unwrap();
        let err = execute_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("fraction"));
    }
}
