//! Handler for `capline normalize`.

use anyhow::{Context, Result};
use tabled::{Table, Tabled};

use super::command::NormalizeArgs;
use super::output;
use crate::domain::CapperProfile;

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Enabled")]
    enabled: bool,
    #[tabled(rename = "Before")]
    before: String,
    #[tabled(rename = "After")]
    after: String,
}

/// Rescale a profile's enabled weights to the budget.
///
/// JSON mode prints the normalized profile; otherwise a before/after table.
///
/// # Errors
///
/// Returns an error if the profile cannot be read, fails validation, or the
/// budget is not positive.
pub fn execute(args: &NormalizeArgs) -> Result<()> {
    let path = &args.profile;
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let profile: CapperProfile =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    profile.validate()?;
    let normalized = profile.normalized(args.budget)?;

    if output::is_json() {
        output::json_output(&serde_json::to_value(&normalized)?);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("{} ({} {})", normalized.name, normalized.sport, normalized.bet_type));

    let rows: Vec<WeightRow> = profile
        .factors
        .iter()
        .zip(&normalized.factors)
        .map(|(before, after)| WeightRow {
            factor: after.key.to_string(),
            enabled: after.enabled,
            before: format!("{:.2}", before.weight),
            after: format!("{:.2}", after.weight),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::field("Budget", format!("{:.2}", args.budget));
    output::field("Sum", format!("{:.2}", normalized.budget_sum()));
    Ok(())
}
