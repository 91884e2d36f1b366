//! Factor catalog listing.

use anyhow::Result;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::FactorsArgs;
use super::output;
use crate::domain::catalog;
use crate::domain::{BetType, FactorDefinition, FactorStatus, Sport};

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Max pts")]
    max_points: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&FactorDefinition> for FactorRow {
    fn from(def: &FactorDefinition) -> Self {
        Self {
            key: def.key.as_str(),
            name: def.name,
            weight: format!("{:.0}", def.default_weight),
            max_points: format!("{:.1}", def.max_points),
            status: match def.status {
                FactorStatus::Active => "active",
                FactorStatus::Planned => "planned",
            },
        }
    }
}

/// List the catalog for one bet type, or both factor groups.
///
/// # Errors
///
/// Returns an error if a catalog is missing.
pub fn execute(args: &FactorsArgs) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let groups = match args.bet_type {
        Some(bet_type) => vec![bet_type.factor_group()],
        None => vec![BetType::Total, BetType::Spread],
    };

    if output::is_json() {
        let mut catalogs = Vec::with_capacity(groups.len());
        for bet_type in &groups {
            let factors: Vec<_> = catalog::catalog(Sport::Nba, *bet_type)?
                .iter()
                .map(|def| {
                    json!({
                        "key": def.key,
                        "name": def.name,
                        "description": def.description,
                        "default_weight": def.default_weight,
                        "max_points": def.max_points,
                        "scope": def.scope,
                        "sources": def.sources,
                        "status": def.status,
                    })
                })
                .collect();
            catalogs.push(json!({ "bet_type": bet_type, "factors": factors }));
        }
        output::json_output(&json!({ "command": "factors", "catalogs": catalogs }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    for bet_type in groups {
        output::section(&format!("{} {} factors", Sport::Nba, bet_type));
        let rows: Vec<FactorRow> = catalog::catalog(Sport::Nba, bet_type)?
            .iter()
            .map(FactorRow::from)
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    output::hint(&format!(
        "run {} to rescale a profile",
        output::highlight("capline normalize <profile.json>")
    ));
    Ok(())
}
