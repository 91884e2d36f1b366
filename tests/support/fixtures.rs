use std::io::Write;

use capline::domain::{DataBundle, TeamStats};
use capline::testkit::domain::bundle;
use tempfile::NamedTempFile;

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("capline-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

/// Two distinct teams with every statistic filled.
pub fn full_bundle() -> DataBundle {
    let away = TeamStats {
        pace: Some(101.2),
        offensive_rating: Some(117.3),
        defensive_rating: Some(112.8),
        three_point_attempt_rate: Some(0.42),
        three_point_pct: Some(0.372),
        recent_three_point_pct: Some(0.401),
        free_throw_rate: Some(0.27),
        effective_fg_pct: Some(0.561),
        turnover_pct: Some(0.128),
        offensive_rebound_pct: Some(0.27),
        rebound_share: Some(0.515),
        home_win_pct: Some(0.62),
        road_win_pct: Some(0.49),
        rest_days: Some(0),
    };
    let home = TeamStats {
        pace: Some(97.6),
        offensive_rating: Some(111.9),
        defensive_rating: Some(115.4),
        three_point_attempt_rate: Some(0.36),
        three_point_pct: Some(0.351),
        recent_three_point_pct: Some(0.330),
        free_throw_rate: Some(0.23),
        effective_fg_pct: Some(0.528),
        turnover_pct: Some(0.146),
        offensive_rebound_pct: Some(0.23),
        rebound_share: Some(0.488),
        home_win_pct: Some(0.58),
        road_win_pct: Some(0.41),
        rest_days: Some(2),
    };
    bundle(away, home)
}

pub const CONFIG_TOML: &str = r#"
[logging]
level = "warn"
format = "compact"

[engine]
budget = 250.0
sigma_margin = 12.0
sigma_total = 18.0

[gates]
min_ev_pct = 2.0

[kelly]
fraction = 0.25
bankroll = 1000
"#;

pub const GAME_JSON: &str = r#"{
  "matchup": { "away": "AWY", "home": "HOM" },
  "market": { "away_spread": 0.0, "total": 226.0, "away_moneyline": 105, "home_moneyline": -125 },
  "bundle": {
    "matchup": { "away": "AWY", "home": "HOM" },
    "away": { "pace": 99.5, "offensive_rating": 112.0, "defensive_rating": 116.0 },
    "home": { "pace": 99.5, "offensive_rating": 118.0, "defensive_rating": 111.0 }
  }
}"#;

/// Same game without a bundle; the stats come from [`SNAPSHOT_JSON`].
pub const BARE_GAME_JSON: &str = r#"{
  "matchup": { "away": "AWY", "home": "HOM" },
  "market": { "away_spread": 0.0, "total": 226.0 }
}"#;

pub const SNAPSHOT_JSON: &str = r#"{
  "teams": {
    "AWY": { "pace": 99.5, "offensive_rating": 112.0, "defensive_rating": 116.0, "rest_days": 0 },
    "HOM": { "pace": 99.5, "offensive_rating": 118.0, "defensive_rating": 111.0, "rest_days": 2 }
  }
}"#;

/// Totals profile with three equally weighted factors.
pub const PROFILE_JSON: &str = r#"{
  "capper_id": "sharp",
  "sport": "nba",
  "bet_type": "total",
  "name": "Tempo only",
  "factors": [
    { "key": "pace_index", "enabled": true, "weight": 20.0, "max_points": 2.0 },
    { "key": "offensive_form", "enabled": true, "weight": 20.0, "max_points": 2.0 },
    { "key": "defensive_erosion", "enabled": true, "weight": 20.0, "max_points": 2.0 },
    { "key": "total_edge", "enabled": true, "weight": 100.0, "max_points": 5.0 }
  ],
  "created_at": "2026-01-01T00:00:00Z",
  "updated_at": "2026-01-01T00:00:00Z"
}"#;
