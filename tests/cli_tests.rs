//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use support::fixtures::{
    temp_file, BARE_GAME_JSON, CONFIG_TOML, GAME_JSON, PROFILE_JSON, SNAPSHOT_JSON,
};

fn capline() -> Command {
    let mut cmd = cargo_bin_cmd!("capline");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run capline");
    assert!(
        output.status.success(),
        "capline failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_help() {
    capline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("capline"))
        .stdout(predicate::str::contains("evaluate"))
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("factors"));
}

#[test]
fn test_version() {
    capline()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("capline"));
}

#[test]
fn test_factors_lists_both_catalogs() {
    capline()
        .args(["--color", "never", "factors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pace_index"))
        .stdout(predicate::str::contains("net_rating"))
        .stdout(predicate::str::contains("planned"));
}

#[test]
fn test_factors_moneyline_uses_spread_catalog() {
    capline()
        .args(["--color", "never", "factors", "--bet-type", "moneyline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home_court"))
        .stdout(predicate::str::contains("pace_index").not());
}

#[test]
fn test_factors_json() {
    let value = stdout_json(capline().args(["--json", "factors", "--bet-type", "total"]));
    assert_eq!(value["command"], "factors");
    let catalogs = value["catalogs"].as_array().unwrap();
    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0]["bet_type"], "total");
    let keys: Vec<&str> = catalogs[0]["factors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"total_edge"));
}

#[test]
fn test_check_config_valid() {
    let config = temp_file(CONFIG_TOML, ".toml");
    capline()
        .args(["--color", "never", "check", "config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Factor catalogs are valid"));
}

#[test]
fn test_check_config_invalid_exits_nonzero() {
    let config = temp_file("[kelly]\nfraction = 2.0\n", ".toml");
    capline()
        .args(["--color", "never", "check", "config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("fraction"));
}

#[test]
fn test_evaluate_json_single_game() {
    let config = temp_file(CONFIG_TOML, ".toml");
    let game = temp_file(GAME_JSON, ".json");
    let value = stdout_json(
        capline()
            .args(["--json", "evaluate", "--config"])
            .arg(config.path())
            .arg("--matchup")
            .arg(game.path()),
    );

    assert_eq!(value["matchup"]["away"], "AWY");
    assert_eq!(value["heads"].as_array().unwrap().len(), 3);
    assert_eq!(value["decision"]["decision"], "pick");
    assert!(value["totals"]["results"].as_array().unwrap().len() > 1);
}

#[test]
fn test_evaluate_json_slate_is_an_array() {
    let config = temp_file(CONFIG_TOML, ".toml");
    let slate = temp_file(&format!("[{GAME_JSON},{BARE_GAME_JSON}]"), ".json");
    let value = stdout_json(
        capline()
            .args(["--json", "evaluate", "-c"])
            .arg(config.path())
            .arg("-m")
            .arg(slate.path()),
    );

    let evaluations = value.as_array().unwrap();
    assert_eq!(evaluations.len(), 2);
    assert_eq!(evaluations[1]["decision"]["decision"], "no_pick");
}

#[test]
fn test_evaluate_fills_bundle_from_snapshot() {
    let config = temp_file(CONFIG_TOML, ".toml");
    let game = temp_file(BARE_GAME_JSON, ".json");
    let snapshot = temp_file(SNAPSHOT_JSON, ".json");
    let value = stdout_json(
        capline()
            .args(["--json", "evaluate", "--config"])
            .arg(config.path())
            .arg("--matchup")
            .arg(game.path())
            .arg("--snapshot")
            .arg(snapshot.path()),
    );

    assert!(value["prediction"]["away_margin"].as_f64().unwrap() < -10.0);
    assert_eq!(value["decision"]["decision"], "pick");
}

#[test]
fn test_evaluate_table_output() {
    let config = temp_file(CONFIG_TOML, ".toml");
    let game = temp_file(GAME_JSON, ".json");
    capline()
        .args(["--color", "never", "evaluate", "--config"])
        .arg(config.path())
        .arg("--matchup")
        .arg(game.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Totals factors"))
        .stdout(predicate::str::contains("Heads"))
        .stdout(predicate::str::contains("Pick"));
}

#[test]
fn test_verbose_flag_raises_log_level() {
    let config = temp_file(CONFIG_TOML, ".toml");
    let game = temp_file(GAME_JSON, ".json");

    capline()
        .args(["--json", "evaluate", "--config"])
        .arg(config.path())
        .arg("--matchup")
        .arg(game.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Factors evaluated").not());

    capline()
        .args(["--json", "-v", "evaluate", "--config"])
        .arg(config.path())
        .arg("--matchup")
        .arg(game.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Factors evaluated"));
}

#[test]
fn test_evaluate_missing_config_fails() {
    let game = temp_file(GAME_JSON, ".json");
    capline()
        .args(["evaluate", "--config", "/nonexistent/capline.toml", "--matchup"])
        .arg(game.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn test_normalize_table() {
    let profile = temp_file(PROFILE_JSON, ".json");
    capline()
        .args(["--color", "never", "normalize"])
        .arg(profile.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("83.34"))
        .stdout(predicate::str::contains("250.00"));
}

#[test]
fn test_normalize_json_custom_budget() {
    let profile = temp_file(PROFILE_JSON, ".json");
    let value = stdout_json(
        capline()
            .args(["--json", "normalize", "--budget", "90"])
            .arg(profile.path()),
    );

    let weights: Vec<f64> = value["factors"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["key"] != "total_edge")
        .map(|f| f["weight"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![30.0, 30.0, 30.0]);
}

#[test]
fn test_normalize_rejects_zero_budget() {
    let profile = temp_file(PROFILE_JSON, ".json");
    capline()
        .args(["normalize", "--budget", "0"])
        .arg(profile.path())
        .assert()
        .failure();
}
