//! End-to-end CLI tests for the `pd` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn test_help_shows_subcommands() {
    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("date itinerary planner"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("logs"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("perfectdate"));
}

#[test]
fn test_plan_rejects_bad_time_of_day() {
    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.args(["plan", "--time-of-day", "midnight"]).assert().failure();
}

#[test]
fn test_plan_rejects_bad_format() {
    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.args(["plan", "--format", "xml"]).assert().failure();
}

/// Config pointing at an unroutable endpoint so the request fails fast
fn unreachable_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "llm:\n  base-url: http://127.0.0.1:1\n  timeout-ms: 2000\n  api-key-env: PERFECTDATE_UNSET_TEST_KEY"
    )
    .unwrap();
    file
}

#[test]
fn test_plan_falls_back_when_endpoint_unreachable() {
    let config = unreachable_config();

    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.args(["--config"])
        .arg(config.path())
        .args(["plan", "--location", "London", "--date", "2026-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Perfect Evening Date in London"))
        .stdout(predicate::str::contains("Sunset Dinner at Sky Garden"))
        .stderr(predicate::str::contains("showing demo itinerary"));
}

#[test]
fn test_plan_json_output_is_parseable() {
    let config = unreachable_config();

    let mut cmd = Command::cargo_bin("pd").unwrap();
    let output = cmd
        .args(["--config"])
        .arg(config.path())
        .args(["plan", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let itinerary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(itinerary["title"], "Perfect Evening Date in London");
    assert_eq!(itinerary["activities"].as_array().unwrap().len(), 2);
    assert_eq!(itinerary["activities"][0]["weather"], "Indoor");
}
