//! Integration tests for the onaptests binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::MockServer;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn onaptests() -> Command {
    let mut cmd = Command::new(cargo_bin("onaptests"));
    cmd.env_remove("ONAPTESTS_SETTINGS").env_remove("RUST_LOG");
    cmd
}

fn write_settings(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("settings.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    onaptests()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("End-to-end lifecycle test scenarios"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    onaptests()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    onaptests().assert().failure();
    Ok(())
}

#[test]
fn list_shows_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    onaptests()
        .args(["--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("basic_onboard"))
        .stdout(predicate::str::contains("basic_network"))
        .stdout(predicate::str::contains("basic_vm"));
    Ok(())
}

#[test]
fn list_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let output = onaptests().args(["list", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["basic_onboard", "basic_network", "basic_vm"]);
    Ok(())
}

#[test]
fn run_unknown_scenario_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>> {
    onaptests()
        .args(["--no-color", "run", "does_not_exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown scenario: does_not_exist"));
    Ok(())
}

#[test]
fn run_with_invalid_settings_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>>
{
    let temp = TempDir::new()?;
    let settings = write_settings(&temp, "customer: acme\n");

    onaptests()
        .arg("--settings")
        .arg(&settings)
        .args(["--no-color", "run", "basic_vm"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tenant_id"));
    Ok(())
}

#[test]
fn settings_path_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let settings = write_settings(&temp, "cloud_region:\n  tenant_id: t1\n");

    onaptests()
        .env("ONAPTESTS_SETTINGS", &settings)
        .args(["--no-color", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings are valid"));
    Ok(())
}

#[test]
fn validate_reports_problems() -> Result<(), Box<dyn std::error::Error>> {
    onaptests()
        .args(["--no-color", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cloud_region.tenant_id"));
    Ok(())
}

#[test]
fn validate_missing_settings_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    onaptests()
        .arg("--settings")
        .arg(temp.path().join("missing.yaml"))
        .args(["--no-color", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn run_against_failing_platform_writes_reports() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let catch_all = server.mock(|_when, then| {
        then.status(500).body("platform unavailable");
    });

    let temp = TempDir::new()?;
    let url = server.base_url();
    let settings = write_settings(
        &temp,
        &format!(
            r#"
cloud_region:
  tenant_id: t1
http_timeout_secs: 5
endpoints:
  sdc: {{ url: "{url}" }}
  sdc_onboarding: {{ url: "{url}" }}
  aai: {{ url: "{url}" }}
  so: {{ url: "{url}" }}
"#
        ),
    );
    let reports = temp.path().join("reports");

    onaptests()
        .arg("--settings")
        .arg(&settings)
        .args(["--no-color", "run", "basic_vm", "--reports-dir"])
        .arg(&reports)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Scenario failed"));

    assert!(catch_all.calls() > 0);
    assert!(reports.join("reporting.html").exists());

    // The JSON report can be shown again, and still fails the gate.
    onaptests()
        .args(["--no-color", "show"])
        .arg(reports.join("reporting.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("basic_vm"))
        .stdout(predicate::str::contains("FAIL"));
    Ok(())
}

#[test]
fn show_missing_report_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    onaptests()
        .args(["--no-color", "show"])
        .arg(temp.path().join("reporting.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot read report"));
    Ok(())
}
