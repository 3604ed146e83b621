//! Smoke tests for caminador CLI
//!
//! These tests verify basic CLI functionality works correctly.
//! Rendering is disabled or pointed at a missing program so no Graphviz
//! installation is needed.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the caminador binary
fn caminador() -> Command {
    Command::cargo_bin("caminador").expect("caminador binary should exist")
}

const FORM: &str = r"
name: example
fields:
  - name: ef
    kind: enumerated
    values:
      - { label: a, value: 1 }
      - { label: b, value: 2 }
    invalid:
      - { label: bad, value: 9 }
  - name: nf
    kind: integer
    min: 4
    max: 9
";

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    caminador()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    caminador()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("walk"))
        .stdout(predicate::str::contains("cases"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_shows_help() {
    caminador().assert().failure(); // Requires a subcommand
}

#[test]
fn test_walk_subcommand_help() {
    caminador()
        .args(["walk", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-render"))
        .stdout(predicate::str::contains("--fail-on-defect"));
}

// ============================================================================
// Walk Tests
// ============================================================================

#[test]
fn test_walk_writes_description() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("graphs/checkout.png");

    caminador()
        .args(["--color", "never", "walk", "--no-render", "-p", "1", "--seed", "3", "-o"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("CLEAN 6 routes at p1"));

    let dot = fs::read_to_string(temp.path().join("graphs/checkout.gv")).unwrap();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("\"package\\ngift\" -> \"package\\ngift\""));
    assert!(!image.exists());
}

#[test]
fn test_walk_default_output_location() {
    let temp = TempDir::new().unwrap();

    caminador()
        .current_dir(temp.path())
        .args(["walk", "--no-render", "-p", "0"])
        .assert()
        .success();

    assert!(temp.path().join("output/flow.gv").exists());
}

#[test]
fn test_walk_json_summary() {
    let temp = TempDir::new().unwrap();

    let output = caminador()
        .current_dir(temp.path())
        .args(["walk", "--no-render", "-p", "1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["routes"], 6);
    assert_eq!(json["priority"], 1);
    assert_eq!(json["finished"], 4);
    assert_eq!(json["domain_errors"], 2);
    assert_eq!(json["defects"].as_array().unwrap().len(), 0);
}

#[test]
fn test_walk_lists_routes() {
    let temp = TempDir::new().unwrap();

    caminador()
        .current_dir(temp.path())
        .args(["--color", "never", "walk", "--no-render", "-p", "0", "--routes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "submit order --[gift wrap pay online]--> online payment",
        ))
        .stdout(predicate::str::contains("order complete"));
}

#[test]
fn test_walk_missing_graphviz_is_a_warning() {
    let temp = TempDir::new().unwrap();

    caminador()
        .current_dir(temp.path())
        .args(["walk", "-p", "0", "--graphviz"])
        .arg(temp.path().join("no-such-dot"))
        .assert()
        .success()
        .stderr(predicate::str::contains("graph description kept"));

    assert!(temp.path().join("output/flow.gv").exists());
}

#[test]
fn test_walk_fail_on_defect_with_clean_walk() {
    let temp = TempDir::new().unwrap();

    caminador()
        .current_dir(temp.path())
        .args(["-q", "walk", "--no-render", "--fail-on-defect"])
        .assert()
        .success();
}

#[test]
fn test_walk_reads_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("walk.yaml");
    fs::write(&config, "priority: 0\nseed: 1\nrender: false\noutput: cfg/out.svg\n").unwrap();

    caminador()
        .current_dir(temp.path())
        .args(["--color", "never", "walk", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 routes at p0"));

    assert!(temp.path().join("cfg/out.gv").exists());
}

#[test]
fn test_walk_bad_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("walk.yaml");
    fs::write(&config, "priority: [nope]\n").unwrap();

    caminador()
        .args(["walk", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// Cases Tests
// ============================================================================

#[test]
fn test_cases_text() {
    let temp = TempDir::new().unwrap();
    let form = temp.path().join("form.yaml");
    fs::write(&form, FORM).unwrap();

    caminador()
        .args(["cases", "-p", "0", "--seed", "1"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("(p0)\"a normal\""));
}

#[test]
fn test_cases_json() {
    let temp = TempDir::new().unwrap();
    let form = temp.path().join("form.yaml");
    fs::write(&form, FORM).unwrap();

    let output = caminador()
        .args(["cases", "--format", "json", "--seed", "1"])
        .arg(&form)
        .output()
        .unwrap();
    assert!(output.status.success());

    let cases: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cases.as_array().unwrap().len(), 9);
}

#[test]
fn test_cases_missing_file() {
    caminador()
        .args(["cases", "/nonexistent/form.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_cases_empty_form() {
    let temp = TempDir::new().unwrap();
    let form = temp.path().join("form.yaml");
    fs::write(&form, "fields: []\n").unwrap();

    caminador()
        .arg("cases")
        .arg(&form)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_shows_defaults() {
    caminador()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("priority: 2"))
        .stdout(predicate::str::contains("output: output/flow.png"));
}

#[test]
fn test_config_loads_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("walk.yaml");
    fs::write(&config, "priority: 0\n").unwrap();

    caminador()
        .args(["config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("priority: 0"));
}
