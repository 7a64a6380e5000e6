//! Integration tests for `themeforge check`
//!
//! Validates component trees through the binary without building.

mod common;

use common::TestTheme;
use std::process::Command;

fn run_check(theme: &TestTheme, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_themeforge"));
    cmd.arg("check").arg(theme.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute themeforge check")
}

#[test]
fn test_check_valid_theme() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();

    let output = run_check(&theme, &[]);
    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("test-theme"));
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_check_json_summary() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();

    let output = run_check(&theme, &["--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(summary["name"], "test-theme");
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["modules"], 1);
    assert_eq!(summary["contents"], 2);
}

#[test]
fn test_check_directory_without_manifest_fails() {
    let theme = TestTheme::new();

    let output = run_check(&theme, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("properties.yaml"), "stderr: {stderr}");
}

#[test]
fn test_check_broken_reference_fails() {
    let theme = TestTheme::new();
    theme.create_file(
        "properties.yaml",
        "name: broken\ncomponents:\n  - $ref: missing.scss\n",
    );

    let output = run_check(&theme, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.scss"), "stderr: {stderr}");
}

#[test]
fn test_check_invalid_selection_fails() {
    let theme = TestTheme::new();
    theme.create_file("a.scss", "");
    theme.create_file(
        "properties.yaml",
        "name: broken\noneof: true\nselected: 5\ncomponents:\n  - $ref: a.scss\n",
    );

    let output = run_check(&theme, &[]);
    assert!(!output.status.success());
}
