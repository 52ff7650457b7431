//! Integration tests for the `wax` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live access point.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wax` binary with env isolation.
///
/// Clears all `WAXWING_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wax_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wax").unwrap();
    cmd.env("HOME", "/tmp/waxwing-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/waxwing-cli-test-nonexistent")
        .env_remove("WAXWING_PROFILE")
        .env_remove("WAXWING_DEVICE")
        .env_remove("WAXWING_USERNAME")
        .env_remove("WAXWING_PASSWORD")
        .env_remove("WAXWING_OUTPUT")
        .env_remove("WAXWING_INSECURE")
        .env_remove("WAXWING_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wax_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wax_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("access points")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("ssids"))
            .and(predicate::str::contains("firmware")),
    );
}

#[test]
fn test_version_flag() {
    wax_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wax"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    wax_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    wax_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config commands (no device needed) ──────────────────────────────

#[test]
fn test_config_path_prints_a_path() {
    wax_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    wax_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

// ── Missing configuration ───────────────────────────────────────────

#[test]
fn test_status_without_config_fails_with_help() {
    let output = wax_cmd().arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("wax config init"),
        "Expected config hint in output:\n{text}"
    );
}

#[test]
fn test_unknown_profile_exits_not_found() {
    let output = wax_cmd()
        .args(["status", "--profile", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(
        text.contains("nope"),
        "Expected profile name in output:\n{text}"
    );
}

// ── SSID argument validation ────────────────────────────────────────

#[test]
fn test_ssid_enable_requires_group_id() {
    let output = wax_cmd().args(["ssid", "enable"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
