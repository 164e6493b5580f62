//! Integration tests for the `staywire` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring live upstream credentials.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `staywire` binary with env isolation.
///
/// Clears all `STAYWIRE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn staywire_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("staywire");
    cmd.env("HOME", "/tmp/staywire-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/staywire-cli-test-nonexistent")
        .env_remove("STAYWIRE_PROFILE")
        .env_remove("STAYWIRE_ENV")
        .env_remove("STAYWIRE_CLIENT_ID")
        .env_remove("STAYWIRE_CLIENT_SECRET")
        .env_remove("STAYWIRE_OFFICE_ID")
        .env_remove("STAYWIRE_OUTPUT")
        .env_remove("STAYWIRE_TIMEOUT");
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
    let output = staywire_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    staywire_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("hotel")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("offers"))
            .and(predicate::str::contains("content")),
    );
}

#[test]
fn test_version_flag() {
    staywire_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("staywire"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    staywire_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    staywire_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = staywire_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_search_no_credentials() {
    staywire_cmd()
        .args(["search", "city", "PAR"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("credentials")
                .or(predicate::str::contains("STAYWIRE_CLIENT_ID"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_offers_no_credentials() {
    staywire_cmd()
        .args([
            "offers",
            "HLPAR123",
            "--check-in",
            "2026-10-01",
            "--check-out",
            "2026-10-03",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("credentials")
                .or(predicate::str::contains("STAYWIRE_CLIENT_ID"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_offers_rejects_malformed_date() {
    let output = staywire_cmd()
        .args([
            "offers",
            "HLPAR123",
            "--check-in",
            "not-a-date",
            "--check-out",
            "2026-10-03",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected clap usage error");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("check-in"),
        "Expected date parse error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = staywire_cmd()
        .args(["--output", "invalid", "search", "city", "PAR"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_environment() {
    staywire_cmd()
        .args([
            "--environment",
            "staging",
            "--client-id",
            "id",
            "--client-secret",
            "shh",
            "search",
            "city",
            "PAR",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` renders the default config when no file exists.
    staywire_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path() {
    staywire_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_search_subcommands_exist() {
    staywire_cmd()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("city").and(predicate::str::contains("geo")));
}

#[test]
fn test_offers_flags_exist() {
    staywire_cmd()
        .args(["offers", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--check-in")
                .and(predicate::str::contains("--check-out"))
                .and(predicate::str::contains("--rate-codes")),
        );
}

// ── Offline listing ─────────────────────────────────────────────────

#[test]
fn test_rate_codes_requires_credentials() {
    // The listing is registry-backed but the client still needs
    // credentials to construct; without any it must fail cleanly.
    staywire_cmd()
        .arg("rate-codes")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("credentials")
                .or(predicate::str::contains("STAYWIRE_CLIENT_ID"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_rate_codes_with_flag_credentials() {
    staywire_cmd()
        .args([
            "--client-id",
            "id",
            "--client-secret",
            "shh",
            "rate-codes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("COR").and(predicate::str::contains("SIG")));
}
