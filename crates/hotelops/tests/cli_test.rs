//! Integration tests for the `hotelops` binary that need no backend:
//! argument parsing, help output, completions, config commands and the
//! errors raised before any request is sent.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `hotelops` binary with env isolation.
///
/// Clears all `HOTELOPS_*` env vars and points config and data directories
/// at `home` so tests never touch the user's real configuration.
fn hotelops_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hotelops");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("HOTELOPS_PROFILE")
        .env_remove("HOTELOPS_URL")
        .env_remove("HOTELOPS_API_KEY")
        .env_remove("HOTELOPS_OUTPUT")
        .env_remove("HOTELOPS_INSECURE")
        .env_remove("HOTELOPS_TIMEOUT")
        .env_remove("HOTELOPS_EMAIL")
        .env_remove("HOTELOPS_PASSWORD");
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
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("rooms")
            .and(predicate::str::contains("bookings"))
            .and(predicate::str::contains("orders"))
            .and(predicate::str::contains("inventory"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hotelops"));
}

#[test]
fn test_subcommand_help() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["orders", "place", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--item").and(predicate::str::contains("--room")));
}

#[test]
fn test_unknown_output_format_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["-o", "xml", "rooms", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_place_requires_an_item() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["orders", "place", "--room", "101"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--item"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hotelops"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_under_config_home() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("config.toml").and(predicate::str::contains("session.json")),
        );
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]").and(predicate::str::contains("timeout = 30")));
}

#[test]
fn test_config_show_masks_keys() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("config").join("hotelops");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "default_profile = \"main\"\n\n[profiles.main]\nurl = \"https://abc.example.com\"\napi_key = \"sekrit\"\n",
    )
    .unwrap();

    hotelops_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.main]")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("sekrit").not()),
        );
}

// ── Errors before any request ───────────────────────────────────────

#[test]
fn test_no_backend_configured() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["rooms", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("No backend configured"), "got:\n{text}");
    assert!(text.contains("config init"), "got:\n{text}");
}

#[test]
fn test_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["--profile", "ghost", "rooms", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("ghost"));
}

#[test]
fn test_non_http_url_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    hotelops_cmd(home.path())
        .args(["--url", "ftp://example.com", "rooms", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_bad_item_spec_is_rejected_before_connecting() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["--url", "http://127.0.0.1:9", "orders", "place", "--room", "101", "--item", "m-1:0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("at least 1"));
}

#[test]
fn test_bad_date_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args([
            "--url",
            "http://127.0.0.1:9",
            "bookings",
            "quote",
            "--room",
            "101",
            "--check-in",
            "tomorrow",
            "--check-out",
            "2024-01-03",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("check-in"));
}

#[test]
fn test_whoami_without_session() {
    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["--url", "http://127.0.0.1:9", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not signed in"));
}

#[test]
fn test_unreachable_backend_is_connection_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let home = tempfile::tempdir().unwrap();
    let output = hotelops_cmd(home.path())
        .args(["--url", &format!("http://127.0.0.1:{port}"), "rooms", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}
