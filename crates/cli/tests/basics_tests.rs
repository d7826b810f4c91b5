//! Commands that work without a backend.

mod common;

use common::*;

#[test]
fn test_help_lists_resource_commands() {
    provisio_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("deployments"))
        .stdout(predicates::str::contains("business-units"))
        .stdout(predicates::str::contains("plugins"));
}

#[test]
fn test_completions_ignore_broken_environment() {
    provisio_cmd()
        .env("PROVISIO_TIMEOUT", "not-a-number")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("provisio"));
}

#[test]
fn test_invalid_timeout_env_fails_config() {
    provisio_cmd()
        .env("PROVISIO_TIMEOUT", "not-a-number")
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("PROVISIO_TIMEOUT"));
}

#[test]
fn test_invalid_poll_interval_env_is_a_config_error() {
    provisio_cmd()
        .env("PROVISIO_POLL_INTERVAL_MS", "fast")
        .args(["completions", "zsh"])
        .assert()
        .success();
    provisio_cmd()
        .env("PROVISIO_POLL_INTERVAL_MS", "fast")
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("PROVISIO_POLL_INTERVAL_MS"));
}

#[test]
fn test_config_show_merges_env_and_flags() {
    let session = SeededSession::empty();
    provisio_cmd()
        .env("PROVISIO_API_URL", "https://provisio.example.com")
        .env("PROVISIO_SESSION_FILE", &session.path)
        .args(["config", "show", "--timeout", "45"])
        .assert()
        .success()
        .stdout(predicates::str::contains("https://provisio.example.com"))
        .stdout(predicates::str::contains("45s"));
}

#[test]
fn test_config_show_json() {
    let session = SeededSession::empty();
    let assert = provisio_cmd()
        .env("PROVISIO_SESSION_FILE", &session.path)
        .args(["config", "show", "-o", "json"])
        .assert()
        .success();
    let config: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(config["connection"]["base_url"], "http://localhost:8000");
}

#[test]
fn test_unknown_output_format_is_rejected() {
    let session = SeededSession::empty();
    provisio_cmd()
        .env("PROVISIO_SESSION_FILE", &session.path)
        .args(["config", "show", "-o", "yaml"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Valid options: json, table"))
        .stdout(predicates::str::is_empty());
}
