//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory. Commands that mutate the journal are confined to one
//! sequential flow so the read-only tests can run in parallel.

use std::process::Command;

/// Invoke a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "onepromise-cli", "--"])
        .args(args)
        .env("ONEPROMISE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
fn run_cli_success(args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(args);
    assert_eq!(
        code, 0,
        "CLI command failed: {args:?}\nstderr: {stderr}"
    );
    stdout
}

#[test]
fn test_today_status_prints_snapshot() {
    let stdout = run_cli_success(&["today", "status"]);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(v["type"], "StateSnapshot");
    assert!(v["day_key"].as_str().unwrap().len() == 10);
}

#[test]
fn test_promise_reflect_flow() {
    run_cli_success(&["today", "reset"]);

    let made = run_cli_success(&["today", "promise", "Water the plants"]);
    assert!(made.contains("PromiseMade"));

    let status = run_cli_success(&["today", "status"]);
    let v: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(v["promise"], "Water the plants");

    let reflected = run_cli_success(&["today", "reflect", "up"]);
    assert!(reflected.contains("ReflectionRecorded"));
    assert!(reflected.contains("this week."));

    // The outcome is already recorded; a second reflection is refused.
    let (_, _, code) = run_cli(&["today", "reflect", "down"]);
    assert_ne!(code, 0);

    run_cli_success(&["today", "reset"]);
}

#[test]
fn test_blank_promise_is_rejected() {
    let (_, _, code) = run_cli(&["today", "promise", "   "]);
    assert_ne!(code, 0);
}

#[test]
fn test_reflect_requires_a_valid_thumb() {
    let (_, stderr, code) = run_cli(&["today", "reflect", "sideways"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("up") && stderr.contains("down"));
}

#[test]
fn test_history_list_is_json() {
    let stdout = run_cli_success(&["history", "list"]);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("list is JSON");
    assert!(v.is_array());
}

#[test]
fn test_history_week_has_headline() {
    let stdout = run_cli_success(&["history", "week"]);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("week is JSON");
    assert!(v["headline"].as_str().unwrap().starts_with("You kept"));
}

#[test]
fn test_history_repair_is_idempotent() {
    run_cli_success(&["history", "repair"]);
    let second = run_cli_success(&["history", "repair"]);
    assert!(second.contains("nothing to repair"));
}

#[test]
fn test_history_clear_requires_confirmation() {
    let (_, stderr, code) = run_cli(&["history", "clear"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));
}

#[test]
fn test_auth_status() {
    run_cli_success(&["auth", "status"]);
}

#[test]
fn test_notify_status_reports_a_known_state() {
    let stdout = run_cli_success(&["notify", "status"]);
    let state = stdout.trim();
    assert!(state == "unrequested" || state == "satisfied");
}

#[test]
fn test_notify_attempt_without_a_terminal_fails_softly() {
    run_cli_success(&["notify", "reset-flag"]);

    // stdin is closed, so the prompt cannot complete; the flag must
    // stay unset.
    let stdout = run_cli_success(&["notify", "attempt"]);
    assert!(stdout.contains("did not complete"));
}

#[test]
fn test_suggest_is_deterministic_for_a_given_elapsed() {
    let stdout = run_cli_success(&["suggest", "--elapsed-ms", "0"]);
    assert_eq!(stdout.trim(), "Drink more water");

    let stdout = run_cli_success(&["suggest", "--elapsed-ms", "3500"]);
    assert_eq!(stdout.trim(), "Stop scrolling by 8pm");
}

#[test]
fn test_suggest_all_lists_the_catalog() {
    let stdout = run_cli_success(&["suggest", "--all"]);
    assert_eq!(stdout.lines().count(), 12);
}

#[test]
fn test_config_list() {
    let stdout = run_cli_success(&["config", "list"]);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("config is JSON");
    assert!(v["cycle"]["reset_hour"].is_number());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_completions_generate() {
    let stdout = run_cli_success(&["completions", "bash"]);
    assert!(stdout.contains("onepromise"));
}
