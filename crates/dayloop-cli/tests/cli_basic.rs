//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "dayloop-cli", "--"])
        .args(args)
        .env("DAYLOOP_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("streak"));
    assert!(stdout.contains("timer"));
}

#[test]
fn test_streak_all_lists_every_feature() {
    let (stdout, _, code) = run_cli(&["streak", "all"]);
    assert_eq!(code, 0, "streak all failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    let summaries = parsed.as_array().expect("array output");
    assert_eq!(summaries.len(), 4);
    assert_eq!(summaries[0]["key"], "notes");
}

#[test]
fn test_streak_show_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["streak", "show", "music"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown feature key"));
}

#[test]
fn test_streak_history_has_seven_slots() {
    let (stdout, _, code) = run_cli(&["streak", "history", "habits"]);
    assert_eq!(code, 0);
    let marks = stdout.chars().filter(|c| *c == '●' || *c == '○').count();
    assert_eq!(marks, 7);
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert!(parsed["session"]["focus_min"].is_u64());
}
