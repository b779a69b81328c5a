//! Integration tests for the `tablebook` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run each subcommand against the
//! JSON fixtures and inspect stdout, stderr and exit status.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn tablebook() -> Command {
    Command::cargo_bin("tablebook").unwrap()
}

/// Helper: run with fixture settings and bookings, parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = tablebook()
        .args(args)
        .args(["-c", &fixture("settings.json"), "-b", &fixture("bookings.json")])
        .output()
        .expect("tablebook should run");
    assert!(
        output.status.success(),
        "tablebook failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_inside_margin_is_unavailable() {
    let report = run_json(&[
        "check",
        "--table",
        "3",
        "--start",
        "2024-01-15T21:00:00Z",
        "--duration",
        "120",
    ]);
    assert_eq!(report["available"], false);
    assert_eq!(report["blockedBy"], serde_json::json!(["b1"]));
    assert_eq!(report["earliestStart"], "2024-01-15T21:30:00Z");
}

#[test]
fn check_after_margin_is_available() {
    let report = run_json(&[
        "check",
        "--table",
        "3",
        "--start",
        "2024-01-15T21:30",
        "--duration",
        "120",
    ]);
    assert_eq!(report["available"], true);
    assert!(report.get("blockedBy").is_none());
    assert!(report.get("earliestStart").is_none());
}

#[test]
fn check_ignores_other_tables_bookings() {
    // b1 sits on table 3; table 1 is free at 19:00.
    let report = run_json(&["check", "--table", "1", "--start", "2024-01-15T19:00"]);
    assert_eq!(report["available"], true);
}

#[test]
fn check_rejects_garbage_start() {
    tablebook()
        .args(["check", "-c", &fixture("settings.json"), "--table", "1", "--start", "tonight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start time"));
}

// ─────────────────────────────────────────────────────────────────────────────
// slots / free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_skip_booking_and_margin() {
    let slots = run_json(&["slots", "--table", "3", "--date", "2024-01-15"]);
    let slots: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        slots,
        vec![
            "2024-01-15T12:00:00Z",
            "2024-01-15T13:00:00Z",
            "2024-01-15T14:00:00Z",
            "2024-01-15T15:00:00Z",
            "2024-01-15T16:00:00Z",
            "2024-01-15T17:00:00Z",
            "2024-01-15T22:00:00Z",
        ]
    );
}

#[test]
fn slots_reject_zero_length() {
    tablebook()
        .args([
            "slots",
            "-c",
            &fixture("settings.json"),
            "--table",
            "3",
            "--date",
            "2024-01-15",
            "--slot",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--slot"));
}

#[test]
fn free_windows_for_table() {
    let free = run_json(&["free", "--table", "3", "--date", "2024-01-15"]);
    let free = free.as_array().unwrap();
    assert_eq!(free.len(), 2);
    assert_eq!(free[0]["end"], "2024-01-15T18:00:00Z");
    assert_eq!(free[1]["start"], "2024-01-15T21:30:00Z");
    assert_eq!(free[1]["durationMinutes"], 90);
}

// ─────────────────────────────────────────────────────────────────────────────
// select
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn select_prefers_single_suitable_table() {
    let report = run_json(&[
        "select",
        "-t",
        &fixture("tables.json"),
        "--start",
        "2024-01-15T14:00",
        "--party",
        "4",
    ]);
    assert_eq!(report["selected"], serde_json::json!(["3"]));
}

#[test]
fn select_combines_small_tables() {
    // Table 3 is blocked until 21:30, table 4 is under maintenance.
    let report = run_json(&[
        "select",
        "-t",
        &fixture("tables.json"),
        "--start",
        "2024-01-15T20:00",
        "--party",
        "4",
    ]);
    assert_eq!(report["selected"], serde_json::json!(["1", "2"]));
    assert_eq!(report["candidates"].as_array().unwrap().len(), 2);
}

#[test]
fn select_reports_no_combination() {
    let report = run_json(&[
        "select",
        "-t",
        &fixture("tables.json"),
        "--start",
        "2024-01-15T20:00",
        "--party",
        "6",
    ]);
    assert!(report["selected"].is_null());
}

#[test]
fn select_enforces_max_party_size() {
    tablebook()
        .args([
            "select",
            "-c",
            &fixture("settings.json"),
            "-t",
            &fixture("tables.json"),
            "--start",
            "2024-01-15T14:00",
            "--party",
            "13",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Party size rejected"));
}

// ─────────────────────────────────────────────────────────────────────────────
// times / margin / config errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn times_cover_opening_hours() {
    let output = tablebook()
        .args(["times", "-c", &fixture("settings.json"), "--step", "60"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let times: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(times.len(), 11);
    assert_eq!(times.first().map(String::as_str), Some("12:00"));
    assert_eq!(times.last().map(String::as_str), Some("22:00"));
}

#[test]
fn margin_minutes_are_formatted() {
    tablebook()
        .args(["margin", "--minutes", "90"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1 hour 30 minutes\n"));
}

#[test]
fn margin_description_from_settings() {
    tablebook()
        .args(["margin", "-c", &fixture("settings.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tables remain unavailable for 1 hour 30 minutes",
        ));
}

#[test]
fn overnight_hours_are_rejected() {
    tablebook()
        .args(["times", "-c", &fixture("bad_settings.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid restaurant settings"));
}

#[test]
fn missing_config_file_fails() {
    tablebook()
        .args(["times", "-c", "/nonexistent/settings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
