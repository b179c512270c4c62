//! End-to-end collect runs against an unreachable detection endpoint.
//!
//! A connection-refused endpoint exercises the service failure paths without
//! needing a live server.

use assert_cmd::Command;
use predicates::prelude::*;

// TEST-NET-1 discard port, refuses immediately on loopback.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/detect";

fn eyebench() -> Command {
    let mut cmd = Command::cargo_bin("eyebench").expect("binary builds");
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir());
    cmd
}

fn write_portrait(dir: &std::path::Path, name: &str) {
    eyebench_test_support::textured_portrait(320, 400)
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn test_skip_mode_discards_and_reports_partial_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_portrait(dir.path(), "a.png");

    eyebench()
        .current_dir(dir.path())
        .args([
            "collect",
            ".",
            "--endpoint",
            DEAD_ENDPOINT,
            "--sigma",
            "0,1",
            "--no-progress",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("skipped 1"));

    // The table is created up front; with nothing committed it stays empty.
    let csv = dir.path().join("results.csv");
    assert!(csv.exists());
    assert_eq!(std::fs::metadata(&csv).unwrap().len(), 0);
}

#[test]
fn test_abort_mode_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_portrait(dir.path(), "a.png");
    write_portrait(dir.path(), "b.png");

    eyebench()
        .current_dir(dir.path())
        .args([
            "collect",
            ".",
            "--endpoint",
            DEAD_ENDPOINT,
            "--sigma",
            "0",
            "--on-service-error",
            "abort",
            "--no-progress",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("detection service failed"));
}

#[test]
fn test_empty_battery_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();

    eyebench()
        .current_dir(dir.path())
        .args([
            "collect",
            "images",
            "--endpoint",
            DEAD_ENDPOINT,
            "--no-progress",
        ])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Committed 0"));
}

#[test]
fn test_output_flag_controls_table_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();

    eyebench()
        .current_dir(dir.path())
        .args([
            "collect",
            "images",
            "--endpoint",
            DEAD_ENDPOINT,
            "--output",
            "custom.csv",
            "--no-progress",
        ])
        .assert()
        .code(0);

    assert!(dir.path().join("custom.csv").exists());
    assert!(!dir.path().join("results.csv").exists());
}
