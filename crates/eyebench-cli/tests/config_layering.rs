//! Project-local configuration file discovery and flag precedence.

use assert_cmd::Command;
use predicates::prelude::*;

// Refuses immediately on loopback.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/detect";

fn eyebench() -> Command {
    let mut cmd = Command::cargo_bin("eyebench").expect("binary builds");
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir());
    cmd
}

#[test]
fn test_project_config_supplies_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(
        dir.path().join(".eyebench.toml"),
        format!("[service]\nendpoint = \"{DEAD_ENDPOINT}\"\n"),
    )
    .unwrap();

    // Without the config this run would fail with a missing-endpoint error;
    // with it, the empty battery just completes.
    eyebench()
        .current_dir(dir.path())
        .args(["collect", "images", "--no-progress"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("endpoint").not());
}

#[test]
fn test_project_config_found_in_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".eyebench.toml"),
        format!("[service]\nendpoint = \"{DEAD_ENDPOINT}\"\n"),
    )
    .unwrap();
    let nested = dir.path().join("shoot").join("day1");
    std::fs::create_dir_all(&nested).unwrap();

    eyebench()
        .current_dir(&nested)
        .args(["collect", ".", "--no-progress"])
        .assert()
        .code(0);
}

#[test]
fn test_config_output_path_used_and_flag_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(
        dir.path().join(".eyebench.toml"),
        format!("[service]\nendpoint = \"{DEAD_ENDPOINT}\"\n\n[output]\ncsv = \"from-config.csv\"\n"),
    )
    .unwrap();

    eyebench()
        .current_dir(dir.path())
        .args(["collect", "images", "--no-progress"])
        .assert()
        .code(0);
    assert!(dir.path().join("from-config.csv").exists());

    eyebench()
        .current_dir(dir.path())
        .args(["collect", "images", "--output", "from-flag.csv", "--no-progress"])
        .assert()
        .code(0);
    assert!(dir.path().join("from-flag.csv").exists());
}

#[test]
fn test_invalid_config_warns_and_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join(".eyebench.toml"), "not valid toml [[[").unwrap();

    // The broken file is skipped with a warning; without an endpoint the
    // command then fails the usual way.
    eyebench()
        .current_dir(dir.path())
        .args(["collect", "images", "--no-progress"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"))
        .stderr(predicate::str::contains("endpoint"));
}
