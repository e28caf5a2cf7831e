//! CLI integration tests.
//!
//! These exercise the binary end to end with `assert_cmd`. Session commands
//! need a terminal and are covered by unit tests instead.

use assert_cmd::Command;
use predicates::prelude::*;

fn respira(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("respira").unwrap();
    // Point config resolution at a scratch home so user config never leaks in.
    cmd.env("HOME", home);
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("techniques"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_techniques_pretty() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .arg("techniques")
        .assert()
        .success()
        .stdout(predicate::str::contains("Simple"))
        .stdout(predicate::str::contains("Box Breathing"))
        .stdout(predicate::str::contains("4-7-8"));
}

#[test]
fn test_techniques_json() {
    let home = tempfile::tempdir().unwrap();
    let output = respira(home.path())
        .args(["techniques", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["count"], 3);
    assert_eq!(parsed["items"].as_array().unwrap().len(), 3);
}

#[test]
fn test_techniques_alias() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Box Breathing"));
}

#[test]
fn test_config_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simple"))
        .stdout(predicate::str::contains("30 seconds"));
}

#[test]
fn test_config_init_and_path() {
    let home = tempfile::tempdir().unwrap();

    respira(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    assert!(home.path().join(".respira/config.yaml").exists());

    // Second init without --force refuses to clobber.
    respira(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    respira(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    respira(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".respira"));
}

#[test]
fn test_config_file_feeds_config_show() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join(".respira");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.yaml"),
        "session:\n  technique: box\n  duration: 5m\n",
    )
    .unwrap();

    respira(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Box Breathing"))
        .stdout(predicate::str::contains("5 minutes"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("respira"));
}

#[test]
fn test_invalid_technique_rejected() {
    let home = tempfile::tempdir().unwrap();
    respira(home.path())
        .args(["start", "-t", "wim-hof"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
