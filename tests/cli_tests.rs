//! Command line surface of the voyage_publish binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_workflow_flags() {
    Command::cargo_bin("voyage_publish")
        .expect("binary built")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prod"))
        .stdout(predicate::str::contains("--refresh-token"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    Command::cargo_bin("voyage_publish")
        .expect("binary built")
        .arg("--publish-everything")
        .assert()
        .failure();
}

#[test]
fn test_missing_project_directory_exits_with_one() {
    Command::cargo_bin("voyage_publish")
        .expect("binary built")
        .args(["--dir", "/definitely/not/a/project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_directory_without_manifest_fails() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    Command::cargo_bin("voyage_publish")
        .expect("binary built")
        .arg("--dir")
        .arg(dir.path())
        .env("CLI_HOME", dir.path().join("home"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package.json"));
}
