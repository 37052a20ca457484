//! End-to-end tests for the kdlt binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn kdlt() -> Command {
    Command::cargo_bin("kdlt").expect("binary builds")
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}

#[test]
fn check_accepts_valid_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "ok.kdl", "node 1 2 3 {\n  child a=1\n}\n");
    kdlt().arg("check").arg(&path).assert().success();
}

#[test]
fn check_rejects_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.kdl", "node \"unterminated\n");
    kdlt()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn check_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.kdl", "fine 1\nbroken =\n");
    kdlt()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2:"));
}

#[test]
fn fmt_prints_canonical_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "messy.kdl", "node   b=2    a=1");
    kdlt()
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("node a=1 b=2\n"));
}

#[test]
fn fmt_write_rewrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "messy.kdl", "node   b=2    a=1");
    kdlt().arg("fmt").arg("--write").arg(&path).assert().success();
    let rewritten = std::fs::read_to_string(&path).unwrap();
    assert_eq!(rewritten, "node a=1 b=2\n");
}

#[test]
fn fmt_check_detects_unformatted() {
    let dir = tempfile::tempdir().unwrap();
    let unformatted = write_file(&dir, "messy.kdl", "node   b=2    a=1");
    kdlt()
        .arg("fmt")
        .arg("--check")
        .arg(&unformatted)
        .assert()
        .failure();

    let formatted = write_file(&dir, "clean.kdl", "node a=1 b=2\n");
    kdlt()
        .arg("fmt")
        .arg("--check")
        .arg(&formatted)
        .assert()
        .success();
}

#[test]
fn fmt_honors_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(&dir, "kdlt.toml", "[format]\nindent = 2\nsemicolons = true\n");
    let path = write_file(&dir, "doc.kdl", "parent {\n    child\n}\n");
    kdlt()
        .arg("--config")
        .arg(&config)
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("parent {\n  child;\n};\n"));
}

#[test]
fn help_lists_subcommands() {
    kdlt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check").and(predicate::str::contains("fmt")));
}
