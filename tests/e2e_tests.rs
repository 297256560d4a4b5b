//! End-to-end tests for pyupcheck CLI
//!
//! These tests verify:
//! - CLI surface (help, version, argument validation)
//! - Text and JSON output against a mock registry
//! - Report file appending
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const PY27: &str = "Programming Language :: Python :: 2.7";
const PY38: &str = "Programming Language :: Python :: 3.8";

fn pyupcheck() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pyupcheck"))
}

/// Create a directory holding a requirements file
fn create_requirements(content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("requirements.txt"), content).unwrap();
    dir
}

/// Registry serving `foo` (1.0 → 2.0 upgrade) and `bar` (pinned at latest)
fn registry() -> (mockito::ServerGuard, Vec<mockito::Mock>) {
    let mut server = mockito::Server::new();
    let foo = json!({
        "info": {"name": "foo", "version": "2.0", "classifiers": [PY27, PY38],
                 "requires_python": ">=2.7, <4"},
        "releases": {
            "1.0": [{"python_version": "py2", "upload_time_iso_8601": "2019-05-01T00:00:00Z"}],
            "2.0": [{"python_version": "py2.py3", "upload_time_iso_8601": "2020-05-01T00:00:00Z"}]
        }
    });
    let foo_1 = json!({
        "info": {"name": "foo", "version": "1.0", "classifiers": [PY27], "requires_python": null},
        "urls": []
    });
    let foo_2 = json!({
        "info": {"name": "foo", "version": "2.0", "classifiers": [PY27, PY38],
                 "requires_python": ">=2.7, <4"},
        "urls": []
    });
    let bar = json!({
        "info": {"name": "bar", "version": "1.5", "classifiers": [], "requires_python": null},
        "releases": {"1.5": []}
    });

    let mut mocks = Vec::new();
    for (path, body) in [
        ("/foo/json", foo),
        ("/foo/1.0/json", foo_1),
        ("/foo/2.0/json", foo_2),
        ("/bar/json", bar),
    ] {
        mocks.push(
            server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .create(),
        );
    }
    mocks.push(server.mock("GET", "/ghost/json").with_status(404).create());
    (server, mocks)
}

#[test]
fn test_help() {
    pyupcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--req"))
        .stdout(predicate::str::contains("--upgrade-for-any-target"))
        .stdout(predicate::str::contains("--added-support"));
}

#[test]
fn test_version() {
    pyupcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_req_is_required() {
    pyupcheck()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--req"));
}

#[test]
fn test_conflicting_modes_rejected() {
    pyupcheck()
        .args(["--req", "r.txt", "--added-support", "--upgrade-for-target"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_requirements_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    pyupcheck()
        .arg("--req")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read requirements file"));
}

#[test]
fn test_invalid_target_version() {
    let dir = create_requirements("foo==1.0\n");

    pyupcheck()
        .arg("--req")
        .arg(dir.path().join("requirements.txt"))
        .args(["--target", "three"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid runtime version 'three'"));
}

#[test]
fn test_text_output_and_partial_exit_code() {
    let (server, _mocks) = registry();
    let dir = create_requirements("foo==1.0\nbar==1.5\nghost==0.1\n");

    pyupcheck()
        .arg("--req")
        .arg(dir.path().join("requirements.txt"))
        .args(["--index-url", server.url().as_str(), "--quiet"])
        .env("NO_COLOR", "1")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Upgradeable Packages:"))
        .stdout(predicate::str::contains("2.0 score 3 for 3.8"))
        .stdout(predicate::str::contains("bar").not())
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_json_output_schema() {
    let (server, _mocks) = registry();
    let dir = create_requirements("foo==1.0\nbar==1.5\n");

    let output = pyupcheck()
        .arg("--req")
        .arg(dir.path().join("requirements.txt"))
        .args(["--index-url", server.url().as_str(), "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "upgradeable");
    assert_eq!(value["packages"][0]["name"], "foo");
    assert_eq!(value["packages"][0]["status"], "upgradeable");
    assert_eq!(
        value["packages"][0]["upgrades"]["candidates"]["2.0"]["score"],
        3
    );
    assert_eq!(value["packages"][1]["status"], "already_latest");
}

#[test]
fn test_added_support_json() {
    let (server, _mocks) = registry();
    let dir = create_requirements("foo==1.0\n");

    let output = pyupcheck()
        .arg("--req")
        .arg(dir.path().join("requirements.txt"))
        .args(["--index-url", server.url().as_str(), "--json", "--added-support"])
        .args(["--targets", "3.8,2.7"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let timeline = &value["packages"][0]["timeline"];
    assert_eq!(timeline["entries"]["1.0"]["added"][0], "2.7");
    assert_eq!(timeline["entries"]["2.0"]["added"][0], "3.8");
}

#[test]
fn test_report_file_is_appended() {
    let (server, _mocks) = registry();
    let dir = create_requirements("foo==1.0\n");
    let report = dir.path().join("report.out");

    for _ in 0..2 {
        pyupcheck()
            .arg("--req")
            .arg(dir.path().join("requirements.txt"))
            .args(["--index-url", server.url().as_str(), "--quiet"])
            .arg("--output")
            .arg(&report)
            .assert()
            .success();
    }

    let content = fs::read_to_string(&report).unwrap();
    assert_eq!(content.matches("Upgradeable Packages:").count(), 2);
    assert!(content.contains("Current version: 1.0"));
}

#[test]
fn test_included_and_hashed_requirements() {
    let (server, _mocks) = registry();
    let dir = create_requirements("-r base.txt\nbar==1.5 \\\n    --hash=sha256:abc\n");
    fs::write(dir.path().join("base.txt"), "foo==1.0 --hash=sha256:def\n").unwrap();

    let output = pyupcheck()
        .arg("--req")
        .arg(dir.path().join("requirements.txt"))
        .args(["--index-url", server.url().as_str(), "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["packages"][0]["name"], "foo");
    assert_eq!(value["packages"][1]["name"], "bar");
    assert_eq!(value["packages"][1]["status"], "already_latest");
}
