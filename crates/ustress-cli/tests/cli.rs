// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! End-to-end tests for the `ustress` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `ustress` with an isolated, empty user config directory.
fn ustress(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ustress").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_prints_default_run_counts() {
    let home = TempDir::new().unwrap();
    ustress(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout("fpmac_workload\t200000000\nint2double_workload\t1500000000\n");
}

#[test]
fn list_honors_calibration_file() {
    let home = TempDir::new().unwrap();
    let cal = home.path().join("cal.json");
    std::fs::write(&cal, r#"{"runs":{"int2double_workload":9}}"#).unwrap();
    ustress(home.path())
        .args(["list", "--calibration"])
        .arg(&cal)
        .assert()
        .success()
        .stdout(predicate::str::contains("int2double_workload\t9\n"))
        .stdout(predicate::str::contains("fpmac_workload\t200000000\n"));
}

#[test]
fn run_small_workload_succeeds_and_logs_to_stderr() {
    let home = TempDir::new().unwrap();
    ustress(home.path())
        .args(["run", "fpmac", "--runs", "1000000"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("running workload"));
}

#[test]
fn run_uses_calibration_when_runs_is_omitted() {
    let home = TempDir::new().unwrap();
    let cal = home.path().join("cal.json");
    std::fs::write(&cal, r#"{"runs":{"fpmac":3}}"#).unwrap();
    ustress(home.path())
        .args(["run", "fpmac_workload", "--calibration"])
        .arg(&cal)
        .assert()
        .success()
        .stderr(predicate::str::contains("runs=3"));
}

#[cfg(target_os = "linux")]
#[test]
fn user_calibration_is_picked_up() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("ustress");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("calibration.json"), r#"{"runs":{"fpmac":11}}"#).unwrap();
    ustress(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("fpmac_workload\t11\n"));
}

#[test]
fn unknown_workload_fails() {
    let home = TempDir::new().unwrap();
    ustress(home.path())
        .args(["run", "fpdiv_workload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown workload"));
}

#[test]
fn negative_runs_are_rejected_by_the_parser() {
    let home = TempDir::new().unwrap();
    ustress(home.path())
        .args(["run", "fpmac", "--runs=-5"])
        .assert()
        .failure();
}

#[test]
fn missing_calibration_file_fails() {
    let home = TempDir::new().unwrap();
    ustress(home.path())
        .args(["run", "fpmac", "--calibration"])
        .arg(home.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load calibration"));
}

#[cfg(unix)]
#[test]
fn multicall_runs_workload_named_by_executable() {
    let home = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let exe = bin.path().join("int2double_workload");
    std::os::unix::fs::symlink(assert_cmd::cargo::cargo_bin("ustress"), &exe).unwrap();

    Command::new(&exe)
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .args(["--runs", "10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("int2double_workload"));
}
