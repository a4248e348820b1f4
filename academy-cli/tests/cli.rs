//! End-to-end tests for the `academy` binary.
//!
//! Everything runs with `--memory` or against an unconfigured backend, so no
//! network access is needed.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn academy() -> Command {
    let mut cmd = cargo_bin_cmd!("academy");
    cmd.env_remove("ACADEMY_BACKEND_URL")
        .env_remove("ACADEMY_BACKEND_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn shows_help() {
    academy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lectures"))
        .stdout(predicate::str::contains("notify"))
        .stdout(predicate::str::contains("callback"));
}

#[test]
fn lists_sample_lectures_in_memory_mode() {
    academy()
        .args(["--memory", "lectures"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inside the RRB NTPC Selection Process"))
        .stdout(predicate::str::contains("8 November 2026  06:00 PM"))
        .stdout(predicate::str::contains("- Stage-wise cut-off trends"));
}

#[test]
fn lectures_as_json() {
    academy()
        .args(["--memory", "lectures", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"expert_credentials\""))
        .stdout(predicate::str::contains("preview-ssc-cgl"));
}

#[test]
fn notify_dry_run_records_the_source() {
    academy()
        .args([
            "--memory",
            "notify",
            "--name",
            "Asha Verma",
            "--phone",
            "9876543210",
            "--email",
            "asha@example.com",
            "--platform",
            "ios",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted to app_interest."))
        .stdout(predicate::str::contains("\"source_page\": \"cli\""))
        .stdout(predicate::str::contains("\"platform_preference\": \"ios\""));
}

#[test]
fn notify_rejects_a_short_phone() {
    academy()
        .args([
            "--memory",
            "notify",
            "--name",
            "Asha Verma",
            "--phone",
            "12345",
            "--email",
            "asha@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 10 digits"))
        .stdout(predicate::str::contains("Submitted").not());
}

#[test]
fn unknown_platform_is_a_usage_error() {
    academy()
        .args([
            "--memory",
            "notify",
            "--name",
            "A",
            "--phone",
            "9876543210",
            "--email",
            "a@b.com",
            "--platform",
            "windows",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("windows"));
}

#[test]
fn callback_without_email_is_accepted() {
    academy()
        .args([
            "--memory",
            "callback",
            "--name",
            "Ravi",
            "--phone",
            "9123456780",
            "--source",
            "contact-bar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted to callback_requests."))
        .stdout(predicate::str::contains("\"source_page\": \"contact-bar\""))
        .stdout(predicate::str::contains("email").not());
}

#[test]
fn unconfigured_backend_fails_with_a_hint() {
    let dir = TempDir::new().unwrap();
    academy()
        .current_dir(dir.path())
        .arg("lectures")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--memory"));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("academy.toml");
    std::fs::write(&path, "[hero\ninterval_ms = 5000").unwrap();
    academy()
        .arg("--config")
        .arg(&path)
        .args(["--memory", "lectures"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
