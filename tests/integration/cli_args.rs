use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_window_is_rejected() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .args(["--product", "Socorro"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide one of --month"));
}

#[test]
fn conflicting_windows_are_rejected() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .args(["--product", "Socorro", "--month", "2018-01", "--for", "last week"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Ambiguous time selection"));
}

#[test]
fn nothing_to_summarize_is_rejected() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .args(["--month", "2018-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--product or --github"));
}

#[test]
fn malformed_github_slug_is_rejected() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .args(["--month", "2018-01", "--github", "socorro"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected owner/name"));
}

#[test]
fn unknown_policy_value_is_rejected_by_clap() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .args(["--month", "2018-01", "--product", "Socorro", "--unattributed", "maybe"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--unattributed"));
}
