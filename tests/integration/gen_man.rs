use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn gen_man_prints_troff() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .arg("--gen-man")
    .assert()
    .success()
    .stdout(predicate::str::contains(".TH"));
}
