use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use test_support::{fixture_env, history_item};

fn fixtures() -> Vec<(String, String)> {
  fixture_env(&[
    (
      "BRIEF_TEST_CREATED_JSON",
      json!({ "bugs": [
        { "id": 10, "creator": "carol@example.com", "creator_detail": { "real_name": "Carol" } },
        { "id": 11, "creator": "dave@example.com" },
        { "id": 12, "creator": "dave@example.com", "creator_detail": { "real_name": "" } }
      ]}),
    ),
    (
      "BRIEF_TEST_RESOLVED_JSON",
      json!({ "bugs": [
        { "id": 1, "assigned_to": "nobody@mozilla.org", "resolution": "FIXED" },
        { "id": 2, "assigned_to": "bob@example.com", "resolution": "FIXED" },
        { "id": 3, "assigned_to": "erin@example.com", "assigned_to_detail": { "real_name": "Erin" }, "resolution": "WONTFIX" },
        { "id": 9, "assigned_to": "nobody@mozilla.org", "resolution": "INVALID" }
      ]}),
    ),
    (
      "BRIEF_TEST_HISTORY_JSON",
      json!({
        "1": [
          history_item("triage@example.com", "status", "RESOLVED"),
          history_item("reporter@example.com", "status", "REOPENED"),
          history_item("alice@example.com", "status", "RESOLVED")
        ],
        "2": [history_item("bob@example.com", "status", "RESOLVED")]
      }),
    ),
  ])
}

fn run(extra: &[&str]) -> assert_cmd::assert::Assert {
  test_support::init_tracing();
  let mut args = vec!["--product", "Socorro", "--month", "2018-01"];
  args.extend_from_slice(extra);

  Command::cargo_bin("project-brief")
    .unwrap()
    .envs(fixtures())
    .env_remove("RUST_LOG")
    .args(args)
    .assert()
}

#[test]
fn brief_tallies_creators_resolvers_and_resolutions() {
  let out = run(&[]).success().get_output().stdout.clone();
  let v: Value = serde_json::from_slice(&out).unwrap();

  test_support::snapshot_settings().bind(|| {
    insta::assert_json_snapshot!(v, @r#"
    {
      "ranges": [
        {
          "github": [],
          "label": "2018-01",
          "products": [
            {
              "created": {
                "bugs": [
                  {
                    "creator": "carol@example.com",
                    "creator_detail": {
                      "real_name": "Carol"
                    },
                    "id": 10
                  },
                  {
                    "creator": "dave@example.com",
                    "id": 11
                  },
                  {
                    "creator": "dave@example.com",
                    "creator_detail": {
                      "real_name": ""
                    },
                    "id": 12
                  }
                ],
                "count": 3,
                "creators": {
                  "Carol": 1,
                  "dave": 2
                }
              },
              "product": "Socorro",
              "resolved": {
                "bugs": [
                  {
                    "assigned_to": "nobody@mozilla.org",
                    "brief_resolution_item": {
                      "changes": [
                        {
                          "added": "RESOLVED",
                          "field_name": "status",
                          "removed": ""
                        }
                      ],
                      "when": "2018-01-15T10:00:00Z",
                      "who": "alice@example.com"
                    },
                    "id": 1,
                    "resolution": "FIXED"
                  },
                  {
                    "assigned_to": "bob@example.com",
                    "brief_resolution_item": {
                      "changes": [
                        {
                          "added": "RESOLVED",
                          "field_name": "status",
                          "removed": ""
                        }
                      ],
                      "when": "2018-01-15T10:00:00Z",
                      "who": "bob@example.com"
                    },
                    "id": 2,
                    "resolution": "FIXED"
                  },
                  {
                    "assigned_to": "erin@example.com",
                    "assigned_to_detail": {
                      "real_name": "Erin"
                    },
                    "brief_resolution_item": null,
                    "id": 3,
                    "resolution": "WONTFIX"
                  },
                  {
                    "assigned_to": "nobody@mozilla.org",
                    "brief_resolution_item": null,
                    "id": 9,
                    "resolution": "INVALID"
                  }
                ],
                "count": 4,
                "resolved_map": {
                  "FIXED": 2,
                  "INVALID": 1,
                  "WONTFIX": 1
                },
                "resolvers": {
                  "Erin": 1,
                  "alice": 1,
                  "bob": 1,
                  "unknown": 1
                }
              }
            }
          ],
          "since": "2018-01-01",
          "until": "2018-02-01"
        }
      ]
    }
    "#);
  });
}

#[test]
fn skip_policy_drops_unattributed_bugs() {
  let out = run(&["--unattributed", "skip"])
    .success()
    .stderr(predicate::str::contains("skipped"))
    .stderr(predicate::str::contains("\u{1b}[").not())
    .get_output()
    .stdout
    .clone();
  let v: Value = serde_json::from_slice(&out).unwrap();
  let resolved = &v["ranges"][0]["products"][0]["resolved"];
  assert_eq!(resolved["count"], 3);
  assert!(resolved["resolved_map"].get("INVALID").is_none());
}

#[test]
fn error_policy_fails_the_run() {
  run(&["--unattributed", "error"])
    .failure()
    .stderr(predicate::str::contains("bug 9"));
}

#[test]
fn out_flag_writes_file() {
  let td = tempfile::TempDir::new().unwrap();
  let path = td.path().join("briefs").join("2018-01.json");

  run(&["--out", path.to_str().unwrap()]).success().stdout(predicate::str::is_empty());

  let v: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
  assert_eq!(v["ranges"][0]["products"][0]["resolved"]["count"], 4);
}

#[test]
fn bucket_phrase_yields_one_brief_per_month() {
  let out = run_for_phrase("every month for the last 2 months");
  let v: Value = serde_json::from_slice(&out).unwrap();
  let labels: Vec<&str> = v["ranges"].as_array().unwrap().iter().map(|r| r["label"].as_str().unwrap()).collect();
  assert_eq!(labels, vec!["2018-01", "2018-02"]);
}

fn run_for_phrase(phrase: &str) -> Vec<u8> {
  Command::cargo_bin("project-brief")
    .unwrap()
    .envs(fixtures())
    .args(["--product", "Socorro", "--for", phrase, "--now-override", "2018-03-10T12:00:00"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone()
}

#[cfg(unix)]
#[test]
fn bugzilla_only_run_never_looks_for_a_github_token() {
  use std::os::unix::fs::PermissionsExt;

  let td = tempfile::TempDir::new().unwrap();
  let marker = td.path().join("gh-called");
  let gh = td.path().join("gh");
  std::fs::write(&gh, format!("#!/bin/sh\ntouch '{}'\n", marker.display())).unwrap();
  std::fs::set_permissions(&gh, std::fs::Permissions::from_mode(0o755)).unwrap();
  let path = format!("{}:{}", td.path().display(), std::env::var("PATH").unwrap_or_default());

  Command::cargo_bin("project-brief")
    .unwrap()
    .envs(fixtures())
    .env("PATH", path)
    .env_remove("GITHUB_TOKEN")
    .env_remove("GH_TOKEN")
    .args(["--product", "Socorro", "--month", "2018-01"])
    .assert()
    .success()
    .stderr(predicate::str::contains("GitHub token").not());

  assert!(!marker.exists());
}
