use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use test_support::{fixture_env, pull};

fn run_with_pages(pages: Value, extra: &[&str]) -> Value {
  let mut args = vec!["--github", "mozilla-services/socorro", "--since", "2018-01-01", "--until", "2018-02-01"];
  args.extend_from_slice(extra);

  let out = Command::cargo_bin("project-brief")
    .unwrap()
    .envs(fixture_env(&[("BRIEF_TEST_PULLS_JSON", pages)]))
    .args(args)
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  serde_json::from_slice(&out).unwrap()
}

#[test]
fn merged_pulls_in_window_are_listed() {
  let pages = json!([
    [
      pull(40, Some("2018-01-30T10:00:00Z")),
      pull(39, None),
      pull(38, Some("2017-12-20T10:00:00Z")),
      pull(37, Some("2018-01-02T10:00:00Z"))
    ],
    [pull(36, Some("2018-01-01T00:00:00Z")), pull(35, Some("2017-11-01T00:00:00Z"))]
  ]);

  let v = run_with_pages(pages, &[]);

  test_support::snapshot_settings().bind(|| {
    insta::assert_json_snapshot!(v, @r#"
    {
      "ranges": [
        {
          "github": [
            {
              "consumed": 6,
              "count": 3,
              "past_from_date": 2,
              "prs": [
                {
                  "html_url": "https://github.com/mozilla-services/socorro/pull/40",
                  "merged_at": "2018-01-30T10:00:00Z",
                  "number": 40,
                  "title": "PR 40",
                  "user": {
                    "login": "willkg"
                  }
                },
                {
                  "html_url": "https://github.com/mozilla-services/socorro/pull/37",
                  "merged_at": "2018-01-02T10:00:00Z",
                  "number": 37,
                  "title": "PR 37",
                  "user": {
                    "login": "willkg"
                  }
                },
                {
                  "html_url": "https://github.com/mozilla-services/socorro/pull/36",
                  "merged_at": "2018-01-01T00:00:00Z",
                  "number": 36,
                  "title": "PR 36",
                  "user": {
                    "login": "willkg"
                  }
                }
              ],
              "repo": "mozilla-services/socorro",
              "stop": "stream_exhausted"
            }
          ],
          "label": "window",
          "products": [],
          "since": "2018-01-01",
          "until": "2018-02-01"
        }
      ]
    }
    "#);
  });
}

#[test]
fn pull_repeated_on_a_later_page_is_listed_once() {
  let pages = json!([
    [pull(8, Some("2018-01-20T00:00:00Z")), pull(7, Some("2018-01-15T00:00:00Z"))],
    [pull(7, Some("2018-01-15T00:00:00Z")), pull(6, Some("2018-01-10T00:00:00Z"))]
  ]);

  let v = run_with_pages(pages, &[]);
  let repo = &v["ranges"][0]["github"][0];
  let numbers: Vec<i64> = repo["prs"].as_array().unwrap().iter().map(|p| p["number"].as_i64().unwrap()).collect();
  assert_eq!(numbers, vec![8, 7, 6]);
  assert_eq!(repo["count"], 3);
  assert_eq!(repo["duplicates"], 1);
}

#[test]
fn merge_after_window_stops_the_scan() {
  let pages = json!([[pull(50, Some("2018-02-03T00:00:00Z")), pull(49, Some("2018-01-20T00:00:00Z"))]]);

  let v = run_with_pages(pages, &[]);
  let repo = &v["ranges"][0]["github"][0];
  assert_eq!(repo["count"], 0);
  assert_eq!(repo["stop"], "reached_upper_bound");
  assert_eq!(repo["consumed"], 1);
}

#[test]
fn lookback_flag_limits_the_tail() {
  let pages = json!([[
    pull(5, Some("2018-01-10T00:00:00Z")),
    pull(4, Some("2017-12-01T00:00:00Z")),
    pull(3, Some("2017-11-01T00:00:00Z")),
    pull(2, Some("2018-01-05T00:00:00Z"))
  ]]);

  let v = run_with_pages(pages, &["--lookback", "1"]);
  let repo = &v["ranges"][0]["github"][0];
  assert_eq!(repo["stop"], "lookback_exhausted");
  assert_eq!(repo["count"], 1);
  assert_eq!(repo["past_from_date"], 2);
}

#[test]
fn malformed_fixture_surfaces_as_error() {
  Command::cargo_bin("project-brief")
    .unwrap()
    .env("BRIEF_TEST_PULLS_JSON", "{oops")
    .args(["--github", "mozilla-services/socorro", "--month", "2018-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("mozilla-services/socorro"));
}
