//! Shared helpers for the tests: tracing setup, scoped env vars, snapshot settings, and fixtures.

use once_cell::sync::OnceCell;
use serde_json::{json, Value};

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
  TRACING.get_or_init(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .with_test_writer()
      .try_init();
  });
}

/// Restores (or removes) the env vars it touched when dropped.
pub struct EnvGuard {
  saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
  fn remember(keys: &[&str]) -> Self {
    let saved = keys.iter().map(|k| (k.to_string(), std::env::var(k).ok())).collect();
    EnvGuard { saved }
  }

  pub fn set_many(vars: &[(&str, &str)]) -> Self {
    let keys: Vec<&str> = vars.iter().map(|(k, _)| *k).collect();
    let guard = Self::remember(&keys);
    for (k, v) in vars {
      std::env::set_var(k, v);
    }
    guard
  }

  pub fn unset_many(keys: &[&str]) -> Self {
    let guard = Self::remember(keys);
    for k in keys {
      std::env::remove_var(k);
    }
    guard
  }
}

impl Drop for EnvGuard {
  fn drop(&mut self) {
    for (k, v) in self.saved.drain(..).rev() {
      match v {
        Some(val) => std::env::set_var(&k, val),
        None => std::env::remove_var(&k),
      }
    }
  }
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
  EnvGuard::set_many(vars)
}

/// Clear environment variables for the duration of the returned guard.
pub fn without_env(keys: &[&str]) -> EnvGuard {
  EnvGuard::unset_many(keys)
}

/// Insta settings for brief snapshots.
///
/// - Sorts JSON object keys so snapshots do not depend on serde_json's map ordering
/// - Omits `Expression:` in snapshot headers for cleaner diffs
pub fn snapshot_settings() -> insta::Settings {
  let mut settings = insta::Settings::clone_current();
  settings.set_sort_maps(true);
  settings.set_omit_expression(true);
  settings
}

/// Pairs for `assert_cmd::Command::envs`, serializing each fixture value as JSON.
pub fn fixture_env(fixtures: &[(&str, Value)]) -> Vec<(String, String)> {
  fixtures.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

pub fn history_item(who: &str, field: &str, added: &str) -> Value {
  json!({
    "who": who,
    "when": "2018-01-15T10:00:00Z",
    "changes": [{ "field_name": field, "added": added, "removed": "" }]
  })
}

pub fn pull(number: i64, merged_at: Option<&str>) -> Value {
  json!({
    "number": number,
    "title": format!("PR {}", number),
    "html_url": format!("https://github.com/mozilla-services/socorro/pull/{}", number),
    "user": { "login": "willkg" },
    "merged_at": merged_at
  })
}
