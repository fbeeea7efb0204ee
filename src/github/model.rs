use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{BriefError, BriefResult};
use crate::ext::serde_json::JsonFetch;
use crate::github::api::SERVICE;

/// A GitHub pull request: the fields a brief reads, plus the whole listing item.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestRecord {
  pub number: i64,
  pub title: String,
  pub html_url: String,
  pub user: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
  pub merged_at: Option<DateTime<Utc>>,
  pub raw: Value,
}

impl PullRequestRecord {
  /// Build from a `GET /repos/{o}/{r}/pulls` item. Unparseable timestamps read as absent;
  /// an item without a numeric `number` is a decode error.
  pub fn from_json(v: &Value) -> BriefResult<Self> {
    let number = v
      .fetch("number")
      .to::<i64>()
      .ok_or_else(|| BriefError::decode(SERVICE, format!("pull request without a number: {}", v)))?;

    Ok(PullRequestRecord {
      number,
      title: v.fetch("title").to_or_default::<String>(),
      html_url: v.fetch("html_url").to_or_default::<String>(),
      user: v.fetch("user.login").text().map(str::to_string),
      updated_at: v.fetch("updated_at").to::<DateTime<Utc>>(),
      merged_at: v.fetch("merged_at").to::<DateTime<Utc>>(),
      raw: v.clone(),
    })
  }
}

// Pull requests go out exactly as GitHub returned them.
impl Serialize for PullRequestRecord {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(obj) = self.raw.as_object() {
      let mut map = serializer.serialize_map(Some(obj.len()))?;
      for (k, v) in obj {
        map.serialize_entry(k, v)?;
      }
      return map.end();
    }

    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("number", &self.number)?;
    map.serialize_entry("title", &self.title)?;
    map.serialize_entry("html_url", &self.html_url)?;
    map.serialize_entry("merged_at", &self.merged_at)?;
    map.end()
  }
}
