// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed views over Bugzilla bug and history JSON, plus the display-name fallback chain
// role: model/bugzilla
// inputs: serde_json::Value records from the search and history services
// outputs: BugRecord, HistoryItem, Change, PersonName
// invariants:
// - BugRecord keeps the raw JSON so reports echo the service record back unchanged
// - PersonName precedence: display name > handle derived from login > unknown
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BriefError, BriefResult};
use crate::ext::serde_json::JsonFetch;

#[derive(Debug, Clone, PartialEq)]
pub struct BugRecord {
  pub id: i64,
  pub creator: Option<String>,
  pub creator_real_name: Option<String>,
  pub assigned_to: Option<String>,
  pub assigned_to_real_name: Option<String>,
  pub resolution: String,
  pub raw: Value,
}

impl BugRecord {
  pub fn from_json(v: &Value) -> BriefResult<Self> {
    let id = v
      .fetch("id")
      .to::<i64>()
      .ok_or_else(|| BriefError::decode("bugzilla", "bug record without numeric id"))?;

    Ok(BugRecord {
      id,
      creator: v.fetch("creator").text().map(str::to_string),
      creator_real_name: v.fetch("creator_detail.real_name").text().map(str::to_string),
      assigned_to: v.fetch("assigned_to").text().map(str::to_string),
      assigned_to_real_name: v.fetch("assigned_to_detail.real_name").text().map(str::to_string),
      resolution: v.fetch("resolution").to_or_default::<String>(),
      raw: v.clone(),
    })
  }

  pub fn creator_name(&self) -> PersonName {
    PersonName::resolve(self.creator_real_name.as_deref(), self.creator.as_deref())
  }

  pub fn assignee_name(&self) -> PersonName {
    PersonName::resolve(self.assigned_to_real_name.as_deref(), self.assigned_to.as_deref())
  }
}

/// Parse the `bugs` array of a search response.
pub fn bugs_from_search(resp: &Value) -> BriefResult<Vec<BugRecord>> {
  let arr = resp
    .fetch("bugs")
    .array()
    .ok_or_else(|| BriefError::decode("bugzilla", "search response has no `bugs` array"))?;

  arr.iter().map(BugRecord::from_json).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
  pub field_name: String,
  #[serde(default)]
  pub added: String,
  #[serde(default)]
  pub removed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
  pub who: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub when: Option<String>,
  #[serde(default)]
  pub changes: Vec<Change>,
}

impl HistoryItem {
  /// True when this event moved the bug's status to RESOLVED.
  pub fn is_resolving(&self) -> bool {
    self.changes.iter().any(|c| c.field_name == "status" && c.added == "RESOLVED")
  }
}

/// Read `bugs[0].history` from a history-service response, oldest first.
pub fn history_from_response(resp: &Value) -> BriefResult<Vec<HistoryItem>> {
  let items = resp
    .fetch("bugs.0.history")
    .array()
    .ok_or_else(|| BriefError::decode("bugzilla", "history response has no `bugs[0].history` array"))?;

  items
    .iter()
    .map(|item| {
      HistoryItem::deserialize(item).map_err(|e| BriefError::decode("bugzilla", format!("history item: {}", e)))
    })
    .collect()
}

/// The name we credit a person under, in order of preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonName {
  DisplayName(String),
  /// Local part of a login such as `bob@example.com`.
  DerivedHandle(String),
  Unknown,
}

impl PersonName {
  pub fn resolve(real_name: Option<&str>, login: Option<&str>) -> Self {
    if let Some(name) = real_name.map(str::trim).filter(|s| !s.is_empty()) {
      return PersonName::DisplayName(name.to_string());
    }

    match login.map(local_part).filter(|s| !s.is_empty()) {
      Some(handle) => PersonName::DerivedHandle(handle.to_string()),
      None => PersonName::Unknown,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      PersonName::DisplayName(s) | PersonName::DerivedHandle(s) => Some(s),
      PersonName::Unknown => None,
    }
  }

  /// Bugzilla's placeholder assignee (`nobody@mozilla.org`) or no assignee at all.
  pub fn is_unassigned(&self) -> bool {
    match self.as_str() {
      Some(s) => s.to_lowercase().contains("nobody"),
      None => true,
    }
  }
}

/// Substring before the first '@' (the whole string when there is none).
pub fn local_part(s: &str) -> &str {
  s.split('@').next().unwrap_or(s)
}
