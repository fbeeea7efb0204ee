// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Credit resolved bugs to whoever resolved them and tally creators/resolvers/resolutions
// role: core/attribution
// inputs: BugRecord batches; a history lookup per bug id; UnattributedPolicy
// outputs: CreatedSummary, ResolvedSummary (ResolvedBug pairs, never mutated input)
// invariants:
// - The resolving event is the most recent history item whose status change adds RESOLVED
// - Unassigned ("nobody") bugs are credited to the resolving event's actor
// - Each tally map sums to its summary's count
// errors: History lookup errors propagate unchanged; Unattributed only under the `error` policy
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::bugzilla::model::{local_part, BugRecord, HistoryItem};
use crate::error::{BriefError, BriefResult};

/// Tally bucket for bugs nobody can be credited with.
pub const UNKNOWN_RESOLVER: &str = "unknown";
/// Tally key for a bug with an empty resolution field.
pub const EMPTY_RESOLUTION: &str = "---";

/// What to do with an unassigned bug whose history has no resolving transition.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum UnattributedPolicy {
  #[default]
  Unknown,
  Skip,
  Error,
}

/// Walk history newest-first and return the latest event that resolved the bug.
pub fn find_resolution_item(history: &[HistoryItem]) -> Option<&HistoryItem> {
  history.iter().rev().find(|item| item.is_resolving())
}

/// A bug paired with the event that resolved it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBug {
  pub bug: BugRecord,
  pub resolution_item: Option<HistoryItem>,
}

pub fn resolve_bug(bug: BugRecord, history: &[HistoryItem]) -> ResolvedBug {
  let resolution_item = find_resolution_item(history).cloned();
  ResolvedBug { bug, resolution_item }
}

// Echo the service record with our computed `brief_resolution_item` alongside it.
impl Serialize for ResolvedBug {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let fields = self.bug.raw.as_object();
    let mut map = serializer.serialize_map(None)?;

    match fields {
      Some(obj) => {
        for (k, v) in obj.iter().filter(|(k, _)| k.as_str() != "brief_resolution_item") {
          map.serialize_entry(k, v)?;
        }
      }
      None => map.serialize_entry("id", &self.bug.id)?,
    }

    map.serialize_entry("brief_resolution_item", &self.resolution_item)?;
    map.end()
  }
}

/// Who gets credit for a resolved bug, or `None` when nobody can be named.
///
/// A resolving event with a blank `who` names nobody.
pub fn credit_resolver(resolved: &ResolvedBug) -> Option<String> {
  let assignee = resolved.bug.assignee_name();

  let name = if assignee.is_unassigned() {
    resolved.resolution_item.as_ref().map(|item| item.who.as_str())?
  } else {
    assignee.as_str()?
  };

  let credited = local_part(name).trim();
  (!credited.is_empty()).then(|| credited.to_string())
}

fn bump(map: &mut BTreeMap<String, i64>, key: &str) {
  *map.entry(key.to_string()).or_insert(0) += 1;
}

#[derive(Debug, Serialize)]
pub struct CreatedSummary {
  pub count: usize,
  pub creators: BTreeMap<String, i64>,
  pub bugs: Vec<serde_json::Value>,
}

pub fn tally_created(bugs: Vec<BugRecord>) -> CreatedSummary {
  let mut creators = BTreeMap::new();

  for bug in &bugs {
    let name = bug.creator_name();
    bump(&mut creators, name.as_str().unwrap_or(UNKNOWN_RESOLVER));
  }

  CreatedSummary {
    count: bugs.len(),
    creators,
    bugs: bugs.into_iter().map(|b| b.raw).collect(),
  }
}

#[derive(Debug, Serialize)]
pub struct ResolvedSummary {
  pub count: usize,
  pub resolvers: BTreeMap<String, i64>,
  pub resolved_map: BTreeMap<String, i64>,
  pub bugs: Vec<ResolvedBug>,
}

/// Attribute every bug in a resolved-bugs batch.
///
/// `history_for` is called once per bug, in input order.
pub fn tally_resolved<F>(bugs: Vec<BugRecord>, mut history_for: F, policy: UnattributedPolicy) -> BriefResult<ResolvedSummary>
where
  F: FnMut(i64) -> BriefResult<Vec<HistoryItem>>,
{
  let mut resolvers = BTreeMap::new();
  let mut resolved_map = BTreeMap::new();
  let mut out: Vec<ResolvedBug> = Vec::with_capacity(bugs.len());

  for bug in bugs {
    let history = history_for(bug.id)?;
    let resolved = resolve_bug(bug, &history);

    let resolver = match credit_resolver(&resolved) {
      Some(name) => name,
      None => match policy {
        UnattributedPolicy::Error => return Err(BriefError::Unattributed { bug_id: resolved.bug.id }),
        UnattributedPolicy::Skip => {
          tracing::warn!(bug_id = resolved.bug.id, "unassigned bug has no resolving transition naming a resolver; skipped");
          continue;
        }
        UnattributedPolicy::Unknown => {
          tracing::warn!(bug_id = resolved.bug.id, "unassigned bug has no resolving transition naming a resolver; counted as unknown");
          UNKNOWN_RESOLVER.to_string()
        }
      },
    };

    let resolution = if resolved.bug.resolution.is_empty() { EMPTY_RESOLUTION } else { resolved.bug.resolution.as_str() };

    bump(&mut resolvers, &resolver);
    bump(&mut resolved_map, resolution);
    out.push(resolved);
  }

  Ok(ResolvedSummary {
    count: out.len(),
    resolvers,
    resolved_map,
    bugs: out,
  })
}
