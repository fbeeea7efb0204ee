// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Select pull requests merged within [from, to) from a stream sorted by last update, stopping early
// role: core/merge-window
// inputs: Iterator of Result<PullRequestRecord, E> (newest-updated first), canonical bounds, lookback tolerance
// outputs: MergeScan (in-window PRs, items consumed, stop reason)
// invariants:
// - Dates compare as canonical YYYY-MM-DD strings
// - A merge date >= `to` stops the scan immediately
// - More than `lookback` too-old merges stop the scan
// - Each PR number is reported at most once; repeats from page drift are skipped before any window check
// - Never pulls another item once a stop condition fires; stream errors are returned unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use serde::Serialize;

use crate::dates::{normalize, DateInput};
use crate::github::model::PullRequestRecord;

/// How many merges older than the window we tolerate before giving up.
///
/// The stream is ordered by update time, so a PR merged long ago can still sort
/// first after a late comment. Raising this finds more such stragglers at the
/// cost of paging further back through history.
pub const DEFAULT_LOOKBACK: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
  StreamExhausted,
  ReachedUpperBound,
  LookbackExhausted,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeScan {
  pub prs: Vec<PullRequestRecord>,
  pub consumed: usize,
  pub past_from_date: usize,
  #[serde(skip_serializing_if = "is_zero")]
  pub duplicates: usize,
  pub stop: StopReason,
}

fn is_zero(n: &usize) -> bool {
  *n == 0
}

pub fn scan_merged<I, E>(
  stream: I,
  from: impl Into<DateInput>,
  to: impl Into<DateInput>,
  lookback: usize,
) -> Result<MergeScan, E>
where
  I: IntoIterator<Item = Result<PullRequestRecord, E>>,
{
  let from = normalize(from);
  let to = normalize(to);

  let mut prs = Vec::new();
  let mut consumed = 0;
  let mut past_from_date = 0;
  let mut duplicates = 0;
  let mut seen = HashSet::new();

  for item in stream {
    consumed += 1;
    let pr = item?;

    // Sorting by update time lets a PR touched between page fetches show up again.
    if !seen.insert(pr.number) {
      duplicates += 1;
      continue;
    }

    let Some(merged_at) = pr.merged_at else {
      continue;
    };
    let merged = normalize(merged_at);

    if merged >= to {
      return Ok(MergeScan { prs, consumed, past_from_date, duplicates, stop: StopReason::ReachedUpperBound });
    }

    if merged < from {
      past_from_date += 1;
      if past_from_date > lookback {
        return Ok(MergeScan { prs, consumed, past_from_date, duplicates, stop: StopReason::LookbackExhausted });
      }
      continue;
    }

    prs.push(pr);
  }

  Ok(MergeScan { prs, consumed, past_from_date, duplicates, stop: StopReason::StreamExhausted })
}
