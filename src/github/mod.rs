// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub side of a brief: pull requests merged in a window for one repository
// role: integration/github
// inputs: &dyn GithubApi, owner/name, window bounds, lookback tolerance
// outputs: MergeScan
// side_effects: Paged listing calls, stopped as soon as the scan stops
// errors: BriefError propagated unchanged from the API seam
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod merge_window;
pub mod model;
pub mod pages;

use crate::dates::DateInput;
use crate::error::BriefResult;
use api::{GithubApi, DEFAULT_PER_PAGE};
use merge_window::{scan_merged, MergeScan};
use pages::PullPages;

pub fn merged_pull_requests(
  api: &dyn GithubApi,
  owner: &str,
  name: &str,
  from: impl Into<DateInput>,
  to: impl Into<DateInput>,
  lookback: usize,
) -> BriefResult<MergeScan> {
  let mut pages = PullPages::new(api, owner, name, DEFAULT_PER_PAGE);
  let scan = scan_merged(&mut pages, from, to, lookback)?;

  tracing::info!(
    repo = %format!("{}/{}", owner, name),
    merged = scan.prs.len(),
    consumed = scan.consumed,
    duplicates = scan.duplicates,
    pages = pages.pages_requested(),
    stop = ?scan.stop,
    "merged pull requests"
  );

  Ok(scan)
}
