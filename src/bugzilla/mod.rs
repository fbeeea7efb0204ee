// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Bugzilla side of a brief: created-bug and resolved-bug summaries for one product and window
// role: integration/bugzilla
// inputs: &dyn BugzillaApi, product, window bounds, UnattributedPolicy
// outputs: CreatedSummary, ResolvedSummary
// side_effects: One search call per summary; one history call per resolved bug
// errors: BriefError propagated unchanged from the API seam
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod attribution;
pub mod model;
pub mod query;

use crate::dates::DateInput;
use crate::error::BriefResult;
use api::BugzillaApi;
use attribution::{tally_created, tally_resolved, CreatedSummary, ResolvedSummary, UnattributedPolicy};
use model::{bugs_from_search, history_from_response};
use query::BugQuery;

pub fn bugs_created(
  api: &dyn BugzillaApi,
  product: &str,
  from: impl Into<DateInput>,
  to: impl Into<DateInput>,
) -> BriefResult<CreatedSummary> {
  let query = BugQuery::created(product, from, to);
  let bugs = bugs_from_search(&api.search_bugs(&query)?)?;

  tracing::info!(product, count = bugs.len(), "bugs created");

  Ok(tally_created(bugs))
}

pub fn bugs_resolved(
  api: &dyn BugzillaApi,
  product: &str,
  from: impl Into<DateInput>,
  to: impl Into<DateInput>,
  policy: UnattributedPolicy,
) -> BriefResult<ResolvedSummary> {
  let query = BugQuery::resolved(product, from, to);
  let bugs = bugs_from_search(&api.search_bugs(&query)?)?;

  tracing::info!(product, count = bugs.len(), "bugs resolved");

  tally_resolved(bugs, |id| history_from_response(&api.bug_history(id)?), policy)
}
