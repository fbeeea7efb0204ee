// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Error kinds surfaced by the Bugzilla/GitHub collaborators and the attribution policy
// role: errors/types
// outputs: BriefError enum and BriefResult alias
// invariants:
// - Upstream failures carry the service name and are never retried or reinterpreted
// - Unattributed is only produced under the `error` unattributed policy
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BriefError {
  /// Transport or HTTP-status failure talking to an external service.
  #[error("{service} unavailable: {detail}")]
  Upstream { service: &'static str, detail: String },

  /// The service answered, but not with the JSON shape we read.
  #[error("unexpected {service} response: {detail}")]
  Decode { service: &'static str, detail: String },

  #[error("bug {bug_id} is unassigned and no resolving transition in its history names who resolved it")]
  Unattributed { bug_id: i64 },
}

impl BriefError {
  pub fn upstream(service: &'static str, detail: impl Into<String>) -> Self {
    BriefError::Upstream { service, detail: detail.into() }
  }

  pub fn decode(service: &'static str, detail: impl Into<String>) -> Self {
    BriefError::Decode { service, detail: detail.into() }
  }
}

pub type BriefResult<T> = std::result::Result<T, BriefError>;
