// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Blocking JSON GET shared by the Bugzilla and GitHub HTTP backends
// role: transport/http
// inputs: URL, headers, query parameters, service label for errors
// outputs: Parsed JSON body and the raw Link header (pagination)
// side_effects: Network calls
// invariants:
// - Every transport or status failure maps to BriefError::Upstream; no retries
// - Non-JSON bodies map to BriefError::Decode
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;

use crate::error::{BriefError, BriefResult};

pub const USER_AGENT: &str = concat!("project-brief/", env!("CARGO_PKG_VERSION"));

pub struct JsonResponse {
  pub body: Value,
  pub link: Option<String>,
}

pub fn agent() -> ureq::Agent {
  ureq::AgentBuilder::new().user_agent(USER_AGENT).build()
}

pub fn get_json(
  agent: &ureq::Agent,
  service: &'static str,
  url: &str,
  headers: &[(&str, &str)],
  query: &[(String, String)],
) -> BriefResult<JsonResponse> {
  let mut req = agent.get(url);

  for (k, v) in headers {
    req = req.set(k, v);
  }
  for (k, v) in query {
    req = req.query(k, v);
  }

  tracing::debug!(service, url, params = query.len(), "GET");

  let resp = match req.call() {
    Ok(r) => r,
    Err(ureq::Error::Status(code, r)) => {
      let text = r.into_string().unwrap_or_default();
      return Err(BriefError::upstream(service, format!("HTTP {} from {}: {}", code, url, text.trim())));
    }
    Err(e) => return Err(BriefError::upstream(service, format!("{}: {}", url, e))),
  };

  let link = resp.header("link").map(str::to_string);
  let body = resp
    .into_json::<Value>()
    .map_err(|e| BriefError::decode(service, format!("{}: {}", url, e)))?;

  Ok(JsonResponse { body, link })
}

/// True when an RFC 8288 Link header advertises a `rel="next"` page.
pub fn has_next_link(link: Option<&str>) -> bool {
  link
    .map(|l| l.split(',').any(|part| part.contains("rel=\"next\"")))
    .unwrap_or(false)
}
