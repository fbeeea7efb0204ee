// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Trait seam for the GitHub closed-pull-request listing with HTTP and env-fixture backends
// role: integration/github-api
// inputs: owner/name; env GITHUB_TOKEN / GH_TOKEN; optional `gh` CLI; BRIEF_TEST_PULLS_JSON when testing
// outputs: One page of raw pull JSON per call plus a has-next flag
// side_effects: Network calls to api.github.com; spawns `gh` subprocess for token discovery
// invariants:
// - Listing is always state=closed, sort=updated, direction=desc
// - Token discovery prefers GITHUB_TOKEN, then GH_TOKEN, then `gh auth token`; no token means anonymous calls
// - Repo slugs accept owner/name or GitHub https/ssh URLs
// errors: Upstream/Decode propagated unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::{BriefError, BriefResult};
use crate::http;

pub const SERVICE: &str = "github";
pub const ENV_PULLS_FIXTURE: &str = "BRIEF_TEST_PULLS_JSON";
pub const DEFAULT_PER_PAGE: u32 = 100;

/// One page of `GET /repos/{owner}/{name}/pulls`.
#[derive(Debug, Clone, Default)]
pub struct PullPage {
  pub items: Vec<Value>,
  pub has_next: bool,
}

pub trait GithubApi {
  /// Closed pulls, most recently updated first. `page` is 1-based.
  fn list_closed_pulls(&self, owner: &str, name: &str, page: u32, per_page: u32) -> BriefResult<PullPage>;
}

/// Parse `owner/name`, `https://github.com/owner/name(.git)` or `git@github.com:owner/name(.git)`.
pub fn parse_repo_slug(s: &str) -> Option<(String, String)> {
  static RE_SLUG: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^(?:git@github\.com:|https?://github\.com/)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
      .expect("static regex")
  });

  let caps = RE_SLUG.captures(s.trim())?;
  Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
}

/// Discover a GitHub token: env vars first, then `gh auth token` if available.
pub fn get_github_token() -> Option<String> {
  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Ok(t) = std::env::var(var) {
      if !t.trim().is_empty() {
        return Some(t.trim().to_string());
      }
    }
  }

  if let Ok(output) = std::process::Command::new("gh").args(["auth", "token"]).output() {
    if output.status.success() {
      let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

      if !t.is_empty() {
        return Some(t);
      }
    }
  }

  None
}

struct GithubHttpApi {
  token: Option<String>,
  agent: ureq::Agent,
}

impl GithubApi for GithubHttpApi {
  fn list_closed_pulls(&self, owner: &str, name: &str, page: u32, per_page: u32) -> BriefResult<PullPage> {
    let url = format!("https://api.github.com/repos/{}/{}/pulls", owner, name);
    let auth = self.token.as_ref().map(|t| format!("Bearer {}", t));

    let mut headers: Vec<(&str, &str)> = vec![
      ("Accept", "application/vnd.github+json"),
      ("X-GitHub-Api-Version", "2022-11-28"),
    ];
    if let Some(a) = auth.as_deref() {
      headers.push(("Authorization", a));
    }

    let query: Vec<(String, String)> = vec![
      ("state".into(), "closed".into()),
      ("sort".into(), "updated".into()),
      ("direction".into(), "desc".into()),
      ("per_page".into(), per_page.to_string()),
      ("page".into(), page.to_string()),
    ];

    let resp = http::get_json(&self.agent, SERVICE, &url, &headers, &query)?;
    let items = match resp.body {
      Value::Array(items) => items,
      other => {
        return Err(BriefError::decode(SERVICE, format!("expected an array of pulls, got {}", kind(&other))));
      }
    };

    Ok(PullPage {
      has_next: http::has_next_link(resp.link.as_deref()),
      items,
    })
  }
}

fn kind(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Serves pages from `BRIEF_TEST_PULLS_JSON`, a JSON array of pages (each an array of pulls).
struct GithubEnvApi;

impl GithubApi for GithubEnvApi {
  fn list_closed_pulls(&self, _owner: &str, _name: &str, page: u32, _per_page: u32) -> BriefResult<PullPage> {
    let Ok(s) = std::env::var(ENV_PULLS_FIXTURE) else {
      return Ok(PullPage::default());
    };
    let pages: Vec<Vec<Value>> =
      serde_json::from_str(&s).map_err(|e| BriefError::decode(SERVICE, format!("{}: {}", ENV_PULLS_FIXTURE, e)))?;

    let idx = page.saturating_sub(1) as usize;

    Ok(PullPage {
      items: pages.get(idx).cloned().unwrap_or_default(),
      has_next: idx + 1 < pages.len(),
    })
  }
}

pub fn make_http_api(token: Option<String>) -> Box<dyn GithubApi> {
  Box::new(GithubHttpApi { token, agent: http::agent() })
}

pub fn make_env_api() -> Box<dyn GithubApi> {
  Box::new(GithubEnvApi)
}

pub fn make_default_api() -> Box<dyn GithubApi> {
  if std::env::var(ENV_PULLS_FIXTURE).is_ok() {
    tracing::debug!("using env-backed github fixtures");
    return make_env_api();
  }

  let token = get_github_token();
  if token.is_none() {
    tracing::warn!("no GitHub token found (GITHUB_TOKEN, GH_TOKEN, or `gh auth login`); using anonymous requests");
  }

  make_http_api(token)
}
