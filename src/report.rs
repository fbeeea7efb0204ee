// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Assemble per-range briefs (Bugzilla products + GitHub repos) and write the JSON document
// role: processing/orchestrator
// inputs: EffectiveConfig, labeled ranges, API backends
// outputs: BriefDocument on stdout or at --out
// side_effects: Network calls via the API seams; writes the output file when --out is a path
// invariants:
// - Ranges, products and repos appear in the order given on the command line
// - The first upstream error aborts the run; partial briefs are never written
// errors: BriefError converted to anyhow with the product/repo/range in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::bugzilla::{self, api::BugzillaApi, attribution::CreatedSummary, attribution::ResolvedSummary};
use crate::cli::EffectiveConfig;
use crate::github::{self, api::GithubApi, merge_window::MergeScan};
use crate::window::LabeledRange;

#[derive(Debug, Serialize)]
pub struct ProductBrief {
  pub product: String,
  pub created: CreatedSummary,
  pub resolved: ResolvedSummary,
}

#[derive(Debug, Serialize)]
pub struct RepoBrief {
  pub repo: String,
  pub count: usize,
  #[serde(flatten)]
  pub scan: MergeScan,
}

#[derive(Debug, Serialize)]
pub struct RangeBrief {
  pub label: String,
  pub since: String,
  pub until: String,
  pub products: Vec<ProductBrief>,
  pub github: Vec<RepoBrief>,
}

#[derive(Debug, Serialize)]
pub struct BriefDocument {
  pub ranges: Vec<RangeBrief>,
}

pub struct Backends {
  pub bugzilla: Box<dyn BugzillaApi>,
  /// Only built when there are repositories to scan; token discovery may spawn `gh`.
  pub github: Option<Box<dyn GithubApi>>,
}

impl Backends {
  pub fn from_config(cfg: &EffectiveConfig) -> Self {
    let github = if cfg.github_repos.is_empty() { None } else { Some(github::api::make_default_api()) };

    Backends { bugzilla: bugzilla::api::make_default_api(&cfg.bugzilla_url), github }
  }
}

pub fn build_range_brief(cfg: &EffectiveConfig, range: &LabeledRange, backends: &Backends) -> Result<RangeBrief> {
  let mut products = Vec::with_capacity(cfg.products.len());

  for product in &cfg.products {
    let created = bugzilla::bugs_created(backends.bugzilla.as_ref(), product, &range.since, &range.until)
      .with_context(|| format!("bugs created in {} for {}", product, range.label))?;
    let resolved = bugzilla::bugs_resolved(
      backends.bugzilla.as_ref(),
      product,
      &range.since,
      &range.until,
      cfg.unattributed,
    )
    .with_context(|| format!("bugs resolved in {} for {}", product, range.label))?;

    products.push(ProductBrief { product: product.clone(), created, resolved });
  }

  let mut repos = Vec::with_capacity(cfg.github_repos.len());

  for (owner, name) in &cfg.github_repos {
    let api = backends.github.as_deref().ok_or_else(|| anyhow!("no GitHub backend configured for {}/{}", owner, name))?;
    let scan = github::merged_pull_requests(api, owner, name, &range.since, &range.until, cfg.lookback)
      .with_context(|| format!("merged pull requests in {}/{} for {}", owner, name, range.label))?;

    repos.push(RepoBrief { repo: format!("{}/{}", owner, name), count: scan.prs.len(), scan });
  }

  Ok(RangeBrief {
    label: range.label.clone(),
    since: range.since.clone(),
    until: range.until.clone(),
    products,
    github: repos,
  })
}

pub fn build_document(cfg: &EffectiveConfig, ranges: &[LabeledRange], backends: &Backends) -> Result<BriefDocument> {
  let ranges = ranges
    .iter()
    .map(|r| build_range_brief(cfg, r, backends))
    .collect::<Result<Vec<_>>>()?;

  Ok(BriefDocument { ranges })
}

/// Write pretty JSON to stdout ("-") or to a file, creating parent directories.
pub fn write_document(doc: &BriefDocument, out: &str) -> Result<()> {
  let bytes = serde_json::to_vec_pretty(doc)?;

  if out == "-" {
    use std::io::Write;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.write_all(b"\n")?;
    return Ok(());
  }

  let path = std::path::Path::new(out);
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
  tracing::info!(path = %path.display(), "brief written");

  Ok(())
}
