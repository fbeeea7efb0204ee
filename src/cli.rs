use anyhow::{bail, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::bugzilla::attribution::UnattributedPolicy;
use crate::github::api::parse_repo_slug;
use crate::github::merge_window::DEFAULT_LOOKBACK;
use crate::window::WindowSpec;

pub const DEFAULT_BUGZILLA_URL: &str = "https://bugzilla.mozilla.org";

#[derive(Parser, Debug)]
#[command(
    name = "project-brief",
    version,
    about = "Summarize Bugzilla bugs and merged GitHub pull requests for a date window",
    long_about = None
)]
pub struct Cli {
  /// Bugzilla product to summarize (repeatable)
  #[arg(long = "product")]
  pub products: Vec<String>,

  /// GitHub repository as owner/name or URL (repeatable)
  #[arg(long = "github")]
  pub github: Vec<String>,

  /// Calendar month, e.g. 2018-01
  #[arg(long)]
  pub month: Option<String>,

  /// Natural language window, e.g. "last week" or "every month for the last 6 months"
  #[arg(long = "for")]
  pub for_str: Option<String>,

  /// Window start (YYYY-MM-DD, inclusive); must be paired with --until
  #[arg(long, alias = "start")]
  pub since: Option<String>,

  /// Window end (YYYY-MM-DD, exclusive); must be paired with --since
  #[arg(long, alias = "end")]
  pub until: Option<String>,

  /// Bugzilla instance base URL
  #[arg(long, default_value = DEFAULT_BUGZILLA_URL)]
  pub bugzilla_url: String,

  /// Merged-before-window pulls tolerated before the PR scan stops
  #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
  pub lookback: usize,

  /// Unassigned bugs with no resolving transition: count as "unknown", skip, or fail
  #[arg(long, value_enum, default_value_t = UnattributedPolicy::Unknown)]
  pub unattributed: UnattributedPolicy,

  /// Output file path ("-" for stdout)
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant for natural-language windows (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub products: Vec<String>,
  pub github_repos: Vec<(String, String)>,
  pub window: WindowSpec,
  pub bugzilla_url: String,
  pub lookback: usize,
  pub unattributed: UnattributedPolicy,
  pub out: String,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let window = match (&cli.month, &cli.for_str, &cli.since, &cli.until) {
    (Some(ym), None, None, None) => WindowSpec::Month { ym: ym.clone() },
    (None, Some(p), None, None) => WindowSpec::ForPhrase { phrase: p.clone() },
    (None, None, Some(s), Some(u)) => WindowSpec::SinceUntil {
      since: s.clone(),
      until: u.clone(),
    },
    (None, None, None, None) => {
      bail!("Provide one of --month, --for, or (--since AND --until)")
    }
    _ => bail!("Ambiguous time selection: choose only one of --month | --for | --since/--until"),
  };

  if cli.products.is_empty() && cli.github.is_empty() {
    bail!("Nothing to summarize: pass at least one --product or --github");
  }

  let mut github_repos = Vec::with_capacity(cli.github.len());
  for slug in &cli.github {
    match parse_repo_slug(slug) {
      Some(pair) => github_repos.push(pair),
      None => bail!("invalid --github {:?}, expected owner/name", slug),
    }
  }

  let products = cli
    .products
    .iter()
    .map(|p| p.trim().to_string())
    .filter(|p| !p.is_empty())
    .collect();

  Ok(EffectiveConfig {
    products,
    github_repos,
    window,
    bugzilla_url: cli.bugzilla_url,
    lookback: cli.lookback,
    unattributed: cli.unattributed,
    out: cli.out,
    now_override: cli.now_override,
  })
}
