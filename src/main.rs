use anyhow::Result;
use clap::Parser;

mod bugzilla;
mod cli;
mod dates;
mod error;
mod ext;
mod github;
mod http;
mod report;
mod util;
mod window;

use crate::cli::{normalize, Cli};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve ranges
  let now_opt = window::parse_now(cfg.now_override.as_deref());
  let ranges = window::resolve_ranges(&cfg.window, now_opt)?;
  tracing::debug!(ranges = ranges.len(), "resolved report window");

  // Phase 3: query both services per range, then write the document
  let backends = report::Backends::from_config(&cfg);
  let doc = report::build_document(&cfg, &ranges, &backends)?;

  report::write_document(&doc, &cfg.out)
}
