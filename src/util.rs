// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Process-level helpers: stderr tracing setup and man page rendering
// role: utilities/helpers
// inputs: RUST_LOG; clap CommandFactory
// outputs: Installed tracing subscriber; troff man page text
// invariants:
// - Logs go to stderr so stdout stays pure JSON
// - ANSI colors only when stderr is a terminal
// - init_tracing is safe to call more than once
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::IsTerminal;

use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

/// Install the stderr fmt subscriber; `RUST_LOG` overrides the default `warn` level.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
