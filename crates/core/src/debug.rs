//! Optional file sink for the engine's diagnostics.
//!
//! The terminal belongs to the animation, so log output never goes to
//! stdout/stderr: without a sink the `log` macros are no-ops.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target, WriteStyle};
use log::LevelFilter;

/// Route `log` output to `path` (appending). Level defaults to `debug`;
/// `RUST_LOG` overrides it.
///
/// A second call is a no-op: the first installed sink keeps receiving output.
pub fn install_debug_sink(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening debug log {}", path.display()))?;

    let installed = Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_env(Env::default())
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_millis()
        .try_init();

    if installed.is_err() {
        log::debug!("debug sink already installed, ignoring {}", path.display());
    }
    Ok(())
}
