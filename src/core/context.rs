//! Run context - resolved once in main.rs, passed to every command
//!
//! ```text
//! main.rs:
//!   RunContext::resolve() -> &RunContext
//!   |
//!   v
//! commands/releases.rs, quarterly.rs, plugin.rs:
//!   fn run_*(ctx: &RunContext, fetcher: &F)
//! ```

use crate::core::config::CalendarConfig;
use crate::core::error::CalendarResult;
use crate::ui::OutputMode;
use std::path::{Path, PathBuf};

/// Configuration and output settings shared by all commands
#[derive(Debug, Clone)]
pub struct RunContext {
  /// Loaded (or default) configuration
  pub config: CalendarConfig,

  /// Directory receiving every output file
  pub output_dir: PathBuf,

  /// Progress style
  pub mode: OutputMode,
}

impl RunContext {
  /// Load configuration and apply command-line overrides
  ///
  /// A relative output directory is resolved against `working_dir`.
  pub fn resolve(
    working_dir: &Path,
    config_path: Option<&Path>,
    output_dir: Option<PathBuf>,
    mode: OutputMode,
  ) -> CalendarResult<Self> {
    let config = CalendarConfig::load(working_dir, config_path)?;
    let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
    let output_dir = if output_dir.is_absolute() {
      output_dir
    } else {
      working_dir.join(output_dir)
    };

    Ok(Self {
      config,
      output_dir,
      mode,
    })
  }

  /// Context with default configuration writing to `output_dir`
  pub fn with_output_dir(output_dir: impl Into<PathBuf>, mode: OutputMode) -> Self {
    Self {
      config: CalendarConfig::default(),
      output_dir: output_dir.into(),
      mode,
    }
  }
}
