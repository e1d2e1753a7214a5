//! Progress reporting for batch runs
//!
//! Two styles are available: one line per network call with a ✅/❌ glyph and
//! elapsed seconds, or a `linya` bar over the enrichment pass. The bar is
//! allocation-free but owns the terminal line, so per-call lines are muted while
//! it is active.

use linya::{Bar, Progress};
use std::io::Write;
use std::time::{Duration, Instant};

/// How much a run prints while it works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
  /// One line per network call
  #[default]
  Lines,
  /// Progress bar for the enrichment pass, per-call lines muted
  Bar,
  /// Only summaries
  Quiet,
}

impl OutputMode {
  /// Resolve from the global CLI flags (`--quiet` wins over `--progress`)
  pub fn from_flags(quiet: bool, progress: bool) -> Self {
    if quiet {
      OutputMode::Quiet
    } else if progress {
      OutputMode::Bar
    } else {
      OutputMode::Lines
    }
  }

  /// Whether per-call lines are printed
  pub fn shows_calls(self) -> bool {
    matches!(self, OutputMode::Lines)
  }
}

/// Timer for a single network call
pub struct CallLine {
  started: Instant,
  visible: bool,
}

impl CallLine {
  /// Print `Get <url>` and start timing
  pub fn start(mode: OutputMode, url: &str) -> Self {
    let visible = mode.shows_calls();
    if visible {
      print!("Get {}", url);
      let _ = std::io::stdout().flush();
    }
    Self {
      started: Instant::now(),
      visible,
    }
  }

  /// Finish the line with a glyph and the elapsed time
  pub fn finish(self, ok: bool) -> Duration {
    let elapsed = self.started.elapsed();
    if self.visible {
      println!("{}", format_outcome(ok, elapsed));
    }
    elapsed
  }
}

/// ` ✅ (0.42 s)` / ` ❌ (0.42 s)`
pub fn format_outcome(ok: bool, elapsed: Duration) -> String {
  let glyph = if ok { "✅" } else { "❌" };
  format!(" {} ({:.2} s)", glyph, elapsed.as_secs_f64())
}

/// Progress bar over a batch of releases
///
/// Inert unless the output mode is [`OutputMode::Bar`].
pub struct BatchProgress {
  inner: Option<(Progress, Bar)>,
}

impl BatchProgress {
  /// Create a progress bar for `total` items
  pub fn new(mode: OutputMode, total: usize, label: impl Into<String>) -> Self {
    let inner = match mode {
      OutputMode::Bar if total > 0 => {
        let mut progress = Progress::new();
        let bar = progress.bar(total, label.into());
        Some((progress, bar))
      }
      _ => None,
    };
    Self { inner }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    if let Some((progress, bar)) = self.inner.as_mut() {
      progress.inc_and_draw(bar, 1);
    }
  }
}
