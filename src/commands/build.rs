//! Full scheduled run: plugin lookup, release files, quarterly table

use crate::commands::plugin::run_plugin;
use crate::commands::quarterly::run_quarterly;
use crate::commands::releases::run_releases;
use crate::core::context::RunContext;
use crate::core::error::CalendarResult;
use crate::fetch::Fetcher;

/// Run every stage in order; the first fatal error stops the batch
pub fn run_build<F: Fetcher + ?Sized>(ctx: &RunContext, fetcher: &F) -> CalendarResult<()> {
  run_plugin(ctx, fetcher)?;
  let releases = run_releases(ctx, fetcher)?;
  let quarterly = run_quarterly(ctx, fetcher, false)?;

  println!();
  println!(
    "✅ Wrote {} release files and {} quarterly releases to {}",
    releases.files.len(),
    quarterly.len(),
    ctx.output_dir.display()
  );
  Ok(())
}
