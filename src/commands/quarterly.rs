//! Quarterly support-lifecycle table
//!
//! registry tags → first-quarterly filter → first-ship date → support windows
//! → `quarterly_releases_dates.{csv,json}`

use crate::core::context::RunContext;
use crate::core::error::{CalendarResult, ResultExt};
use crate::fetch::Fetcher;
use crate::lifecycle::{QuarterlyCalendar, QuarterlyReleaseFilter, fetch_all_tags};
use crate::release::QuarterlyRelease;
use crate::report;
use url::Url;

/// Build and write the lifecycle table
///
/// With `json`, the table is also printed to stdout.
pub fn run_quarterly<F: Fetcher + ?Sized>(
  ctx: &RunContext,
  fetcher: &F,
  json: bool,
) -> CalendarResult<Vec<QuarterlyRelease>> {
  let sources = &ctx.config.sources;
  let first_page = Url::parse(&sources.docker_tags).context("Invalid sources.docker_tags")?;
  let tags = fetch_all_tags(fetcher, first_page)?;

  let filter = QuarterlyReleaseFilter::new(ctx.config.quarterly.clone())?;
  let calendar = QuarterlyCalendar::new(fetcher, sources, filter)?;
  let rows = calendar.build(tags)?;

  let (csv_path, json_path) = report::write_lifecycle(&ctx.output_dir, &rows)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
  } else {
    println!();
    println!("🗓️  {} quarterly releases", rows.len());
    for row in &rows {
      let lts = if row.lts { " [LTS]" } else { "" };
      println!(
        "  {} shipped {} → premium {} / limited {}{}",
        row.name, row.first_ship_date, row.end_of_premium_support, row.end_of_limited_support, lts
      );
    }
    println!("  wrote {} and {}", csv_path.display(), json_path.display());
  }

  Ok(rows)
}
