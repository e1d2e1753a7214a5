//! Classified release files
//!
//! feed → enrich each release → classify → `releases/*.json`

use crate::core::context::RunContext;
use crate::core::error::{CalendarResult, ResultExt};
use crate::fetch::{Fetcher, fetch_json};
use crate::release::{ClassifiedReleases, EnrichSummary, MetadataEnricher, Release};
use crate::report;
use std::path::PathBuf;
use url::Url;

/// What a releases run produced
#[derive(Debug)]
pub struct ReleasesReport {
  pub releases: Vec<Release>,
  pub classified: ClassifiedReleases,
  pub enrichment: EnrichSummary,
  pub files: Vec<PathBuf>,
}

/// Fetch the release feed; any failure is fatal
pub fn fetch_feed<F: Fetcher + ?Sized>(fetcher: &F, feed_url: &str) -> CalendarResult<Vec<Release>> {
  let url = Url::parse(feed_url).context("Invalid sources.releases_feed")?;
  fetch_json(fetcher, &url).with_context(|| format!("Failed to load the release feed from {}", url))
}

/// Run the releases pipeline
pub fn run_releases<F: Fetcher + ?Sized>(ctx: &RunContext, fetcher: &F) -> CalendarResult<ReleasesReport> {
  let mut releases = fetch_feed(fetcher, &ctx.config.sources.releases_feed)?;

  let enricher = MetadataEnricher::new(fetcher, &ctx.output_dir, ctx.mode);
  let enrichment = enricher.enrich_all(&mut releases)?;

  let classified = ClassifiedReleases::classify(&releases);
  print_summary(&classified, &enrichment, releases.len());

  let files = report::write_release_files(&ctx.output_dir, &releases, &classified)?;

  Ok(ReleasesReport {
    releases,
    classified,
    enrichment,
    files,
  })
}

fn print_summary(classified: &ClassifiedReleases, enrichment: &EnrichSummary, total: usize) {
  println!();
  for line in summary_lines(classified, enrichment, total) {
    println!("{}", line);
  }
}

/// Per-bucket counts, a blank line after each product, then the totals
fn summary_lines(classified: &ClassifiedReleases, enrichment: &EnrichSummary, total: usize) -> Vec<String> {
  let mut lines = Vec::new();
  for group in classified.products() {
    for bucket in &group.buckets {
      lines.push(format!(
        "{} {} ({} releases)",
        group.product.label(),
        bucket.family,
        bucket.releases.len()
      ));
    }
    lines.push(String::new());
  }

  lines.push(format!(
    "📦 {} releases, {} enriched, {} without release.properties",
    total,
    enrichment.enriched,
    enrichment.skipped.len()
  ));
  if classified.unclassified > 0 {
    lines.push(format!(
      "   {} releases from other products (releases.json only)",
      classified.unclassified
    ));
  }
  lines
}
