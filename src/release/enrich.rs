//! Per-release metadata enrichment
//!
//! For every release the enricher fetches `<release url>/release.properties`,
//! keeps a copy of the raw payload under `releases/` (mirroring the URL path)
//! and replaces the release's metadata record with the parsed fields.
//!
//! A release whose properties cannot be fetched keeps an empty record and the
//! batch moves on. Only local write failures abort the run.

use crate::core::error::{CalendarError, CalendarResult, ResultExt};
use crate::fetch::Fetcher;
use crate::release::model::{Release, ReleaseMetadata};
use crate::release::properties::Properties;
use crate::ui::{BatchProgress, OutputMode};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// File name of the per-release properties document
pub const PROPERTIES_FILE: &str = "release.properties";

/// Directory (under the output dir) holding release files and raw payloads
pub const RELEASES_DIR: &str = "releases";

/// Properties URL of a release: its URL with one more path segment
pub fn properties_url(release_url: &str) -> CalendarResult<Url> {
  let mut url = Url::parse(release_url)?;
  url
    .path_segments_mut()
    .map_err(|_| CalendarError::message(format!("Release URL '{}' cannot carry a path", release_url)))?
    .pop_if_empty()
    .push(PROPERTIES_FILE);
  Ok(url)
}

/// Where the raw payload of `url` is stored
///
/// Scheme and host are dropped; the remaining directory segments are kept
/// below `<root>/releases`, e.g. `https://cdn/dxp/2024.q1.1/release.properties`
/// is stored at `<root>/releases/dxp/2024.q1.1/release.properties`.
pub fn storage_path(root: &Path, url: &Url) -> PathBuf {
  let mut path = root.join(RELEASES_DIR);
  if let Some(segments) = url.path_segments() {
    let segments: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    if let Some((_, dirs)) = segments.split_last() {
      for dir in dirs {
        path.push(dir);
      }
    }
  }
  path.join(PROPERTIES_FILE)
}

impl ReleaseMetadata {
  /// Map the known property keys; unknown keys are ignored, missing ones are empty
  pub fn from_properties(url: &Url, props: &Properties) -> Self {
    Self {
      url: url.to_string(),
      app_server_tomcat_version: props.value("app.server.tomcat.version"),
      build_timestamp: props.value("build.timestamp"),
      bundle_checksum_sha512: props.value("bundle.checksum.sha512"),
      bundle_url: props.value("bundle.url"),
      git_hash_liferay_docker: props.value("git.hash.liferay-docker"),
      git_hash_liferay_portal_ee: props.value("git.hash.liferay-portal-ee"),
      liferay_docker_image: props.value("liferay.docker.image"),
      liferay_docker_tags: props.value("liferay.docker.tags"),
      liferay_product_version: props.value("liferay.product.version"),
      release_date: props.value("release.date"),
      target_platform_version: props.value("target.platform.version"),
    }
  }
}

/// Result of enriching one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
  Enriched,
  Skipped { reason: String },
}

/// A release left with an empty metadata record
#[derive(Debug, Clone)]
pub struct SkippedRelease {
  pub release_key: String,
  pub reason: String,
}

/// Batch-level enrichment counts
#[derive(Debug, Clone, Default)]
pub struct EnrichSummary {
  pub enriched: usize,
  pub skipped: Vec<SkippedRelease>,
}

/// Fetches and attaches `release.properties` metadata
pub struct MetadataEnricher<'a, F: ?Sized> {
  fetcher: &'a F,
  output_dir: PathBuf,
  mode: OutputMode,
}

impl<'a, F: Fetcher + ?Sized> MetadataEnricher<'a, F> {
  pub fn new(fetcher: &'a F, output_dir: impl Into<PathBuf>, mode: OutputMode) -> Self {
    Self {
      fetcher,
      output_dir: output_dir.into(),
      mode,
    }
  }

  /// Enrich one release in place
  pub fn enrich(&self, release: &mut Release) -> CalendarResult<EnrichOutcome> {
    let url = match properties_url(&release.url) {
      Ok(url) => url,
      Err(e) => return Ok(EnrichOutcome::Skipped { reason: e.to_string() }),
    };

    let response = match self.fetcher.get(&url) {
      Ok(response) if response.is_success() => response,
      Ok(response) => {
        return Ok(EnrichOutcome::Skipped {
          reason: format!("HTTP {} from {}", response.status, url),
        });
      }
      Err(e) => return Ok(EnrichOutcome::Skipped { reason: e.to_string() }),
    };

    let path = storage_path(&self.output_dir, &url);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, &response.body).with_context(|| format!("Failed to write {}", path.display()))?;

    let props = Properties::parse(&response.body);
    release.release_properties = ReleaseMetadata::from_properties(&url, &props);
    Ok(EnrichOutcome::Enriched)
  }

  /// Enrich every release, in order
  pub fn enrich_all(&self, releases: &mut [Release]) -> CalendarResult<EnrichSummary> {
    let mut summary = EnrichSummary::default();
    let mut progress = BatchProgress::new(self.mode, releases.len(), "Fetching release.properties");

    for release in releases.iter_mut() {
      match self.enrich(release)? {
        EnrichOutcome::Enriched => summary.enriched += 1,
        EnrichOutcome::Skipped { reason } => summary.skipped.push(SkippedRelease {
          release_key: release.release_key.clone(),
          reason,
        }),
      }
      progress.inc();
    }

    Ok(summary)
  }
}
