//! Classified release files under `releases/`

use crate::core::error::CalendarResult;
use crate::release::classify::{ClassifiedReleases, Product};
use crate::release::enrich::RELEASES_DIR;
use crate::release::model::Release;
use crate::report::{to_json_pretty, write_file};
use std::path::{Path, PathBuf};

/// Complete enriched feed, every product included
pub const ALL_RELEASES_FILE: &str = "releases.json";

/// `dxp_releases.json` for the unfiltered list, `dxp_74_releases.json` for a family
pub fn release_file_name(product: Product, family: Option<&str>) -> String {
  match family {
    Some(family) => format!("{}_{}_releases.json", product.as_str(), family.replace('.', "")),
    None => format!("{}_releases.json", product.as_str()),
  }
}

fn write_releases(path: &Path, releases: &[Release]) -> CalendarResult<PathBuf> {
  write_file(path, to_json_pretty(releases)?)?;
  Ok(path.to_path_buf())
}

/// Write the full feed, one unfiltered file per product and one file per bucket
pub fn write_release_files(
  output_dir: &Path,
  all: &[Release],
  classified: &ClassifiedReleases,
) -> CalendarResult<Vec<PathBuf>> {
  let dir = output_dir.join(RELEASES_DIR);
  let mut written = vec![write_releases(&dir.join(ALL_RELEASES_FILE), all)?];

  for group in classified.products() {
    written.push(write_releases(&dir.join(release_file_name(group.product, None)), &group.all)?);
  }

  for group in classified.products() {
    for bucket in &group.buckets {
      let path = dir.join(release_file_name(group.product, Some(bucket.family)));
      written.push(write_releases(&path, &bucket.releases)?);
    }
  }

  Ok(written)
}
