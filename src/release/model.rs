//! Records read from the upstream feed and registry, and the records derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published product build, as listed in the releases feed
///
/// Field names follow the feed's camelCase keys. `release_properties` is absent
/// from the feed and filled in once by the enricher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
  #[serde(default)]
  pub product: String,
  /// Version family: "7.4" or a quarterly label such as "2024.q1"
  #[serde(default)]
  pub product_group_version: String,
  #[serde(default)]
  pub product_version: String,
  #[serde(default)]
  pub promoted: String,
  #[serde(default)]
  pub release_key: String,
  #[serde(default)]
  pub target_platform_version: String,
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub release_properties: ReleaseMetadata,
}

/// Build metadata parsed from a release's `release.properties`
///
/// Either fully populated from one successful fetch, or entirely empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMetadata {
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub app_server_tomcat_version: String,
  #[serde(default)]
  pub build_timestamp: String,
  #[serde(default)]
  pub bundle_checksum_sha512: String,
  #[serde(default, rename = "bundleURL")]
  pub bundle_url: String,
  #[serde(default)]
  pub git_hash_liferay_docker: String,
  #[serde(default, rename = "gitHashLiferayPortalEE")]
  pub git_hash_liferay_portal_ee: String,
  #[serde(default)]
  pub liferay_docker_image: String,
  #[serde(default)]
  pub liferay_docker_tags: String,
  #[serde(default)]
  pub liferay_product_version: String,
  #[serde(default)]
  pub release_date: String,
  #[serde(default)]
  pub target_platform_version: String,
}

impl ReleaseMetadata {
  /// True for the zero value left behind by a skipped enrichment
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

/// One page of the registry tag listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockerTagPage {
  #[serde(default)]
  pub count: u64,
  /// Cursor to the following page; empty or null on the last page
  #[serde(default)]
  pub next: Option<String>,
  #[serde(default)]
  pub previous: Option<String>,
  #[serde(default)]
  pub results: Vec<DockerTagEntry>,
}

impl DockerTagPage {
  /// The next-page cursor, if pagination continues
  pub fn next_page(&self) -> Option<&str> {
    self.next.as_deref().filter(|next| !next.is_empty())
  }
}

/// One registry tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockerTagEntry {
  /// `<year>.<quarter>.<patch>` for quarterly builds
  pub name: String,
  #[serde(default)]
  pub tag_last_pushed: Option<DateTime<Utc>>,
  #[serde(default)]
  pub last_updated: Option<DateTime<Utc>>,
  #[serde(default)]
  pub tag_status: String,
}

/// Support-lifecycle record of one quarterly release train
///
/// Serialized field order is the report's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyRelease {
  /// `<year>.<quarter>`
  pub name: String,
  pub first_ship_date_origin: String,
  pub first_ship_date: String,
  pub end_of_premium_support: String,
  pub end_of_limited_support: String,
  pub lts: bool,
}
