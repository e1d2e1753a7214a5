//! Latest workspace Gradle plugin version from Maven Central

use crate::core::context::RunContext;
use crate::core::error::{CalendarResult, ResultExt};
use crate::fetch::{Fetcher, fetch_json};
use crate::report::write_file;
use serde::Deserialize;
use url::Url;

/// Artifact looked up, also the name of the output file
pub const WORKSPACE_PLUGIN: &str = "com.liferay.gradle.plugins.workspace";

#[derive(Debug, Deserialize)]
struct SearchResponse {
  response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
  #[serde(rename = "numFound", default)]
  num_found: u64,
  #[serde(default)]
  docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
  #[serde(rename = "latestVersion")]
  latest_version: String,
}

/// Look up the plugin and write its version to `<output>/com.liferay.gradle.plugins.workspace`
///
/// Returns `None` when Maven Central does not know the artifact.
pub fn run_plugin<F: Fetcher + ?Sized>(ctx: &RunContext, fetcher: &F) -> CalendarResult<Option<String>> {
  let url = Url::parse(&ctx.config.sources.maven_search).context("Invalid sources.maven_search")?;
  let search: SearchResponse = fetch_json(fetcher, &url)?;

  let latest = match search.response.docs.into_iter().next() {
    Some(doc) if search.response.num_found > 0 => doc.latest_version,
    _ => {
      println!("could not find {} in maven central", WORKSPACE_PLUGIN);
      return Ok(None);
    }
  };

  println!("{}={}", WORKSPACE_PLUGIN, latest);
  write_file(&ctx.output_dir.join(WORKSPACE_PLUGIN), &latest)?;
  Ok(Some(latest))
}
