//! Test helpers for integration tests

use anyhow::{Context, Result};
use release_calendar::core::error::{CalendarError, CalendarResult, FetchError};
use release_calendar::fetch::{FetchResponse, Fetcher};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use url::Url;

pub const FEED_URL: &str = "https://releases.liferay.com/releases.json";
pub const TAGS_URL: &str = "https://registry.hub.docker.com/v2/repositories/liferay/dxp/tags?page=1&page_size=100";
pub const CDN: &str = "https://releases-cdn.liferay.com";

/// Canned upstream services keyed by full URL
///
/// Unknown URLs answer 404, like a CDN without the requested file.
#[derive(Default)]
pub struct FakeUpstream {
  responses: HashMap<String, FetchResponse>,
  unreachable: Vec<String>,
  pub requests: RefCell<Vec<String>>,
}

impl FakeUpstream {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answer `url` with 200 and `body`
  pub fn serve(mut self, url: &str, body: impl Into<String>) -> Self {
    self.responses.insert(url.to_string(), FetchResponse::ok(body));
    self
  }

  /// Answer `url` with `status`
  pub fn status(mut self, url: &str, status: u16) -> Self {
    self.responses.insert(
      url.to_string(),
      FetchResponse {
        status,
        body: String::new(),
      },
    );
    self
  }

  /// Fail `url` before any response arrives
  pub fn unreachable(mut self, url: &str) -> Self {
    self.unreachable.push(url.to_string());
    self
  }

  pub fn request_count(&self, url: &str) -> usize {
    self.requests.borrow().iter().filter(|r| r.as_str() == url).count()
  }
}

impl Fetcher for FakeUpstream {
  fn get(&self, url: &Url) -> CalendarResult<FetchResponse> {
    self.requests.borrow_mut().push(url.to_string());
    if self.unreachable.iter().any(|u| u == url.as_str()) {
      return Err(CalendarError::Fetch(FetchError::Transport {
        url: url.to_string(),
        reason: "connection refused".to_string(),
      }));
    }
    Ok(self.responses.get(url.as_str()).cloned().unwrap_or(FetchResponse {
      status: 404,
      body: "<html>Not Found</html>".to_string(),
    }))
  }
}

/// One feed entry as published upstream
pub fn feed_entry(product: &str, family: &str, version: &str, url: &str) -> serde_json::Value {
  serde_json::json!({
    "product": product,
    "productGroupVersion": family,
    "productVersion": version,
    "promoted": "false",
    "releaseKey": format!("{}-{}", product, version),
    "targetPlatformVersion": version,
    "url": url,
  })
}

/// One registry tag page
pub fn tag_page(next: Option<&str>, tags: &[(&str, &str)]) -> String {
  let results: Vec<serde_json::Value> = tags
    .iter()
    .map(|(name, pushed)| {
      serde_json::json!({
        "name": name,
        "tag_last_pushed": pushed,
        "last_updated": pushed,
        "tag_status": "active",
      })
    })
    .collect();
  serde_json::json!({
    "count": tags.len(),
    "next": next,
    "previous": null,
    "results": results,
  })
  .to_string()
}

/// A scratch output directory
pub struct TestOutput {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestOutput {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }

  pub fn read_json(&self, path: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&self.read_file(path)?)?)
  }
}

/// Run the release-calendar binary, returning its output whatever the exit status
pub fn run_release_calendar(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-calendar");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run release-calendar")
}
