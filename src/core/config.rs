use crate::core::error::{CalendarError, CalendarResult, ConfigError, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration for release-calendar
/// Searched in order: release-calendar.toml, .config/release-calendar.toml
///
/// Every field has a default, so a missing file means "run against the public
/// upstream services with the historical override lists".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
  #[serde(default)]
  pub sources: SourcesConfig,
  #[serde(default)]
  pub quarterly: OverrideLists,
  #[serde(default)]
  pub http: HttpConfig,
  #[serde(default)]
  pub output: OutputConfig,
}

/// Upstream endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
  /// JSON array of every published release
  #[serde(default = "default_releases_feed")]
  pub releases_feed: String,

  /// First page of the registry tag listing; later pages follow the `next` cursor
  #[serde(default = "default_docker_tags")]
  pub docker_tags: String,

  /// Human-facing tag page, used as the first-ship date origin for registry dates
  #[serde(default = "default_docker_tag_page")]
  pub docker_tag_page: String,

  /// Base under which `<tag>/release.properties` is published
  #[serde(default = "default_release_properties_base")]
  pub release_properties_base: String,

  /// Maven Central search for the workspace plugin
  #[serde(default = "default_maven_search")]
  pub maven_search: String,
}

fn default_releases_feed() -> String {
  "https://releases.liferay.com/releases.json".to_string()
}

fn default_docker_tags() -> String {
  "https://registry.hub.docker.com/v2/repositories/liferay/dxp/tags?page=1&page_size=100".to_string()
}

fn default_docker_tag_page() -> String {
  "https://hub.docker.com/r/liferay/dxp/tags".to_string()
}

fn default_release_properties_base() -> String {
  "https://releases-cdn.liferay.com/dxp".to_string()
}

fn default_maven_search() -> String {
  "https://search.maven.org/solrsearch/select?q=a:com.liferay.gradle.plugins.workspace&rows=1&wt=json".to_string()
}

impl Default for SourcesConfig {
  fn default() -> Self {
    Self {
      releases_feed: default_releases_feed(),
      docker_tags: default_docker_tags(),
      docker_tag_page: default_docker_tag_page(),
      release_properties_base: default_release_properties_base(),
      maven_search: default_maven_search(),
    }
  }
}

impl SourcesConfig {
  /// Every endpoint must be an absolute http(s) URL
  pub fn validate(&self) -> CalendarResult<()> {
    let fields = [
      ("sources.releases_feed", &self.releases_feed),
      ("sources.docker_tags", &self.docker_tags),
      ("sources.docker_tag_page", &self.docker_tag_page),
      ("sources.release_properties_base", &self.release_properties_base),
      ("sources.maven_search", &self.maven_search),
    ];

    for (field, value) in fields {
      let parsed = Url::parse(value).map_err(|e| {
        CalendarError::Config(ConfigError::InvalidField {
          field: field.to_string(),
          reason: format!("'{}' is not a URL ({})", value, e),
        })
      })?;
      if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CalendarError::Config(ConfigError::InvalidField {
          field: field.to_string(),
          reason: format!("unsupported scheme '{}'", parsed.scheme()),
        }));
      }
    }

    Ok(())
  }
}

/// Quarterly tag overrides
///
/// `include` names are selected whether or not they look like a `.0` tag, and
/// win over `exclude` for the same name. `exclude` only rejects names that the
/// default `.0` pattern would otherwise select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideLists {
  #[serde(default = "default_include")]
  pub include: BTreeSet<String>,
  #[serde(default = "default_exclude")]
  pub exclude: BTreeSet<String>,
}

fn default_include() -> BTreeSet<String> {
  ["2024.q1.1", "2023.q3.1"].into_iter().map(String::from).collect()
}

fn default_exclude() -> BTreeSet<String> {
  ["2024.q1.0", "2023.q3.0"].into_iter().map(String::from).collect()
}

impl Default for OverrideLists {
  fn default() -> Self {
    Self {
      include: default_include(),
      exclude: default_exclude(),
    }
  }
}

impl OverrideLists {
  /// Build override lists from literal names
  pub fn new<I, E, S>(include: I, exclude: E) -> Self
  where
    I: IntoIterator<Item = S>,
    E: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      include: include.into_iter().map(Into::into).collect(),
      exclude: exclude.into_iter().map(Into::into).collect(),
    }
  }

  /// No overrides; the `.0` pattern alone decides
  pub fn empty() -> Self {
    Self {
      include: BTreeSet::new(),
      exclude: BTreeSet::new(),
    }
  }
}

/// Per-call network limits, applied identically to every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
  #[serde(default = "default_connect_timeout_secs")]
  pub connect_timeout_secs: u64,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
  60
}

fn default_timeout_secs() -> u64 {
  120
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      connect_timeout_secs: default_connect_timeout_secs(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl HttpConfig {
  /// Validate timeouts (must be positive)
  pub fn validate(&self) -> CalendarResult<()> {
    if self.connect_timeout_secs == 0 {
      return Err(CalendarError::Config(ConfigError::InvalidField {
        field: "http.connect_timeout_secs".to_string(),
        reason: "must be greater than zero".to_string(),
      }));
    }
    if self.timeout_secs == 0 {
      return Err(CalendarError::Config(ConfigError::InvalidField {
        field: "http.timeout_secs".to_string(),
        reason: "must be greater than zero".to_string(),
      }));
    }
    Ok(())
  }

  pub fn connect_timeout(&self) -> Duration {
    Duration::from_secs(self.connect_timeout_secs)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Directory that receives `releases/`, the quarterly table and the plugin file
  #[serde(default = "default_output_dir")]
  pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
  PathBuf::from(".")
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      dir: default_output_dir(),
    }
  }
}

impl CalendarConfig {
  /// Find config file in search order: release-calendar.toml, .config/release-calendar.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release-calendar.toml"),
      path.join(".config").join("release-calendar.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load configuration
  ///
  /// An explicit path must exist. Without one, the working directory is searched
  /// and defaults apply when nothing is found.
  pub fn load(working_dir: &Path, explicit: Option<&Path>) -> CalendarResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(CalendarError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        path.to_path_buf()
      }
      None => match Self::find_config_path(working_dir) {
        Some(path) => path,
        None => return Ok(Self::default()),
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    Self::parse(&content).with_context(|| format!("Invalid configuration in {}", config_path.display()))
  }

  /// Parse and validate configuration text
  pub fn parse(content: &str) -> CalendarResult<Self> {
    let config: CalendarConfig = toml_edit::de::from_str(content)?;
    config.sources.validate()?;
    config.http.validate()?;
    Ok(config)
  }
}
