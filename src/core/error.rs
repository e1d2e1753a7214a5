//! Error types for release-calendar with contextual messages and exit codes
//!
//! Every fatal condition of a batch run ends up here. Recoverable per-release
//! failures never become a `CalendarError`; they are reported and skipped by the
//! enricher instead.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args)
  User = 1,
  /// System error (network, I/O)
  System = 2,
  /// Data integrity failure (unparsable dates, malformed upstream payloads)
  Data = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-calendar
#[derive(Debug)]
pub enum CalendarError {
  /// Configuration errors
  Config(ConfigError),

  /// Network fetch errors
  Fetch(FetchError),

  /// Upstream data that violates what the pipeline derives from it
  Data(DataError),

  /// I/O errors, with the operation that failed
  Io {
    source: io::Error,
    context: Option<String>,
  },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl CalendarError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    CalendarError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      CalendarError::Message { message, context, help } => CalendarError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      CalendarError::Io { source, context } => CalendarError::Io {
        source,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      CalendarError::Config(_) => ExitCode::User,
      CalendarError::Fetch(_) => ExitCode::System,
      CalendarError::Data(_) => ExitCode::Data,
      CalendarError::Io { .. } => ExitCode::System,
      CalendarError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      CalendarError::Config(e) => e.help_message(),
      CalendarError::Fetch(e) => e.help_message(),
      CalendarError::Data(e) => e.help_message(),
      CalendarError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for CalendarError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CalendarError::Config(e) => write!(f, "{}", e),
      CalendarError::Fetch(e) => write!(f, "{}", e),
      CalendarError::Data(e) => write!(f, "{}", e),
      CalendarError::Io { source, context } => {
        write!(f, "I/O error: {}", source)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      CalendarError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for CalendarError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CalendarError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for CalendarError {
  fn from(err: io::Error) -> Self {
    CalendarError::Io {
      source: err,
      context: None,
    }
  }
}

impl From<String> for CalendarError {
  fn from(msg: String) -> Self {
    CalendarError::message(msg)
  }
}

impl From<&str> for CalendarError {
  fn from(msg: &str) -> Self {
    CalendarError::message(msg)
  }
}

impl From<serde_json::Error> for CalendarError {
  fn from(err: serde_json::Error) -> Self {
    CalendarError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for CalendarError {
  fn from(err: toml_edit::de::Error) -> Self {
    CalendarError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<reqwest::Error> for CalendarError {
  fn from(err: reqwest::Error) -> Self {
    CalendarError::Fetch(FetchError::Transport {
      url: err.url().map(|u| u.to_string()).unwrap_or_default(),
      reason: err.to_string(),
    })
  }
}

impl From<url::ParseError> for CalendarError {
  fn from(err: url::ParseError) -> Self {
    CalendarError::message(format!("URL parse error: {}", err))
  }
}

impl From<regex::Error> for CalendarError {
  fn from(err: regex::Error) -> Self {
    CalendarError::message(format!("Regex error: {}", err))
  }
}

impl From<chrono::ParseError> for CalendarError {
  fn from(err: chrono::ParseError) -> Self {
    CalendarError::message(format!("Date parse error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// A field holds a value the pipeline cannot use
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to run with built-in defaults, or create release-calendar.toml.".to_string())
      }
      ConfigError::InvalidField { field, .. } => Some(format!("Fix or remove '{}' in release-calendar.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid configuration value for '{}': {}", field, reason)
      }
    }
  }
}

/// Network fetch errors
#[derive(Debug)]
pub enum FetchError {
  /// Connection, TLS, timeout or body read failure
  Transport { url: String, reason: String },

  /// Server answered with a non-success status
  Status { url: String, status: u16 },
}

impl FetchError {
  fn help_message(&self) -> Option<String> {
    match self {
      FetchError::Transport { .. } => {
        Some("Check network connectivity, or raise [http] timeouts in release-calendar.toml.".to_string())
      }
      FetchError::Status { status, .. } if *status == 429 => {
        Some("The upstream service is rate limiting; re-run the batch later.".to_string())
      }
      FetchError::Status { .. } => None,
    }
  }
}

impl fmt::Display for FetchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FetchError::Transport { url, reason } => write!(f, "Request to {} failed: {}", url, reason),
      FetchError::Status { url, status } => write!(f, "Request to {} returned HTTP {}", url, status),
    }
  }
}

/// Data integrity errors in upstream payloads
#[derive(Debug)]
pub enum DataError {
  /// A first-ship date that is not `YYYY-MM-DD`
  InvalidDate { release: String, value: String },

  /// A tag carries neither a push nor an update timestamp
  MissingTimestamp { tag: String },

  /// A tag name that does not split into `<year>.<quarter>.<patch>`
  MalformedTagName { tag: String },

  /// A successful response whose body cannot be used (not JSON, looping cursor)
  MalformedPayload { url: String, reason: String },
}

impl DataError {
  fn help_message(&self) -> Option<String> {
    match self {
      DataError::InvalidDate { release, .. } => Some(format!(
        "Inspect the release.properties published for {} or drop it with [quarterly] exclude.",
        release
      )),
      DataError::MalformedTagName { .. } => {
        Some("Only <year>.<quarter>.<patch> tags can be listed in [quarterly] include.".to_string())
      }
      DataError::MissingTimestamp { .. } => None,
      DataError::MalformedPayload { .. } => {
        Some("The upstream service answered with an unexpected body; re-run the batch later.".to_string())
      }
    }
  }
}

impl fmt::Display for DataError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DataError::InvalidDate { release, value } => {
        write!(f, "Release {} has an unparsable first-ship date '{}'", release, value)
      }
      DataError::MissingTimestamp { tag } => write!(f, "Registry tag {} has no push or update timestamp", tag),
      DataError::MalformedTagName { tag } => {
        write!(f, "Registry tag '{}' is not a <year>.<quarter>.<patch> name", tag)
      }
      DataError::MalformedPayload { url, reason } => write!(f, "Malformed response from {}: {}", url, reason),
    }
  }
}

/// Result type alias for release-calendar
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> CalendarResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> CalendarResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<CalendarError>,
{
  fn context(self, ctx: impl Into<String>) -> CalendarResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> CalendarResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &CalendarError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
