//! Network access for the pipeline
//!
//! Everything upstream is reached through the [`Fetcher`] trait so the pipeline
//! can run against the real services ([`HttpFetcher`]) or an in-memory stand-in.
//! Calls are strictly sequential and attempted once.

use crate::core::config::HttpConfig;
use crate::core::error::{CalendarError, CalendarResult, DataError, FetchError};
use crate::ui::{CallLine, OutputMode};
use serde::de::DeserializeOwned;
use url::Url;

/// A fully-read HTTP response
#[derive(Debug, Clone)]
pub struct FetchResponse {
  pub status: u16,
  pub body: String,
}

impl FetchResponse {
  pub fn ok(body: impl Into<String>) -> Self {
    Self {
      status: 200,
      body: body.into(),
    }
  }

  /// 2xx status
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Turn a non-success status into a fatal fetch error
  pub fn error_for_status(self, url: &Url) -> CalendarResult<Self> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(CalendarError::Fetch(FetchError::Status {
        url: url.to_string(),
        status: self.status,
      }))
    }
  }
}

/// Blocking GET of a URL
///
/// `Err` means the request never produced a response (connect, TLS, timeout,
/// body read). A response with any status is `Ok`.
pub trait Fetcher {
  fn get(&self, url: &Url) -> CalendarResult<FetchResponse>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
  fn get(&self, url: &Url) -> CalendarResult<FetchResponse> {
    (**self).get(url)
  }
}

/// Fetcher backed by a shared `reqwest` blocking client
pub struct HttpFetcher {
  client: reqwest::blocking::Client,
}

impl HttpFetcher {
  /// Build a client with the configured connect and overall timeouts
  pub fn new(config: &HttpConfig) -> CalendarResult<Self> {
    let client = reqwest::blocking::Client::builder()
      .connect_timeout(config.connect_timeout())
      .timeout(config.timeout())
      .user_agent(concat!("release-calendar/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client })
  }
}

impl Fetcher for HttpFetcher {
  fn get(&self, url: &Url) -> CalendarResult<FetchResponse> {
    let response = self.client.get(url.clone()).send()?;
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok(FetchResponse { status, body })
  }
}

/// Decorator printing one progress line per call
pub struct LoggedFetcher<F> {
  inner: F,
  mode: OutputMode,
}

impl<F: Fetcher> LoggedFetcher<F> {
  pub fn new(inner: F, mode: OutputMode) -> Self {
    Self { inner, mode }
  }
}

impl<F: Fetcher> Fetcher for LoggedFetcher<F> {
  fn get(&self, url: &Url) -> CalendarResult<FetchResponse> {
    let line = CallLine::start(self.mode, url.as_str());
    let result = self.inner.get(url);
    let ok = matches!(&result, Ok(response) if response.is_success());
    line.finish(ok);
    result
  }
}

/// GET a URL that must answer 2xx with a JSON body
pub fn fetch_json<T, F>(fetcher: &F, url: &Url) -> CalendarResult<T>
where
  T: DeserializeOwned,
  F: Fetcher + ?Sized,
{
  let response = fetcher.get(url)?.error_for_status(url)?;
  serde_json::from_str(&response.body).map_err(|e| {
    CalendarError::Data(DataError::MalformedPayload {
      url: url.to_string(),
      reason: format!("not the expected JSON ({})", e),
    })
  })
}
