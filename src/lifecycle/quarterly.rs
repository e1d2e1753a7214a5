//! Quarterly support-lifecycle table
//!
//! One row per quarterly train. The first-ship date comes from the train's
//! published `release.properties` when it carries a `release.date`, and from
//! the registry push timestamp of the selected tag otherwise.

use crate::core::config::SourcesConfig;
use crate::core::error::{CalendarError, CalendarResult, DataError, ResultExt};
use crate::fetch::Fetcher;
use crate::lifecycle::filter::QuarterlyReleaseFilter;
use crate::lifecycle::support::{self, SupportWindow};
use crate::release::enrich::PROPERTIES_FILE;
use crate::release::model::{DockerTagEntry, QuarterlyRelease};
use crate::release::properties::Properties;
use std::collections::HashSet;
use url::Url;

/// Where a first-ship date was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstShipDate {
  pub date: String,
  pub origin: String,
}

/// `2024.q1.2` → (`2024.q1`, `q1`)
pub fn train_name(tag: &str) -> CalendarResult<(String, String)> {
  let mut parts = tag.split('.');
  match (parts.next(), parts.next()) {
    (Some(year), Some(quarter)) if !year.is_empty() && !quarter.is_empty() => {
      Ok((format!("{}.{}", year, quarter), quarter.to_string()))
    }
    _ => Err(CalendarError::Data(DataError::MalformedTagName { tag: tag.to_string() })),
  }
}

/// Builds the lifecycle table from registry tags
pub struct QuarterlyCalendar<'a, F: ?Sized> {
  fetcher: &'a F,
  filter: QuarterlyReleaseFilter,
  properties_base: Url,
  tag_page: Url,
}

impl<'a, F: Fetcher + ?Sized> QuarterlyCalendar<'a, F> {
  pub fn new(fetcher: &'a F, sources: &SourcesConfig, filter: QuarterlyReleaseFilter) -> CalendarResult<Self> {
    Ok(Self {
      fetcher,
      filter,
      properties_base: Url::parse(&sources.release_properties_base)
        .context("Invalid sources.release_properties_base")?,
      tag_page: Url::parse(&sources.docker_tag_page).context("Invalid sources.docker_tag_page")?,
    })
  }

  /// `<properties base>/<tag>/release.properties`
  pub fn release_properties_url(&self, tag: &str) -> CalendarResult<Url> {
    let mut url = self.properties_base.clone();
    url
      .path_segments_mut()
      .map_err(|_| CalendarError::message(format!("{} cannot carry a path", self.properties_base)))?
      .pop_if_empty()
      .push(tag)
      .push(PROPERTIES_FILE);
    Ok(url)
  }

  /// `<tag page>?name=<tag>`
  pub fn registry_origin(&self, tag: &str) -> String {
    let mut url = self.tag_page.clone();
    url.query_pairs_mut().append_pair("name", tag);
    url.to_string()
  }

  /// `release.date` published for a tag, if any
  ///
  /// Lookup failures are not fatal: the registry date is used instead.
  fn published_release_date(&self, tag: &str) -> CalendarResult<Option<FirstShipDate>> {
    let url = self.release_properties_url(tag)?;
    let response = match self.fetcher.get(&url) {
      Ok(response) if response.is_success() => response,
      _ => return Ok(None),
    };

    let props = Properties::parse(&response.body);
    Ok(props.get("release.date").filter(|date| !date.is_empty()).map(|date| FirstShipDate {
      date: date.to_string(),
      origin: url.to_string(),
    }))
  }

  /// Resolve the first-ship date of a selected tag
  pub fn first_ship_date(&self, tag: &DockerTagEntry) -> CalendarResult<FirstShipDate> {
    if let Some(published) = self.published_release_date(&tag.name)? {
      return Ok(published);
    }

    let pushed = tag
      .tag_last_pushed
      .or(tag.last_updated)
      .ok_or_else(|| CalendarError::Data(DataError::MissingTimestamp { tag: tag.name.clone() }))?;

    Ok(FirstShipDate {
      date: support::format_date(pushed.date_naive()),
      origin: self.registry_origin(&tag.name),
    })
  }

  /// Select first quarterly tags and compute their support windows
  ///
  /// Rows are sorted by first-ship date, newest first; ties keep tag order.
  pub fn build(&self, tags: Vec<DockerTagEntry>) -> CalendarResult<Vec<QuarterlyRelease>> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for tag in self.filter.select(tags) {
      let (name, quarter) = train_name(&tag.name)?;
      if !seen.insert(name.clone()) {
        eprintln!("⚠️  {} already has a first release; ignoring tag {}", name, tag.name);
        continue;
      }

      let first_ship = self.first_ship_date(&tag)?;
      let invalid_date = || {
        CalendarError::Data(DataError::InvalidDate {
          release: name.clone(),
          value: first_ship.date.clone(),
        })
      };
      let date = support::parse_date(&first_ship.date).map_err(|_| invalid_date())?;
      let lts = support::is_lts_quarter(&quarter);
      let window = SupportWindow::compute(date, lts).ok_or_else(invalid_date)?;

      rows.push(QuarterlyRelease {
        name: name.clone(),
        first_ship_date_origin: first_ship.origin,
        first_ship_date: first_ship.date,
        end_of_premium_support: window.premium_end_text(),
        end_of_limited_support: window.limited_end_text(),
        lts,
      });
    }

    rows.sort_by(|a, b| b.first_ship_date.cmp(&a.first_ship_date));
    Ok(rows)
  }
}
