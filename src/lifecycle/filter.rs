//! Selection of "first quarterly release" tags
//!
//! By default a tag is the first build of its quarter when it is named
//! `<yyyy>.q<n>.0`. The override lists correct that rule where the vendor's
//! naming changed: `include` selects a tag whatever its name, `exclude`
//! rejects a `.0` tag. `include` is consulted first, so a name listed in both
//! is selected.

use crate::core::config::OverrideLists;
use crate::core::error::CalendarResult;
use crate::release::model::DockerTagEntry;
use regex::Regex;

/// `<4 digits>.q<1 digit>.0`
pub const FIRST_QUARTERLY_PATTERN: &str = r"^[0-9]{4}\.q[0-9]{1}\.0$";

/// Filter over registry tags
pub struct QuarterlyReleaseFilter {
  pattern: Regex,
  overrides: OverrideLists,
}

impl QuarterlyReleaseFilter {
  pub fn new(overrides: OverrideLists) -> CalendarResult<Self> {
    Ok(Self {
      pattern: Regex::new(FIRST_QUARTERLY_PATTERN)?,
      overrides,
    })
  }

  /// Whether a tag name is selected
  pub fn is_selected(&self, name: &str) -> bool {
    if self.overrides.include.contains(name) {
      return true;
    }
    self.pattern.is_match(name) && !self.overrides.exclude.contains(name)
  }

  /// Keep the selected tags, in input order
  pub fn select<I>(&self, tags: I) -> Vec<DockerTagEntry>
  where
    I: IntoIterator<Item = DockerTagEntry>,
  {
    tags.into_iter().filter(|tag| self.is_selected(&tag.name)).collect()
  }
}
