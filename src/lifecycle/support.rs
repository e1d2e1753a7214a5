//! Support window arithmetic
//!
//! | train   | premium support ends | limited support ends |
//! |---------|----------------------|----------------------|
//! | LTS     | ship + 3y − 1d       | ship + 5y − 1d       |
//! | regular | ship + 1y − 1d       | N/A                  |
//!
//! "ship + Ny − 1d" is the day before the same month/day N years on, evaluated
//! as `(year + N, month, day − 1)` and then normalized. A train shipped on a
//! leap day therefore ends on Feb 28, and one shipped on Mar 1 the year before a
//! leap year ends on Feb 29.

use chrono::{Datelike, Duration, NaiveDate};

/// Textual date format used throughout the reports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder for a support phase that does not apply
pub const NOT_APPLICABLE: &str = "N/A";

const REGULAR_PREMIUM_YEARS: i32 = 1;
const LTS_PREMIUM_YEARS: i32 = 3;
const LTS_LIMITED_YEARS: i32 = 5;

/// Whether a quarter segment ("q1", "Q1", ...) designates an LTS train
pub fn is_lts_quarter(quarter: &str) -> bool {
  quarter.eq_ignore_ascii_case("q1")
}

/// Parse a `YYYY-MM-DD` first-ship date
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
  NaiveDate::parse_from_str(value, DATE_FORMAT)
}

pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// The day before the same month/day `years` later
///
/// `None` only when the result falls outside chrono's supported range.
pub fn years_later_minus_one_day(date: NaiveDate, years: i32) -> Option<NaiveDate> {
  let first_of_month = NaiveDate::from_ymd_opt(date.year().checked_add(years)?, date.month(), 1)?;
  // (y + n, m, d - 1) == first of month + (d - 2) days
  first_of_month.checked_add_signed(Duration::days(i64::from(date.day()) - 2))
}

/// Support end dates of one release train
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportWindow {
  pub premium_end: NaiveDate,
  /// `None` for trains without a limited-support phase
  pub limited_end: Option<NaiveDate>,
}

impl SupportWindow {
  /// Compute the windows for a train first shipped on `first_ship`
  pub fn compute(first_ship: NaiveDate, lts: bool) -> Option<Self> {
    if lts {
      Some(Self {
        premium_end: years_later_minus_one_day(first_ship, LTS_PREMIUM_YEARS)?,
        limited_end: Some(years_later_minus_one_day(first_ship, LTS_LIMITED_YEARS)?),
      })
    } else {
      Some(Self {
        premium_end: years_later_minus_one_day(first_ship, REGULAR_PREMIUM_YEARS)?,
        limited_end: None,
      })
    }
  }

  pub fn premium_end_text(&self) -> String {
    format_date(self.premium_end)
  }

  /// Limited-support end, or `"N/A"`
  pub fn limited_end_text(&self) -> String {
    self
      .limited_end
      .map(format_date)
      .unwrap_or_else(|| NOT_APPLICABLE.to_string())
  }
}
