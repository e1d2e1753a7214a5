//! Quarterly lifecycle table (CSV + JSON)

use crate::core::error::CalendarResult;
use crate::release::model::QuarterlyRelease;
use crate::report::write_file;
use std::path::{Path, PathBuf};

pub const LIFECYCLE_CSV: &str = "quarterly_releases_dates.csv";
pub const LIFECYCLE_JSON: &str = "quarterly_releases_dates.json";

const CSV_HEADER: &str = "name,firstShipDateOrigin,firstShipDate,endOfPremiumSupport,endOfLimitedSupport";

/// Quote a field only when it would otherwise break the row
fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}

/// Render rows with a header line; every line ends with `\n`
pub fn lifecycle_csv(rows: &[QuarterlyRelease]) -> String {
  let mut out = String::with_capacity(64 * (rows.len() + 1));
  out.push_str(CSV_HEADER);
  out.push('\n');
  for row in rows {
    let fields = [
      row.name.as_str(),
      row.first_ship_date_origin.as_str(),
      row.first_ship_date.as_str(),
      row.end_of_premium_support.as_str(),
      row.end_of_limited_support.as_str(),
    ];
    let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
  }
  out
}

/// Write both renderings; returns (csv path, json path)
pub fn write_lifecycle(output_dir: &Path, rows: &[QuarterlyRelease]) -> CalendarResult<(PathBuf, PathBuf)> {
  let csv_path = output_dir.join(LIFECYCLE_CSV);
  write_file(&csv_path, lifecycle_csv(rows))?;

  let json_path = output_dir.join(LIFECYCLE_JSON);
  write_file(&json_path, serde_json::to_vec(rows)?)?;

  Ok((csv_path, json_path))
}
