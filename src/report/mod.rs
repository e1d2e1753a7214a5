//! Output files
//!
//! Everything is written once per run, straight to its final path. A crashed
//! run can leave partial files behind; the next scheduled run rewrites them.

pub mod lifecycle;
pub mod releases;

use crate::core::error::{CalendarResult, ResultExt};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

pub use lifecycle::{LIFECYCLE_CSV, LIFECYCLE_JSON, lifecycle_csv, write_lifecycle};
pub use releases::{release_file_name, write_release_files};

/// Serialize as JSON indented with a single space per level
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> CalendarResult<Vec<u8>> {
  let mut buf = Vec::new();
  let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
  value.serialize(&mut serializer)?;
  Ok(buf)
}

/// Write a file, creating its parent directory
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> CalendarResult<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }
  fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
