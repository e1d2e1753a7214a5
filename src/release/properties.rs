//! `key=value` properties payloads
//!
//! Deliberately minimal: no escapes, no `#` comments, no continuation lines.
//! A line is split at its first `=`, both halves trimmed; later keys overwrite
//! earlier ones.

use std::collections::HashMap;

/// Parsed properties document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
  entries: HashMap<String, String>,
}

impl Properties {
  /// Parse a properties payload
  pub fn parse(text: &str) -> Self {
    let mut entries = HashMap::new();

    for line in text.lines() {
      let Some((key, value)) = line.split_once('=') else {
        continue;
      };
      let key = key.trim();
      if key.is_empty() {
        continue;
      }
      entries.insert(key.to_string(), value.trim().to_string());
    }

    Self { entries }
  }

  /// Value for `key`, if present
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// Value for `key`, or an empty string
  pub fn value(&self, key: &str) -> String {
    self.get(key).unwrap_or_default().to_string()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
