//! Release classification and quarterly support-lifecycle calendar
//!
//! A single-pass batch job: read the vendor release feed and registry tag list,
//! enrich releases with their published `release.properties`, bucket them by
//! product and version family, and derive premium/limited support end dates for
//! every quarterly train.

pub mod commands;
pub mod core;
pub mod fetch;
pub mod lifecycle;
pub mod release;
pub mod report;
pub mod ui;
