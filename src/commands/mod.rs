//! CLI commands for release-calendar
//!
//! - **build**: everything below, in order (the scheduled job)
//! - **releases**: enriched, classified release files
//! - **quarterly**: quarterly support-lifecycle table
//! - **plugin**: latest workspace Gradle plugin version
//!
//! All commands take the resolved `&RunContext` and a `Fetcher`, so they run
//! unchanged against the network or an in-memory stand-in.

pub mod build;
pub mod plugin;
pub mod quarterly;
pub mod releases;

pub use build::run_build;
pub use plugin::run_plugin;
pub use quarterly::run_quarterly;
pub use releases::{ReleasesReport, fetch_feed, run_releases};
