//! Core plumbing shared by every command
//!
//! - **config**: release-calendar.toml parsing and validation
//! - **context**: resolved run settings passed to commands
//! - **error**: error taxonomy with contextual help and exit codes

pub mod config;
pub mod context;
pub mod error;
