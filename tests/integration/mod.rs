//! Integration tests for release-calendar

mod helpers;
mod test_cli;
mod test_releases;
