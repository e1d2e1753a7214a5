//! Tests for the command-line surface: help, config errors, exit codes

use crate::helpers::*;
use anyhow::Result;
use std::fs;

#[test]
fn test_help_lists_commands() -> Result<()> {
  let out = TestOutput::new()?;
  let output = run_release_calendar(&out.path, &["--help"])?;

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  for command in ["build", "releases", "quarterly", "plugin"] {
    assert!(stdout.contains(command), "help should mention {}", command);
  }
  Ok(())
}

#[test]
fn test_missing_explicit_config_is_a_user_error() -> Result<()> {
  let out = TestOutput::new()?;
  let output = run_release_calendar(&out.path, &["--config", "nope.toml", "releases"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("nope.toml"));
  assert!(!out.file_exists("releases"));
  Ok(())
}

#[test]
fn test_zero_timeout_is_rejected() -> Result<()> {
  let out = TestOutput::new()?;
  fs::write(out.path.join("release-calendar.toml"), "[http]\ntimeout_secs = 0\n")?;

  let output = run_release_calendar(&out.path, &["quarterly"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("timeout_secs"));
  Ok(())
}

#[test]
fn test_non_http_source_is_rejected() -> Result<()> {
  let out = TestOutput::new()?;
  fs::create_dir_all(out.path.join(".config"))?;
  fs::write(
    out.path.join(".config/release-calendar.toml"),
    "[sources]\nreleases_feed = \"ftp://releases.example.com/releases.json\"\n",
  )?;

  let output = run_release_calendar(&out.path, &["releases"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!out.file_exists("releases"));
  Ok(())
}

#[test]
fn test_unreachable_feed_is_a_system_error() -> Result<()> {
  let out = TestOutput::new()?;
  fs::write(
    out.path.join("release-calendar.toml"),
    "[sources]\nreleases_feed = \"http://127.0.0.1:9/releases.json\"\n\n\
     [http]\nconnect_timeout_secs = 5\ntimeout_secs = 5\n",
  )?;

  let output = run_release_calendar(&out.path, &["--quiet", "releases"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(!out.file_exists("releases"));
  Ok(())
}
