//! Tests for the releases pipeline (feed → enrich → classify → files)

use crate::helpers::*;
use anyhow::Result;
use release_calendar::commands::run_releases;
use release_calendar::core::context::RunContext;
use release_calendar::core::error::ExitCode;
use release_calendar::ui::OutputMode;

fn feed(entries: &[serde_json::Value]) -> String {
  serde_json::Value::Array(entries.to_vec()).to_string()
}

#[test]
fn test_enriched_release_lands_in_family_file() -> Result<()> {
  let out = TestOutput::new()?;
  let release_url = format!("{}/dxp/7.3.10-u36", CDN);
  let upstream = FakeUpstream::new()
    .serve(FEED_URL, feed(&[feed_entry("dxp", "7.3", "7.3.10-u36", &release_url)]))
    .serve(
      &format!("{}/release.properties", release_url),
      "release.date=2023-06-01\nliferay.docker.image=liferay/dxp:7.3.10-u36\n",
    );

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  let report = run_releases(&ctx, &upstream)?;
  assert_eq!(report.enrichment.enriched, 1);

  let dxp_73 = out.read_json("releases/dxp_73_releases.json")?;
  let entries = dxp_73.as_array().expect("array");
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0]["releaseProperties"]["releaseDate"], "2023-06-01");
  assert_eq!(
    entries[0]["releaseProperties"]["liferayDockerImage"],
    "liferay/dxp:7.3.10-u36"
  );
  assert_eq!(
    entries[0]["releaseProperties"]["url"],
    "https://releases-cdn.liferay.com/dxp/7.3.10-u36/release.properties"
  );

  // raw payload mirrored under releases/<url path>
  assert_eq!(
    out.read_file("releases/dxp/7.3.10-u36/release.properties")?,
    "release.date=2023-06-01\nliferay.docker.image=liferay/dxp:7.3.10-u36\n"
  );

  Ok(())
}

#[test]
fn test_bucketing_across_products() -> Result<()> {
  let out = TestOutput::new()?;
  let upstream = FakeUpstream::new().serve(
    FEED_URL,
    feed(&[
      feed_entry("dxp", "2024.q1", "2024.q1.1", &format!("{}/dxp/2024.q1.1", CDN)),
      feed_entry("portal", "2024.q1", "2024.q1.1-ga1", &format!("{}/portal/2024.q1.1-ga1", CDN)),
      feed_entry("portal", "7.4", "7.4.3.112-ga112", &format!("{}/portal/7.4.3.112-ga112", CDN)),
      feed_entry("commerce", "7.4", "2.0.7", &format!("{}/commerce/2.0.7", CDN)),
      feed_entry("dxp", "7.0", "7.0.10-sp17", &format!("{}/dxp/7.0.10-sp17", CDN)),
    ]),
  );

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  let report = run_releases(&ctx, &upstream)?;
  assert_eq!(report.classified.unclassified, 1);

  let dxp_74 = out.read_json("releases/dxp_74_releases.json")?;
  assert_eq!(dxp_74.as_array().map(Vec::len), Some(1));
  assert_eq!(dxp_74[0]["productGroupVersion"], "2024.q1");

  let portal_74 = out.read_json("releases/portal_74_releases.json")?;
  assert_eq!(portal_74.as_array().map(Vec::len), Some(1));
  assert_eq!(portal_74[0]["productVersion"], "7.4.3.112-ga112");

  // the quarterly portal build is in no bucket, but stays in the unfiltered list
  let portal_all = out.read_json("releases/portal_releases.json")?;
  assert_eq!(portal_all.as_array().map(Vec::len), Some(2));

  let dxp_all = out.read_json("releases/dxp_releases.json")?;
  assert_eq!(dxp_all.as_array().map(Vec::len), Some(2));

  let everything = out.read_json("releases/releases.json")?;
  assert_eq!(everything.as_array().map(Vec::len), Some(5));

  for family in ["73", "72", "71"] {
    assert_eq!(out.read_file(&format!("releases/dxp_{}_releases.json", family))?, "[]");
  }
  assert!(out.file_exists("releases/dxp_70_releases.json"));

  Ok(())
}

#[test]
fn test_enrichment_failures_do_not_stop_the_batch() -> Result<()> {
  let out = TestOutput::new()?;
  let down = format!("{}/dxp/7.2.10-sp8", CDN);
  let erroring = format!("{}/dxp/7.1.10-sp9", CDN);
  let ok = format!("{}/dxp/7.4.13-u112", CDN);
  let upstream = FakeUpstream::new()
    .serve(
      FEED_URL,
      feed(&[
        feed_entry("dxp", "7.2", "7.2.10-sp8", &down),
        feed_entry("dxp", "7.1", "7.1.10-sp9", &erroring),
        feed_entry("dxp", "7.4", "7.4.13-u112", &ok),
      ]),
    )
    .unreachable(&format!("{}/release.properties", down))
    .status(&format!("{}/release.properties", erroring), 500)
    .serve(&format!("{}/release.properties", ok), "release.date=2024-02-05\n");

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  let report = run_releases(&ctx, &upstream)?;

  assert_eq!(report.enrichment.enriched, 1);
  assert_eq!(report.enrichment.skipped.len(), 2);
  assert!(report.releases[0].release_properties.is_empty());
  assert!(report.releases[1].release_properties.is_empty());
  assert_eq!(report.releases[2].release_properties.release_date, "2024-02-05");

  let dxp_72 = out.read_json("releases/dxp_72_releases.json")?;
  assert_eq!(dxp_72[0]["releaseProperties"]["releaseDate"], "");
  assert_eq!(dxp_72[0]["releaseProperties"]["url"], "");
  assert!(!out.file_exists("releases/dxp/7.2.10-sp8/release.properties"));

  Ok(())
}

#[test]
fn test_feed_failure_is_fatal() -> Result<()> {
  let out = TestOutput::new()?;
  let upstream = FakeUpstream::new().status(FEED_URL, 503);

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  assert!(run_releases(&ctx, &upstream).is_err());
  assert!(!out.file_exists("releases"));

  Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
  let release_url = format!("{}/dxp/2024.q2.0", CDN);
  let upstream = FakeUpstream::new()
    .serve(
      FEED_URL,
      feed(&[
        feed_entry("dxp", "2024.q2", "2024.q2.0", &release_url),
        feed_entry("portal", "7.3", "7.3.7-ga8", &format!("{}/portal/7.3.7-ga8", CDN)),
      ]),
    )
    .serve(
      &format!("{}/release.properties", release_url),
      "release.date=2024-05-02\nbuild.timestamp=1714608000\n",
    );

  let first = TestOutput::new()?;
  let second = TestOutput::new()?;
  run_releases(&RunContext::with_output_dir(&first.path, OutputMode::Quiet), &upstream)?;
  run_releases(&RunContext::with_output_dir(&second.path, OutputMode::Quiet), &upstream)?;

  for file in [
    "releases/releases.json",
    "releases/dxp_releases.json",
    "releases/dxp_74_releases.json",
    "releases/portal_releases.json",
    "releases/portal_73_releases.json",
    "releases/dxp/2024.q2.0/release.properties",
  ] {
    assert_eq!(first.read_file(file)?, second.read_file(file)?, "{} differs", file);
  }

  assert_eq!(upstream.request_count(FEED_URL), 2);
  Ok(())
}

#[test]
fn test_malformed_feed_is_a_data_error() -> Result<()> {
  let out = TestOutput::new()?;
  let upstream = FakeUpstream::new().serve(FEED_URL, "<!DOCTYPE html><html><body>maintenance</body></html>");

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  let err = run_releases(&ctx, &upstream).expect_err("an HTML feed must fail");

  assert_eq!(err.exit_code(), ExitCode::Data);
  assert_eq!(err.exit_code().as_i32(), 3);
  assert!(!out.file_exists("releases"));
  Ok(())
}

#[test]
fn test_unwritable_payload_dir_is_a_system_error() -> Result<()> {
  let out = TestOutput::new()?;
  let release_url = format!("{}/dxp/7.4.13-u112", CDN);
  let upstream = FakeUpstream::new()
    .serve(FEED_URL, feed(&[feed_entry("dxp", "7.4", "7.4.13-u112", &release_url)]))
    .serve(&format!("{}/release.properties", release_url), "release.date=2024-02-05\n");

  // `releases` exists as a plain file, so nothing can be created below it
  std::fs::write(out.path.join("releases"), "occupied")?;

  let ctx = RunContext::with_output_dir(&out.path, OutputMode::Quiet);
  let err = run_releases(&ctx, &upstream).expect_err("writing under a file must fail");

  assert_eq!(err.exit_code(), ExitCode::System);
  assert_eq!(err.exit_code().as_i32(), 2);
  Ok(())
}
