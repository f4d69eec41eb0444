use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::Utc;
use thirtyfour::WebDriver;

use crate::error::SmokeError;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Registration email with a millisecond-clock local part, so repeated runs
/// never collide on an already-registered address.
pub fn unique_email() -> String {
    format!("newuser{}@example.com", Utc::now().timestamp_millis())
}

pub fn artifacts_dir(base: &str, profile: &str, scenario: &str) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{profile}/{scenario}/{ts}")
}

/// Saves a screenshot, the DOM source, and the failure description for a
/// failed scenario. Capture errors are swallowed; a failing capture must not
/// change the run outcome.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &SmokeError) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        &err.to_string(),
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    failure: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }

    if let Some(src) = source {
        let _ = fs::write(dir.join("dom.html"), src);
    }

    let _ = fs::write(dir.join("failure.txt"), failure);

    Ok(())
}
