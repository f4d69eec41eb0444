use std::time::{Duration, Instant};

use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;

use crate::browser::Locator;
use crate::error::{SmokeError, SmokeResult};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Environment-interaction flags passed through to the browser verbatim.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_size: (u32, u32),
    pub webdriver_url: String,
    pub wait_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout: Duration::from_secs(10),
        }
    }
}

/// Connects to chromedriver and starts one browser instance.
///
/// Failure here is fatal for the whole run; it happens before any scenario
/// executes and is not part of the per-scenario failure taxonomy.
pub async fn new_session(cfg: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    if cfg.headless {
        caps.set_headless()?;
    }
    caps.add_arg("--no-sandbox")?;
    caps.add_arg("--disable-dev-shm-usage")?;
    let (width, height) = cfg.window_size;
    caps.add_arg(&format!("--window-size={width},{height}"))?;

    let driver = WebDriver::new(cfg.webdriver_url.as_str(), caps).await?;

    // `find` must report absence immediately; all waiting happens in the
    // explicit wait_for loops.
    driver.set_implicit_wait_timeout(Duration::ZERO).await?;
    Ok(driver)
}

/// The live browser handle shared by every scenario in a run.
///
/// Exactly one per run, exclusively owned by the runner, released through
/// [`Session::close`] regardless of how the scenarios concluded.
#[derive(Debug)]
pub struct Session {
    driver: WebDriver,
    base_url: String,
    wait_timeout: Duration,
}

impl Session {
    pub fn new(driver: WebDriver, base_url: impl Into<String>, wait_timeout: Duration) -> Self {
        Self {
            driver,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            wait_timeout,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Raw driver handle, used for failure artifact capture.
    #[must_use]
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigates to `path` under the base URL (`"/"` for the home page).
    pub async fn open(&self, path: &str) -> SmokeResult<()> {
        let url = format!("{}{}", self.base_url, path);
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Waits up to the session default for `locator` to be present.
    pub async fn wait_for(&self, locator: &Locator) -> SmokeResult<WebElement> {
        self.wait_for_with(locator, self.wait_timeout).await
    }

    /// Polls for `locator` until present or `timeout` elapses. A zero timeout
    /// still performs one lookup before reporting the deadline as passed.
    pub async fn wait_for_with(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> SmokeResult<WebElement> {
        log::debug!("waiting up to {timeout:?} for {locator}");
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.driver.find(By::from(locator)).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(SmokeError::Timeout {
                    locator: locator.clone(),
                    timeout,
                });
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
        }
    }

    /// As [`Session::wait_for`], but the element must also be visible and
    /// enabled before it is returned.
    pub async fn wait_for_clickable(&self, locator: &Locator) -> SmokeResult<WebElement> {
        let timeout = self.wait_timeout;
        log::debug!("waiting up to {timeout:?} for {locator} to become clickable");
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.driver.find(By::from(locator)).await {
                let displayed = element.is_displayed().await.unwrap_or(false);
                let enabled = element.is_enabled().await.unwrap_or(false);
                if displayed && enabled {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(SmokeError::Timeout {
                    locator: locator.clone(),
                    timeout,
                });
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
        }
    }

    /// Unwaited lookup. Use after a wait already proved presence, or when
    /// absence is itself the tested condition.
    pub async fn find(&self, locator: &Locator) -> SmokeResult<WebElement> {
        self.driver
            .find(By::from(locator))
            .await
            .map_err(|_| SmokeError::ElementNotFound {
                locator: locator.clone(),
            })
    }

    pub async fn type_into(&self, element: &WebElement, text: &str) -> SmokeResult<()> {
        element.send_keys(text).await?;
        Ok(())
    }

    pub async fn click(&self, element: &WebElement) -> SmokeResult<()> {
        element.click().await?;
        Ok(())
    }

    pub async fn text_of(&self, element: &WebElement) -> SmokeResult<String> {
        Ok(element.text().await?)
    }

    /// Terminates the browser process. The run calls this exactly once, after
    /// the last scenario, on every path that created a session.
    pub async fn close(self) -> SmokeResult<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
