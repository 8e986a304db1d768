//! Playwright-backed browser session.

use anyhow::{Context, Result};
use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;
use std::path::Path;

use crate::config::RunConfig;
use crate::driver::{Driver, Engine, Locator};
use crate::error::DriverError;

/// One live browser connection, owned exclusively by a single run.
///
/// Opened by the bootstrapper, closed at teardown. Holding the Playwright
/// handle keeps the driver process alive for the session's lifetime.
pub struct WebSession {
    #[allow(dead_code)]
    playwright: Playwright,
    browser: Browser,
    #[allow(dead_code)]
    context: BrowserContext,
    page: Page,
    engine: Engine,
    timeout_ms: u64,
}

impl WebSession {
    /// Launch the engine and open a blank page sized to the configured
    /// viewport. Any construction failure is fatal; there are no retries.
    pub async fn open(engine: Engine, config: &RunConfig) -> Result<Self, DriverError> {
        Self::bootstrap(engine, config)
            .await
            .map_err(DriverError::Startup)
    }

    async fn bootstrap(engine: Engine, config: &RunConfig) -> Result<Self> {
        let playwright = Playwright::initialize()
            .await
            .context("failed to initialize Playwright")?;

        let browser_type = match engine {
            Engine::Chromium => playwright.chromium(),
            Engine::Firefox => playwright.firefox(),
        };

        let browser = browser_type
            .launcher()
            .headless(config.headless)
            .launch()
            .await
            .with_context(|| format!("failed to launch {engine}"))?;

        let context = browser.context_builder().build().await?;
        let page = context.new_page().await?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await?;

        log::debug!(
            "{engine} session up, viewport {}x{}",
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            playwright,
            browser,
            context,
            page,
            engine,
            timeout_ms: config.wait_timeout_ms,
        })
    }

    /// Explicit wait: block until the element exists or the session timeout
    /// elapses.
    async fn wait_for(&self, locator: &Locator) -> Result<(), DriverError> {
        let sel = locator.to_selector();
        let waited = self
            .page
            .wait_for_selector_builder(&sel)
            .timeout(self.timeout_ms as f64)
            .wait_for_selector()
            .await;

        match waited {
            Ok(_) => Ok(()),
            Err(_) => Err(DriverError::Timeout {
                locator: locator.to_string(),
                timeout_ms: self.timeout_ms,
            }),
        }
    }

    async fn read_text(&self, sel: &str) -> Result<String> {
        let js = "el => el.innerText || el.textContent || ''";
        let text = self
            .page
            .evaluate_on_selector::<String, _>(sel, js, None::<String>)
            .await
            .context("failed to read element text")?;
        Ok(text)
    }
}

#[async_trait]
impl Driver for WebSession {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        log::debug!("navigating to {url}");
        self.page
            .goto_builder(url)
            .goto()
            .await
            .context("failed to navigate to URL")
            .map_err(DriverError::Engine)?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        self.wait_for(locator).await?;
        let sel = locator.to_selector();
        self.page
            .click_builder(&sel)
            .click()
            .await
            .with_context(|| format!("failed to click {sel}"))
            .map_err(DriverError::Engine)?;
        Ok(())
    }

    async fn title(&self) -> Result<String, DriverError> {
        let title: String = self
            .page
            .evaluate("() => document.title", ())
            .await
            .context("failed to read page title")
            .map_err(DriverError::Engine)?;
        Ok(title)
    }

    async fn visible_text(&self, locator: &Locator) -> Result<String, DriverError> {
        self.wait_for(locator).await?;
        self.text(locator).await
    }

    async fn text(&self, locator: &Locator) -> Result<String, DriverError> {
        let sel = locator.to_selector();
        let present = self
            .page
            .query_selector(&sel)
            .await
            .context("element query failed")
            .map_err(DriverError::Engine)?;
        if present.is_none() {
            return Err(DriverError::NotFound(locator.to_string()));
        }
        self.read_text(&sel).await.map_err(DriverError::Engine)
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        let sel = locator.to_selector();
        let elements = self
            .page
            .query_selector_all(&sel)
            .await
            .context("element query failed")
            .map_err(DriverError::Engine)?;
        Ok(elements.len())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
        // The capture does not create directories; a missing parent is an
        // I/O failure for the caller to deal with.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(DriverError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("screenshot directory missing: {}", parent.display()),
                )));
            }
        }

        self.page
            .screenshot_builder()
            .path(path.to_path_buf())
            .screenshot()
            .await
            .with_context(|| format!("failed to write screenshot {}", path.display()))
            .map_err(DriverError::Engine)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.browser
            .close()
            .await
            .context("failed to close browser")
            .map_err(DriverError::Engine)?;
        log::debug!("{} session closed", self.engine);
        Ok(())
    }
}
