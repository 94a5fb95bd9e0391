use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::driver::DynDriver;
use crate::errors::{CoreError, Result};
use crate::locator::Locator;
use crate::proxy::{Capability, ElementListProxy, ElementProxy};
use crate::registry::CapabilityRegistry;

const READY_STATE_POLL: Duration = Duration::from_millis(100);

/// One logical page or screen.
///
/// Owns the driver handle, worker configuration and capability registry,
/// and is both the proxy-binding surface for page objects and the
/// browser-level operation surface. Page objects declare their fields by
/// calling [`Page::element`] / [`Page::elements`] from their constructor;
/// a missing registry binding fails right there, before any test code
/// touches the field.
pub struct Page {
    driver: DynDriver,
    config: CoreConfig,
    registry: Arc<CapabilityRegistry>,
}

impl Page {
    /// A page backed by the standard capability registry
    pub fn new(driver: DynDriver, config: CoreConfig) -> Self {
        Self::with_registry(driver, config, Arc::new(CapabilityRegistry::with_defaults()))
    }

    /// A page backed by a caller-assembled registry
    pub fn with_registry(
        driver: DynDriver,
        config: CoreConfig,
        registry: Arc<CapabilityRegistry>,
    ) -> Self {
        Self {
            driver,
            config,
            registry,
        }
    }

    pub fn driver(&self) -> &DynDriver {
        &self.driver
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Bind a single-element field to a lazily-resolving proxy
    pub fn element<C: Capability>(&self, locator: Locator) -> Result<ElementProxy<C>> {
        ElementProxy::bind(
            self.driver.clone(),
            locator,
            self.config.clone(),
            &self.registry,
        )
    }

    /// Bind a collection field to a lazily-resolving list proxy
    pub fn elements<C: Capability>(&self, locator: Locator) -> Result<ElementListProxy<C>> {
        ElementListProxy::bind(
            self.driver.clone(),
            locator,
            self.config.clone(),
            &self.registry,
        )
    }

    /// Navigate to the URL and wait for the document to become ready
    pub async fn open(&self, url: &str) -> Result<()> {
        info!("Opening the URL {url}");
        self.driver.goto(url).await?;
        self.wait_for_page_load().await
    }

    /// Navigate without waiting for readiness
    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigate to URL {url}");
        self.driver.goto(url).await
    }

    /// Poll `document.readyState` until complete or the configured wait
    /// timeout elapses; a page that never settles is left as-is.
    pub async fn wait_for_page_load(&self) -> Result<()> {
        let script = "return document.readyState === 'complete';";
        let start = Instant::now();
        while start.elapsed() < self.config.wait_timeout {
            match self.driver.execute(script, vec![]).await {
                Ok(value) if value.as_bool().unwrap_or(false) => return Ok(()),
                _ => tokio::time::sleep(READY_STATE_POLL).await,
            }
        }
        debug!("Page did not report readyState complete; continuing");
        Ok(())
    }

    pub async fn title(&self) -> Result<String> {
        let title = self.driver.title().await?;
        info!("Title of the page is {title}");
        Ok(title)
    }

    pub async fn current_url(&self) -> Result<String> {
        let url = self.driver.current_url().await?;
        info!("Current URL is {url}");
        Ok(url)
    }

    pub async fn refresh(&self) -> Result<()> {
        info!("Browser refresh");
        self.driver.refresh().await
    }

    pub async fn back(&self) -> Result<()> {
        info!("Browser back");
        self.driver.back().await
    }

    pub async fn forward(&self) -> Result<()> {
        info!("Browser forward");
        self.driver.forward().await
    }

    /// Walk browser history back a specific number of pages
    pub async fn navigate_back_pages(&self, pages: u32) -> Result<()> {
        self.driver
            .execute(&format!("window.history.go(-{pages})"), vec![])
            .await?;
        Ok(())
    }

    /// Run a script in the page with the given arguments
    pub async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.driver.execute(script, args).await
    }

    pub async fn scroll_to_top(&self) -> Result<()> {
        self.driver.execute("window.scrollTo(0, 0);", vec![]).await?;
        Ok(())
    }

    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }

    /// Current vertical scroll offset in pixels
    pub async fn page_y_offset(&self) -> Result<i64> {
        let value = self
            .driver
            .execute("return window.pageYOffset;", vec![])
            .await?;
        Ok(value.as_f64().unwrap_or(0.0) as i64)
    }

    pub async fn window_handles(&self) -> Result<Vec<String>> {
        self.driver.window_handles().await
    }

    pub async fn switch_to_window(&self, handle: &str) -> Result<()> {
        info!("Switch to window {handle}");
        self.driver.switch_to_window(handle).await
    }

    /// Switch to the window at the given position in handle order
    pub async fn switch_tab(&self, index: usize) -> Result<()> {
        let handles = self.window_handles().await?;
        let handle = handles.get(index).ok_or_else(|| {
            CoreError::Configuration(format!(
                "no window at index {index}, {} open",
                handles.len()
            ))
        })?;
        self.switch_to_window(handle).await
    }

    pub async fn switch_to_frame(&self, index: u16) -> Result<()> {
        info!("Switch to frame {index}");
        self.driver.switch_to_frame(index).await
    }

    pub async fn switch_to_default(&self) -> Result<()> {
        info!("Switch to default content");
        self.driver.switch_to_default().await
    }

    pub async fn set_implicit_timeout(&self, timeout: Duration) -> Result<()> {
        self.driver.set_implicit_timeout(timeout).await
    }

    pub async fn set_implicit_timeout_default(&self) -> Result<()> {
        self.driver
            .set_implicit_timeout(self.config.wait_timeout)
            .await
    }

    /// PNG screenshot of the current viewport
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        info!("Take screenshot");
        self.driver.screenshot().await
    }

    /// Plain timed pause
    pub async fn wait_for(&self, duration: Duration) {
        debug!("Sleeping for {duration:?}");
        tokio::time::sleep(duration).await;
    }
}
