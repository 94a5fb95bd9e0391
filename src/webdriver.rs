use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element as FantocciniElement;
use fantoccini::error::CmdError;
use fantoccini::wd::{TimeoutConfiguration, WindowHandle};
use fantoccini::Client;
use serde_json::Value;
use tracing::debug;

use crate::driver::{Driver, DriverElement, DynElement, ElementRect};
use crate::errors::{CoreError, Result};
use crate::locator::Locator;

/// WebDriver-backed implementation of the driver boundary.
///
/// Wraps a `fantoccini::Client` the caller already brought up; session
/// creation, capability negotiation and shutdown stay with the caller.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Adopt an existing WebDriver session
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The adopted session as a shareable driver handle
    pub fn into_driver(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Name/accessibility-id/tag strategies ride on css; the buffer keeps the
// formatted selector alive for the borrowed fantoccini locator.
fn to_fantoccini<'a>(locator: &'a Locator, buf: &'a mut String) -> fantoccini::Locator<'a> {
    match locator {
        Locator::Id(v) => fantoccini::Locator::Id(v),
        Locator::Css(v) => fantoccini::Locator::Css(v),
        Locator::XPath(v) => fantoccini::Locator::XPath(v),
        Locator::LinkText(v) => fantoccini::Locator::LinkText(v),
        Locator::Name(v) => {
            *buf = format!("[name=\"{}\"]", css_escape(v));
            fantoccini::Locator::Css(buf.as_str())
        }
        Locator::AccessibilityId(v) => {
            *buf = format!("[aria-label=\"{}\"]", css_escape(v));
            fantoccini::Locator::Css(buf.as_str())
        }
        Locator::TagName(v) => {
            *buf = v.clone();
            fantoccini::Locator::Css(buf.as_str())
        }
    }
}

fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

// Not-found and gone-stale both collapse to NotPresent so callers see
// one uniform re-resolvable failure; everything else passes through.
fn map_cmd_error(locator: &Locator, err: CmdError) -> CoreError {
    let text = err.to_string();
    if matches!(err, CmdError::NoSuchElement(_)) || text.contains("stale element reference") {
        CoreError::not_present(locator)
    } else {
        CoreError::driver(err)
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");
        self.client.goto(url).await.map_err(CoreError::driver)
    }

    async fn current_url(&self) -> Result<String> {
        let url = self.client.current_url().await.map_err(CoreError::driver)?;
        Ok(url.to_string())
    }

    async fn title(&self) -> Result<String> {
        let title = self
            .client
            .execute("return document.title;", vec![])
            .await
            .map_err(CoreError::driver)?;
        Ok(title.as_str().unwrap_or_default().to_string())
    }

    async fn find(&self, locator: &Locator) -> Result<DynElement> {
        let mut all = self.find_all(locator).await?;
        if all.is_empty() {
            return Err(CoreError::not_present(locator));
        }
        Ok(all.swap_remove(0))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>> {
        let mut buf = String::new();
        let search = to_fantoccini(locator, &mut buf);
        let elements = self
            .client
            .find_all(search)
            .await
            .map_err(|err| map_cmd_error(locator, err))?;
        Ok(elements
            .into_iter()
            .map(|element| wrap_element(self.client.clone(), element, locator.clone()))
            .collect())
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.client
            .execute(script, args)
            .await
            .map_err(CoreError::driver)
    }

    async fn refresh(&self) -> Result<()> {
        self.client.refresh().await.map_err(CoreError::driver)
    }

    async fn back(&self) -> Result<()> {
        self.client.back().await.map_err(CoreError::driver)
    }

    async fn forward(&self) -> Result<()> {
        self.client
            .execute("window.history.forward();", vec![])
            .await
            .map_err(CoreError::driver)?;
        Ok(())
    }

    async fn switch_to_frame(&self, index: u16) -> Result<()> {
        let _ = self
            .client
            .clone()
            .enter_frame(Some(index))
            .await
            .map_err(CoreError::driver)?;
        Ok(())
    }

    async fn switch_to_default(&self) -> Result<()> {
        let _ = self
            .client
            .clone()
            .enter_frame(None)
            .await
            .map_err(CoreError::driver)?;
        Ok(())
    }

    async fn window_handles(&self) -> Result<Vec<String>> {
        let handles = self.client.windows().await.map_err(CoreError::driver)?;
        Ok(handles.into_iter().map(String::from).collect())
    }

    async fn switch_to_window(&self, handle: &str) -> Result<()> {
        let wanted = WindowHandle::try_from(handle.to_string())
            .map_err(|_| CoreError::Configuration(format!("invalid window handle {handle}")))?;
        self.client
            .switch_to_window(wanted)
            .await
            .map_err(CoreError::driver)
    }

    async fn set_implicit_timeout(&self, timeout: Duration) -> Result<()> {
        let timeouts = TimeoutConfiguration::new(None, None, Some(timeout));
        self.client
            .update_timeouts(timeouts)
            .await
            .map_err(CoreError::driver)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(CoreError::driver)
    }
}

fn wrap_element(client: Client, element: FantocciniElement, locator: Locator) -> DynElement {
    Arc::new(WebDriverElement {
        client,
        element,
        locator,
    })
}

/// One live WebDriver element plus the client used for script execution
struct WebDriverElement {
    client: Client,
    element: FantocciniElement,
    locator: Locator,
}

impl WebDriverElement {
    fn map_err(&self, err: CmdError) -> CoreError {
        map_cmd_error(&self.locator, err)
    }

    fn as_script_arg(&self) -> Result<Value> {
        serde_json::to_value(&self.element).map_err(CoreError::driver)
    }
}

#[async_trait]
impl DriverElement for WebDriverElement {
    async fn click(&self) -> Result<()> {
        self.element.click().await.map_err(|e| self.map_err(e))
    }

    async fn clear(&self) -> Result<()> {
        self.element.clear().await.map_err(|e| self.map_err(e))
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.element
            .send_keys(text)
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(|e| self.map_err(e))
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.element.attr(name).await.map_err(|e| self.map_err(e))
    }

    async fn prop(&self, name: &str) -> Result<Option<String>> {
        self.element.prop(name).await.map_err(|e| self.map_err(e))
    }

    async fn css_value(&self, name: &str) -> Result<String> {
        let escaped = name.replace('\'', "\\'");
        let script =
            format!("return window.getComputedStyle(arguments[0]).getPropertyValue('{escaped}');");
        let value = self.execute(&script).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn tag_name(&self) -> Result<String> {
        let tag = self.element.tag_name().await.map_err(|e| self.map_err(e))?;
        Ok(tag.to_lowercase())
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.element
            .is_displayed()
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.element
            .is_enabled()
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn is_selected(&self) -> Result<bool> {
        self.element
            .is_selected()
            .await
            .map_err(|e| self.map_err(e))
    }

    async fn rect(&self) -> Result<ElementRect> {
        let script = "const r = arguments[0].getBoundingClientRect(); \
             return {x: r.x, y: r.y, width: r.width, height: r.height};";
        let value = self.execute(script).await?;
        serde_json::from_value(value).map_err(CoreError::driver)
    }

    async fn find(&self, locator: &Locator) -> Result<DynElement> {
        let mut all = self.find_all(locator).await?;
        if all.is_empty() {
            return Err(CoreError::not_present(locator));
        }
        Ok(all.swap_remove(0))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>> {
        let mut buf = String::new();
        let search = to_fantoccini(locator, &mut buf);
        let elements = self
            .element
            .find_all(search)
            .await
            .map_err(|err| map_cmd_error(locator, err))?;
        Ok(elements
            .into_iter()
            .map(|element| wrap_element(self.client.clone(), element, locator.clone()))
            .collect())
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        let arg = self.as_script_arg()?;
        self.client
            .execute(script, vec![arg])
            .await
            .map_err(|e| self.map_err(e))
    }
}
