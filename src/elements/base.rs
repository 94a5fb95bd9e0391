use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::driver::{DynDriver, DynElement, ElementRect};
use crate::errors::Result;
use crate::locator::Locator;
use crate::proxy::{Capability, ElementContext};
use crate::registry::CapabilityKind;
use crate::wait::{Condition, Wait};

const JS_CLICK: &str = "arguments[0].click();";
const JS_SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";
const JS_HIGHLIGHT: &str = "arguments[0].style.border='3px solid red';";
const JS_CLEAR_HIGHLIGHT: &str = "arguments[0].style.border='0px';";
const JS_INNER_HTML: &str = "return arguments[0].innerHTML;";
const JS_SUBMIT: &str =
    "if (arguments[0].form) { arguments[0].form.submit(); } else { arguments[0].submit(); }";
// Resets React-style value trackers before announcing the change, so
// frameworks that dedupe on tracked value still observe the new input.
const JS_DISPATCH_CHANGE: &str = "const tracker = arguments[0]._valueTracker; \
     if (tracker) { tracker.setValue(''); } \
     arguments[0].dispatchEvent(new Event('change', { bubbles: true }));";

// Empty text is re-read once after this pause; some pages populate text
// a beat after the element lands in the tree.
const TEXT_RETRY_PAUSE: Duration = Duration::from_millis(500);

/// The base element capability: one freshly resolved element plus the
/// operations every role shares.
///
/// Constructed per call and discarded at the end of it; staleness shows
/// up as a `NotPresent` failure on the next resolution instead of a
/// stale-reference error here.
pub struct Element {
    driver: DynDriver,
    element: DynElement,
    locator: Locator,
    config: CoreConfig,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl Capability for Element {
    const KIND: CapabilityKind = CapabilityKind::Element;

    fn attach(ctx: ElementContext) -> Self {
        let (driver, element, locator, config) = ctx.into_parts();
        Self {
            driver,
            element,
            locator,
            config,
        }
    }

    fn base(&self) -> &Element {
        self
    }
}

impl Element {
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub(crate) fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn described(&self) -> String {
        format!("with {{ {} }}", self.locator)
    }

    /// Native click
    pub async fn click(&self) -> Result<()> {
        info!("Element click {}", self.described());
        self.element.click().await
    }

    /// Click through script execution rather than the native event path
    pub async fn js_click(&self) -> Result<()> {
        info!("Element javascript click {}", self.described());
        self.element.execute(JS_CLICK).await?;
        Ok(())
    }

    pub async fn scroll_into_view(&self) -> Result<()> {
        debug!("Scrolling element into view {}", self.described());
        self.element.execute(JS_SCROLL_INTO_VIEW).await?;
        Ok(())
    }

    /// Flash a marker border around the element
    pub async fn highlight(&self) -> Result<()> {
        debug!("Element highlight {}", self.described());
        self.element.execute(JS_HIGHLIGHT).await?;
        tokio::time::sleep(self.config.highlight_pause).await;
        self.element.execute(JS_CLEAR_HIGHLIGHT).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        info!("Clear text {}", self.described());
        self.element.clear().await
    }

    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.element.send_keys(text).await?;
        info!("Sending text {{ {text} }} {}", self.described());
        Ok(())
    }

    /// Type one character at a time with the configured inter-key delay
    pub async fn send_key_by_key(&self, text: &str) -> Result<()> {
        self.send_key_by_key_with_gap(self.config.keystroke_delay, text)
            .await
    }

    /// Type one character at a time with an explicit inter-key delay
    pub async fn send_key_by_key_with_gap(&self, gap: Duration, text: &str) -> Result<()> {
        info!("Sending text key by key {{ {text} }} {}", self.described());
        for ch in text.chars() {
            self.element.send_keys(&ch.to_string()).await?;
            tokio::time::sleep(gap).await;
        }
        Ok(())
    }

    /// Submit the form this element belongs to
    pub async fn submit(&self) -> Result<()> {
        info!("Element submit {}", self.described());
        self.element.execute(JS_SUBMIT).await?;
        Ok(())
    }

    /// Announce a value change to the page; the slow-path input methods
    /// call this because programmatic input does not reliably fire change
    /// events on every backend.
    pub async fn dispatch_change(&self) -> Result<()> {
        debug!("Dispatching change event {}", self.described());
        self.element.execute(JS_DISPATCH_CHANGE).await?;
        Ok(())
    }

    /// Rendered text, re-read once if the first read comes back empty
    pub async fn text(&self) -> Result<String> {
        let mut text = self.element.text().await?;
        if text.is_empty() {
            tokio::time::sleep(TEXT_RETRY_PAUSE).await;
            text = self.element.text().await?;
        }
        info!("Element text is {{ {text} }} {}", self.described());
        Ok(text)
    }

    /// The textContent attribute, whitespace and all
    pub async fn text_content(&self) -> Result<String> {
        Ok(self
            .element
            .attr("textContent")
            .await?
            .unwrap_or_default())
    }

    pub async fn inner_html(&self) -> Result<String> {
        let html = self.element.execute(JS_INNER_HTML).await?;
        Ok(html.as_str().unwrap_or_default().to_string())
    }

    /// The value attribute, empty string when absent
    pub async fn value(&self) -> Result<String> {
        let value = self.element.attr("value").await?.unwrap_or_default();
        info!("Element value attribute is {{ {value} }} {}", self.described());
        Ok(value)
    }

    pub async fn attr(&self, name: &str) -> Result<Option<String>> {
        let value = self.element.attr(name).await?;
        debug!(
            "Value for the attribute {{ {name} }} is {{ {:?} }} {}",
            value,
            self.described()
        );
        Ok(value)
    }

    pub async fn css_value(&self, name: &str) -> Result<String> {
        self.element.css_value(name).await
    }

    pub async fn tag_name(&self) -> Result<String> {
        self.element.tag_name().await
    }

    pub async fn rect(&self) -> Result<ElementRect> {
        self.element.rect().await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.element.is_displayed().await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.element.is_enabled().await
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.element.is_selected().await
    }

    /// Visibility probe: a resolution that went stale underneath this
    /// call reads as not visible rather than an error
    pub async fn is_visible(&self) -> Result<bool> {
        match self.element.is_displayed().await {
            Ok(displayed) => Ok(displayed),
            Err(err) if err.is_not_present() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Run a script with this element bound as `arguments[0]`
    pub async fn execute(&self, script: &str) -> Result<Value> {
        self.element.execute(script).await
    }

    /// First matching descendant, wrapped as a base element
    pub async fn find_by(&self, locator: Locator) -> Result<Element> {
        debug!("Finding descendant {{ {locator} }} {}", self.described());
        let child = self.element.find(&locator).await?;
        Ok(self.wrap_child(child, locator))
    }

    /// All matching descendants in document order; may be empty
    pub async fn find_all_by(&self, locator: Locator) -> Result<Vec<Element>> {
        debug!("Finding descendants {{ {locator} }} {}", self.described());
        let children = self.element.find_all(&locator).await?;
        Ok(children
            .into_iter()
            .map(|child| self.wrap_child(child, locator.clone()))
            .collect())
    }

    fn wrap_child(&self, child: DynElement, locator: Locator) -> Element {
        Element {
            driver: self.driver.clone(),
            element: child,
            locator,
            config: self.config.clone(),
        }
    }

    /// Wait seeded from the worker configuration
    pub fn wait(&self) -> Wait {
        Wait::from_config(&self.config)
    }

    // Polls the element this call already resolved; nested elements
    // carry relative locators that cannot be re-run from the root.
    async fn wait_for(&self, condition: Condition, timeout: Option<Duration>) -> Result<()> {
        let mut wait = self.wait();
        if let Some(timeout) = timeout {
            wait = wait.with_timeout(timeout);
        }
        wait.until_on(&self.element, &self.locator, condition).await
    }

    pub async fn wait_until(&self, condition: Condition) -> Result<()> {
        self.wait_for(condition, None).await
    }

    pub async fn wait_until_within(&self, condition: Condition, timeout: Duration) -> Result<()> {
        self.wait_for(condition, Some(timeout)).await
    }

    pub async fn wait_until_present(&self) -> Result<()> {
        self.wait_until(Condition::Present).await
    }

    pub async fn wait_until_visible(&self) -> Result<()> {
        self.wait_until(Condition::Visible).await
    }

    pub async fn wait_until_not_visible(&self) -> Result<()> {
        self.wait_until(Condition::NotVisible).await
    }

    pub async fn wait_until_enabled(&self) -> Result<()> {
        self.wait_until(Condition::Enabled).await
    }

    pub async fn wait_until_disabled(&self) -> Result<()> {
        self.wait_until(Condition::NotEnabled).await
    }

    pub async fn wait_until_clickable(&self) -> Result<()> {
        self.wait_until(Condition::Clickable).await
    }
}
