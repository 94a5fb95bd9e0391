use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::locator::Locator;

/// Shared handle to the underlying driver session
pub type DynDriver = Arc<dyn Driver>;

/// A live element resolved at one instant.
///
/// Transient by design: owned by the call stack of the invocation that
/// resolved it and never retained past that call.
pub type DynElement = Arc<dyn DriverElement>;

/// Element geometry as reported by the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The driver boundary.
///
/// The library never constructs or tears down this handle; bring-up and
/// shutdown belong to the caller. Implementations map their native
/// not-found and stale-reference failures to the `NotPresent` error kind
/// so resolution policy stays uniform; everything else passes through as
/// the `Driver` error kind with its source intact.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to the given URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current URL of the active browsing context
    async fn current_url(&self) -> Result<String>;

    /// Title of the active document
    async fn title(&self) -> Result<String>;

    /// Find the first element matching the locator.
    /// Zero matches is `NotPresent`.
    async fn find(&self, locator: &Locator) -> Result<DynElement>;

    /// Find all elements matching the locator, in document order.
    /// An empty result is valid at this level; the resolver layers the
    /// at-least-one policy on top.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>>;

    /// Execute a script in the page with the given arguments
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// Reload the current page
    async fn refresh(&self) -> Result<()>;

    /// History back
    async fn back(&self) -> Result<()>;

    /// History forward
    async fn forward(&self) -> Result<()>;

    /// Switch to the frame at the given index within the current context
    async fn switch_to_frame(&self, index: u16) -> Result<()>;

    /// Switch back to the top-level browsing context
    async fn switch_to_default(&self) -> Result<()>;

    /// Handles of all open windows
    async fn window_handles(&self) -> Result<Vec<String>>;

    /// Switch to the window with the given handle
    async fn switch_to_window(&self, handle: &str) -> Result<()>;

    /// Set the session implicit-wait timeout
    async fn set_implicit_timeout(&self, timeout: Duration) -> Result<()>;

    /// PNG screenshot of the current viewport
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// One live element behind the driver boundary.
///
/// Implementations map stale-reference failures to `NotPresent`; the
/// caller re-resolves and retries where appropriate.
#[async_trait]
pub trait DriverElement: Send + Sync {
    /// Native click on the element
    async fn click(&self) -> Result<()>;

    /// Clear the element's value
    async fn clear(&self) -> Result<()>;

    /// Type the given text into the element
    async fn send_keys(&self, text: &str) -> Result<()>;

    /// Rendered text of the element
    async fn text(&self) -> Result<String>;

    /// Attribute value, `None` when the attribute is absent
    async fn attr(&self, name: &str) -> Result<Option<String>>;

    /// DOM property value, `None` when the property is absent
    async fn prop(&self, name: &str) -> Result<Option<String>>;

    /// Computed CSS value for the given property
    async fn css_value(&self, name: &str) -> Result<String>;

    /// Lowercase tag name
    async fn tag_name(&self) -> Result<String>;

    /// Whether the element is rendered visible
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the element is enabled
    async fn is_enabled(&self) -> Result<bool>;

    /// Whether the element is selected/checked
    async fn is_selected(&self) -> Result<bool>;

    /// Position and size of the element
    async fn rect(&self) -> Result<ElementRect>;

    /// Find the first matching descendant. Zero matches is `NotPresent`.
    async fn find(&self, locator: &Locator) -> Result<DynElement>;

    /// Find all matching descendants in document order; may be empty.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<DynElement>>;

    /// Execute a script with this element bound as `arguments[0]`
    async fn execute(&self, script: &str) -> Result<Value>;
}
