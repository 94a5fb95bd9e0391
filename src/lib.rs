//! # webgrip
//!
//! Typed page-object library for WebDriver test automation.
//!
//! Page objects declare their fields as typed element capabilities
//! (buttons, checkboxes, selects, tables, text inputs) bound to locators.
//! Nothing is located up front: every capability call resolves the
//! locator against the live document, wraps the result in the right
//! implementation, forwards the call and throws the wrapper away. Page
//! reloads and DOM churn between calls therefore never produce stale
//! references; at worst the next call reports the element as not present.
//!
//! ## Declaring a page object
//!
//! ```no_run
//! use webgrip::{Locator, Page, Result};
//! use webgrip::elements::{Button, TextInput};
//! use webgrip::proxy::ElementProxy;
//!
//! struct LoginPage {
//!     username: ElementProxy<TextInput>,
//!     password: ElementProxy<TextInput>,
//!     submit: ElementProxy<Button>,
//! }
//!
//! impl LoginPage {
//!     fn new(page: &Page) -> Result<Self> {
//!         Ok(Self {
//!             username: page.element(Locator::css("input[name='username']"))?,
//!             password: page.element(Locator::css("input[name='password']"))?,
//!             submit: page.element(Locator::css("button[type='submit']"))?,
//!         })
//!     }
//!
//!     async fn login(&self, user: &str, pass: &str) -> Result<()> {
//!         self.username.set(user).await?;
//!         self.password.set(pass).await?;
//!         self.submit.click().await
//!     }
//! }
//! ```
//!
//! ## Bringing up a session
//!
//! Driver bring-up stays with the caller; the library adopts a running
//! `fantoccini::Client`:
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! use webgrip::{CoreConfig, Page, WebDriverSession};
//!
//! let client = fantoccini::ClientBuilder::rustls()
//!     .connect("http://localhost:4444")
//!     .await?;
//! let driver = WebDriverSession::new(client).into_driver();
//! let page = Page::new(driver, CoreConfig::default());
//! page.open("https://example.com").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Waiting
//!
//! Every proxy and element exposes `wait_until_*` methods backed by one
//! polling engine with a process-wide default timeout and per-call
//! overrides. A timed-out wait fails with a typed error carrying the
//! locator description and the timeout.

/// Explicit worker configuration
pub mod config;
/// Driver boundary traits
pub mod driver;
/// Capability implementations for each element role
pub mod elements;
/// Error taxonomy
pub mod errors;
/// Locator descriptors
pub mod locator;
/// Page surface and proxy binding
pub mod page;
/// Element and list proxies
pub mod proxy;
/// Capability registry
pub mod registry;
/// Fresh locator resolution
pub mod resolver;
/// Polling wait engine
pub mod wait;
/// fantoccini-backed driver boundary
pub mod webdriver;

pub use config::CoreConfig;
pub use driver::{Driver, DriverElement, DynDriver, DynElement, ElementRect};
pub use errors::{CoreError, Result};
pub use locator::Locator;
pub use page::Page;
pub use proxy::{Capability, ElementListProxy, ElementProxy};
pub use registry::{CapabilityKind, CapabilityRegistry};
pub use resolver::Resolver;
pub use wait::{Condition, Wait};
pub use webdriver::WebDriverSession;
