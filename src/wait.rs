use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::CoreConfig;
use crate::driver::DynElement;
use crate::errors::{CoreError, Result};
use crate::locator::Locator;
use crate::resolver::Resolver;

/// Tags that can actually carry a disabled state. Anything else is never
/// reported "not enabled" by the structural condition.
const HTML_FORM_TAGS: [&str; 6] = ["input", "button", "select", "textarea", "link", "option"];

pub(crate) fn is_form_tag(tag: &str) -> bool {
    HTML_FORM_TAGS.contains(&tag.to_ascii_lowercase().as_str())
}

/// A named, pollable predicate over a locator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least one element matches the locator
    Present,
    /// The element is rendered visible
    Visible,
    /// The element is hidden or absent
    NotVisible,
    /// The element is enabled
    Enabled,
    /// The element is a form control and disabled
    NotEnabled,
    /// The element is visible and enabled
    Clickable,
}

impl Condition {
    fn timeout_error(self, locator: &Locator, timeout: Duration) -> CoreError {
        let locator = locator.to_string();
        let timeout_secs = timeout.as_secs();
        match self {
            Condition::Present => CoreError::NotPresent {
                locator: format!("{locator} after {timeout_secs}s"),
            },
            Condition::Visible => CoreError::NotVisible {
                locator,
                timeout_secs,
            },
            Condition::NotVisible => CoreError::StillVisible {
                locator,
                timeout_secs,
            },
            Condition::Enabled | Condition::Clickable => CoreError::NotEnabled {
                locator,
                timeout_secs,
            },
            Condition::NotEnabled => CoreError::StillEnabled {
                locator,
                timeout_secs,
            },
        }
    }
}

/// Polling condition evaluator.
///
/// Each probe re-resolves the locator, so a wait survives the element
/// being replaced mid-poll. Blocks only its own task; concurrent waits on
/// other workers are unaffected.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    timeout: Duration,
    poll_interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Wait seeded with the process-wide defaults from the configuration
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.wait_timeout, config.poll_interval)
    }

    /// Per-call timeout override
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-call poll interval override
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll until the condition holds or the timeout elapses.
    ///
    /// The condition-specific error is raised no earlier than `timeout`
    /// and no later than `timeout + poll_interval` (plus probe latency).
    /// Driver failures unrelated to presence abort the wait immediately.
    pub async fn until(
        &self,
        resolver: &Resolver,
        locator: &Locator,
        condition: Condition,
    ) -> Result<()> {
        debug!("Waiting for {:?} {}", condition, locator);
        let start = Instant::now();
        loop {
            match self.probe(resolver, locator, condition).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                // went stale between resolution and probe: same as absent
                Err(err) if err.is_not_present() => {
                    if condition == Condition::NotVisible {
                        return Ok(());
                    }
                }
                Err(err) => return Err(err),
            }
            if start.elapsed() >= self.timeout {
                return Err(condition.timeout_error(locator, self.timeout));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Poll a held element until the condition holds or the timeout
    /// elapses. Used for nested elements whose relative locators cannot
    /// be re-resolved from the document root; an element that goes stale
    /// mid-poll reads as absent, not as an error.
    pub async fn until_on(
        &self,
        element: &DynElement,
        locator: &Locator,
        condition: Condition,
    ) -> Result<()> {
        debug!("Waiting for {:?} on held element {}", condition, locator);
        let start = Instant::now();
        loop {
            match Self::probe_element(element, condition).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(err) if err.is_not_present() => {
                    if condition == Condition::NotVisible {
                        return Ok(());
                    }
                }
                Err(err) => return Err(err),
            }
            if start.elapsed() >= self.timeout {
                return Err(condition.timeout_error(locator, self.timeout));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One evaluation of the condition against a fresh resolution
    async fn probe(
        &self,
        resolver: &Resolver,
        locator: &Locator,
        condition: Condition,
    ) -> Result<bool> {
        let element = match resolver.resolve(locator).await {
            Ok(element) => element,
            // absence satisfies invisibility and fails everything else
            Err(err) if err.is_not_present() => return Ok(condition == Condition::NotVisible),
            Err(err) => return Err(err),
        };
        Self::probe_element(&element, condition).await
    }

    async fn probe_element(element: &DynElement, condition: Condition) -> Result<bool> {
        match condition {
            // touch the element so a stale reference reads as absent
            Condition::Present => element.is_displayed().await.map(|_| true),
            Condition::Visible => element.is_displayed().await,
            Condition::NotVisible => Ok(!element.is_displayed().await?),
            Condition::Enabled => element.is_enabled().await,
            Condition::NotEnabled => {
                let tag = element.tag_name().await?;
                if is_form_tag(&tag) {
                    Ok(!element.is_enabled().await?)
                } else {
                    Ok(false)
                }
            }
            Condition::Clickable => {
                Ok(element.is_displayed().await? && element.is_enabled().await?)
            }
        }
    }
}

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;
