use std::time::Duration;

use tracing::{info, warn};

use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// A text entry field.
///
/// `set` types the whole value at once. `set_key_by_key` is the
/// deliberate slow path: some wrapped drivers drop change events on fast
/// programmatic input, so it types one character per delay tick and then
/// announces the change explicitly. Keep it slow; that is the point.
pub struct TextInput {
    base: Element,
}

impl Capability for TextInput {
    const KIND: CapabilityKind = CapabilityKind::TextInput;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl TextInput {
    /// Type the whole value and announce the change
    pub async fn set(&self, text: &str) -> Result<()> {
        self.base.send_keys(text).await?;
        self.base.dispatch_change().await
    }

    /// Scroll the field into view, then type the whole value
    pub async fn scroll_and_set(&self, text: &str) -> Result<()> {
        self.base.scroll_into_view().await?;
        self.set(text).await
    }

    /// Type character by character with the configured inter-key delay
    pub async fn set_key_by_key(&self, text: &str) -> Result<()> {
        self.set_key_by_key_with_gap(self.base.config().keystroke_delay, text)
            .await
    }

    /// Type character by character with an explicit inter-key delay.
    ///
    /// After typing, the observed value is compared against the intended
    /// one; on a mismatch the input is retried exactly once as a single
    /// send, then whatever the control holds is left as-is.
    pub async fn set_key_by_key_with_gap(&self, gap: Duration, text: &str) -> Result<()> {
        self.base.send_key_by_key_with_gap(gap, text).await?;
        self.base.dispatch_change().await?;

        let observed = self.base.value().await?;
        if !observed.eq_ignore_ascii_case(text) {
            warn!(
                "Key-by-key input mismatch, retrying once: wanted {{ {text} }}, got {{ {observed} }}"
            );
            self.base.clear().await?;
            self.base.send_keys(text).await?;
            self.base.dispatch_change().await?;
        }
        Ok(())
    }

    /// Current content of the field (value attribute)
    pub async fn value(&self) -> Result<String> {
        self.base.value().await
    }

    pub async fn clear(&self) -> Result<()> {
        info!("Clearing input with {{ {} }}", self.base.locator());
        self.base.clear().await
    }

    pub async fn text(&self) -> Result<String> {
        self.base.text().await
    }
}

impl ElementProxy<TextInput> {
    pub async fn set(&self, text: &str) -> Result<()> {
        self.resolve().await?.set(text).await
    }

    pub async fn set_key_by_key(&self, text: &str) -> Result<()> {
        self.resolve().await?.set_key_by_key(text).await
    }

    pub async fn set_key_by_key_with_gap(&self, gap: Duration, text: &str) -> Result<()> {
        self.resolve().await?.set_key_by_key_with_gap(gap, text).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.resolve().await?.clear().await
    }
}
