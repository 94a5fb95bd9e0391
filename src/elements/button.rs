use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// A clickable control.
///
/// Clicks route through scroll-into-view plus a script-dispatched click
/// instead of the native event path; custom-styled controls swallow
/// native clicks often enough that the script path is the reliable one.
pub struct Button {
    base: Element,
}

impl Capability for Button {
    const KIND: CapabilityKind = CapabilityKind::Button;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Button {
    pub async fn click(&self) -> Result<()> {
        self.base.scroll_into_view().await?;
        self.base.js_click().await
    }

    pub async fn js_click(&self) -> Result<()> {
        self.base.scroll_into_view().await?;
        self.base.js_click().await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.base.is_enabled().await
    }
}

impl ElementProxy<Button> {
    /// Resolve fresh and click through the script path
    pub async fn click(&self) -> Result<()> {
        self.resolve().await?.click().await
    }

    pub async fn js_click(&self) -> Result<()> {
        self.resolve().await?.js_click().await
    }
}
