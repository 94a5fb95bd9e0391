use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// An anchor. Clicks route through the script path like buttons.
pub struct Link {
    base: Element,
}

impl Capability for Link {
    const KIND: CapabilityKind = CapabilityKind::Link;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Link {
    pub async fn click(&self) -> Result<()> {
        self.base.scroll_into_view().await?;
        self.base.js_click().await
    }

    /// The href attribute, `None` on a nameless anchor
    pub async fn href(&self) -> Result<Option<String>> {
        self.base.attr("href").await
    }

    pub async fn text(&self) -> Result<String> {
        self.base.text().await
    }
}

impl ElementProxy<Link> {
    pub async fn click(&self) -> Result<()> {
        self.resolve().await?.click().await
    }

    pub async fn href(&self) -> Result<Option<String>> {
        self.resolve().await?.href().await
    }
}
