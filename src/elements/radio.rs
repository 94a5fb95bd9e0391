use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// One radio button out of a group.
///
/// Selecting an already-selected radio is a no-op; radios cannot be
/// deselected by clicking them again.
pub struct Radio {
    base: Element,
}

impl Capability for Radio {
    const KIND: CapabilityKind = CapabilityKind::Radio;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Radio {
    /// Select this radio; a no-op when already selected
    pub async fn select(&self) -> Result<()> {
        if !self.is_selected().await? {
            self.base.click().await?;
        }
        Ok(())
    }

    /// Select through the script click path; a no-op when already selected
    pub async fn js_select(&self) -> Result<()> {
        if !self.is_selected().await? {
            self.base.js_click().await?;
        }
        Ok(())
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.base.is_selected().await
    }
}

impl ElementProxy<Radio> {
    pub async fn select(&self) -> Result<()> {
        self.resolve().await?.select().await
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.resolve().await?.is_selected().await
    }
}
