use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// A two-state checkbox.
///
/// `check`/`uncheck` are idempotent with respect to the desired state;
/// only `toggle` flips unconditionally.
pub struct CheckBox {
    base: Element,
}

impl Capability for CheckBox {
    const KIND: CapabilityKind = CapabilityKind::CheckBox;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl CheckBox {
    /// Flip the state regardless of where it currently sits
    pub async fn toggle(&self) -> Result<()> {
        self.base.click().await
    }

    /// Flip the state through the script click path
    pub async fn js_toggle(&self) -> Result<()> {
        self.base.js_click().await
    }

    /// Check the box; a no-op when already checked
    pub async fn check(&self) -> Result<()> {
        if !self.is_checked().await? {
            self.toggle().await?;
        }
        Ok(())
    }

    /// Uncheck the box; a no-op when already unchecked
    pub async fn uncheck(&self) -> Result<()> {
        if self.is_checked().await? {
            self.toggle().await?;
        }
        Ok(())
    }

    pub async fn is_checked(&self) -> Result<bool> {
        self.base.is_selected().await
    }
}

impl ElementProxy<CheckBox> {
    pub async fn toggle(&self) -> Result<()> {
        self.resolve().await?.toggle().await
    }

    pub async fn check(&self) -> Result<()> {
        self.resolve().await?.check().await
    }

    pub async fn uncheck(&self) -> Result<()> {
        self.resolve().await?.uncheck().await
    }

    pub async fn is_checked(&self) -> Result<bool> {
        self.resolve().await?.is_checked().await
    }
}
