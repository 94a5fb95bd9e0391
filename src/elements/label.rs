use crate::elements::Element;
use crate::errors::Result;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// A caption element associated with a form control.
pub struct Label {
    base: Element,
}

impl Capability for Label {
    const KIND: CapabilityKind = CapabilityKind::Label;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Label {
    /// The `for` attribute naming the control this label describes
    pub async fn for_attr(&self) -> Result<Option<String>> {
        self.base.attr("for").await
    }

    pub async fn text(&self) -> Result<String> {
        self.base.text().await
    }
}

impl ElementProxy<Label> {
    pub async fn for_attr(&self) -> Result<Option<String>> {
        self.resolve().await?.for_attr().await
    }
}
