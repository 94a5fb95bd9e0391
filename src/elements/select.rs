use tracing::info;

use crate::elements::Element;
use crate::errors::{CoreError, Result};
use crate::locator::Locator;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

/// A `<select>` control, single or multiple.
///
/// Every operation verifies the underlying element really is a select;
/// options are re-enumerated structurally on each call, never cached.
pub struct Select {
    base: Element,
}

impl Capability for Select {
    const KIND: CapabilityKind = CapabilityKind::Select;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Select {
    async fn ensure_select(&self) -> Result<()> {
        let tag = self.base.tag_name().await?;
        if tag.eq_ignore_ascii_case("select") {
            Ok(())
        } else {
            Err(CoreError::UnexpectedTag {
                locator: self.base.locator().to_string(),
                expected: "select",
                actual: tag,
            })
        }
    }

    async fn ensure_multiple(&self) -> Result<()> {
        if self.is_multiple().await? {
            Ok(())
        } else {
            Err(CoreError::NotMultiple {
                locator: self.base.locator().to_string(),
            })
        }
    }

    /// Whether this select accepts multiple selections
    pub async fn is_multiple(&self) -> Result<bool> {
        self.ensure_select().await?;
        Ok(self.base.attr("multiple").await?.is_some())
    }

    /// All option elements in document order
    pub async fn options(&self) -> Result<Vec<Element>> {
        self.ensure_select().await?;
        self.base.find_all_by(Locator::css("option")).await
    }

    /// The first currently-selected option
    pub async fn first_selected_option(&self) -> Result<Element> {
        for option in self.options().await? {
            if option.is_selected().await? {
                return Ok(option);
            }
        }
        Err(CoreError::NotPresent {
            locator: format!("selected option in {}", self.base.locator()),
        })
    }

    /// Every currently-selected option; may be empty
    pub async fn all_selected_options(&self) -> Result<Vec<Element>> {
        let mut selected = Vec::new();
        for option in self.options().await? {
            if option.is_selected().await? {
                selected.push(option);
            }
        }
        Ok(selected)
    }

    pub async fn select_by_index(&self, index: usize) -> Result<()> {
        info!("Select option by index {{ {index} }} with {{ {} }}", self.base.locator());
        let option = self.option_at(index).await?;
        self.set_selected(&option, true).await
    }

    pub async fn select_by_value(&self, value: &str) -> Result<()> {
        info!("Select option by value {{ {value} }} with {{ {} }}", self.base.locator());
        let option = self.option_with_value(value).await?;
        self.set_selected(&option, true).await
    }

    pub async fn select_by_visible_text(&self, text: &str) -> Result<()> {
        info!("Select option by text {{ {text} }} with {{ {} }}", self.base.locator());
        let option = self.option_with_text(text).await?;
        self.set_selected(&option, true).await
    }

    pub async fn deselect_by_index(&self, index: usize) -> Result<()> {
        self.ensure_multiple().await?;
        let option = self.option_at(index).await?;
        self.set_selected(&option, false).await
    }

    pub async fn deselect_by_value(&self, value: &str) -> Result<()> {
        self.ensure_multiple().await?;
        let option = self.option_with_value(value).await?;
        self.set_selected(&option, false).await
    }

    pub async fn deselect_by_visible_text(&self, text: &str) -> Result<()> {
        self.ensure_multiple().await?;
        let option = self.option_with_text(text).await?;
        self.set_selected(&option, false).await
    }

    /// Clear every selection on a multi-select
    pub async fn deselect_all(&self) -> Result<()> {
        self.ensure_multiple().await?;
        for option in self.all_selected_options().await? {
            option.click().await?;
        }
        Ok(())
    }

    async fn option_at(&self, index: usize) -> Result<Element> {
        let mut options = self.options().await?;
        if index >= options.len() {
            return Err(CoreError::NotPresent {
                locator: format!(
                    "option [index {index} of {}] in {}",
                    options.len(),
                    self.base.locator()
                ),
            });
        }
        Ok(options.swap_remove(index))
    }

    async fn option_with_value(&self, value: &str) -> Result<Element> {
        self.ensure_select().await?;
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        let locator = Locator::css(format!("option[value=\"{escaped}\"]"));
        let matches = self.base.find_all_by(locator).await?;
        matches
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotPresent {
                locator: format!("option [value {value}] in {}", self.base.locator()),
            })
    }

    async fn option_with_text(&self, text: &str) -> Result<Element> {
        for option in self.options().await? {
            if option.text().await?.trim() == text {
                return Ok(option);
            }
        }
        Err(CoreError::NotPresent {
            locator: format!("option [text {text}] in {}", self.base.locator()),
        })
    }

    // Selection toggles by clicking the option, so selecting an
    // already-selected option stays a no-op in both directions.
    async fn set_selected(&self, option: &Element, desired: bool) -> Result<()> {
        if option.is_selected().await? != desired {
            option.click().await?;
        }
        Ok(())
    }
}

impl ElementProxy<Select> {
    pub async fn select_by_index(&self, index: usize) -> Result<()> {
        self.resolve().await?.select_by_index(index).await
    }

    pub async fn select_by_value(&self, value: &str) -> Result<()> {
        self.resolve().await?.select_by_value(value).await
    }

    pub async fn select_by_visible_text(&self, text: &str) -> Result<()> {
        self.resolve().await?.select_by_visible_text(text).await
    }

    pub async fn deselect_all(&self) -> Result<()> {
        self.resolve().await?.deselect_all().await
    }

    pub async fn is_multiple(&self) -> Result<bool> {
        self.resolve().await?.is_multiple().await
    }
}
