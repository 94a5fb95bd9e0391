use crate::elements::Element;
use crate::errors::{CoreError, Result};
use crate::locator::Locator;
use crate::proxy::{Capability, ElementContext, ElementProxy};
use crate::registry::CapabilityKind;

// Rows directly under the table or under tbody; header and data cells
// alike within a row.
const ROWS_XPATH: &str = "tr|tbody/tr";
const CELLS_XPATH: &str = "th|td";

/// A table traversed structurally on every call.
///
/// Nothing is snapshotted between calls: `row_count` followed by `cell`
/// each re-walk the live tree, so a table mutating in between may shift
/// indices. Callers that need a consistent view read it in one call.
pub struct Table {
    base: Element,
}

impl Capability for Table {
    const KIND: CapabilityKind = CapabilityKind::Table;

    fn attach(ctx: ElementContext) -> Self {
        Self {
            base: Element::attach(ctx),
        }
    }

    fn base(&self) -> &Element {
        &self.base
    }
}

impl Table {
    async fn rows(&self) -> Result<Vec<Element>> {
        self.base.find_all_by(Locator::xpath(ROWS_XPATH)).await
    }

    async fn cells(&self, row: &Element) -> Result<Vec<Element>> {
        row.find_all_by(Locator::xpath(CELLS_XPATH)).await
    }

    pub async fn row_count(&self) -> Result<usize> {
        Ok(self.rows().await?.len())
    }

    pub async fn column_count(&self, row: usize) -> Result<usize> {
        let row = self.row_at(row).await?;
        Ok(self.cells(&row).await?.len())
    }

    /// The cell at the given coordinates, wrapped as a base element
    pub async fn cell(&self, row: usize, column: usize) -> Result<Element> {
        let row_element = self.row_at(row).await?;
        let mut cells = self.cells(&row_element).await?;
        if column >= cells.len() {
            return Err(CoreError::NotPresent {
                locator: format!(
                    "cell ({row}, {column}) in table {}",
                    self.base.locator()
                ),
            });
        }
        Ok(cells.swap_remove(column))
    }

    pub async fn cell_data(&self, row: usize, column: usize) -> Result<String> {
        self.cell(row, column).await?.text().await
    }

    pub async fn click_cell(&self, row: usize, column: usize) -> Result<()> {
        let cell = self.cell(row, column).await?;
        cell.wait_until_clickable().await?;
        cell.click().await
    }

    async fn row_at(&self, row: usize) -> Result<Element> {
        let mut rows = self.rows().await?;
        if row >= rows.len() {
            return Err(CoreError::NotPresent {
                locator: format!("row {row} in table {}", self.base.locator()),
            });
        }
        Ok(rows.swap_remove(row))
    }
}

impl ElementProxy<Table> {
    pub async fn row_count(&self) -> Result<usize> {
        self.resolve().await?.row_count().await
    }

    pub async fn column_count(&self, row: usize) -> Result<usize> {
        self.resolve().await?.column_count(row).await
    }

    pub async fn cell_data(&self, row: usize, column: usize) -> Result<String> {
        self.resolve().await?.cell_data(row, column).await
    }

    pub async fn click_cell(&self, row: usize, column: usize) -> Result<()> {
        self.resolve().await?.click_cell(row, column).await
    }
}
