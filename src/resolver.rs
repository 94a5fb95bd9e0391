use tracing::debug;

use crate::driver::{DynDriver, DynElement};
use crate::errors::{CoreError, Result};
use crate::locator::Locator;

/// Finds live elements for a locator against the current document.
///
/// Results are never cached; two back-to-back calls may observe two
/// different elements if the page mutated in between. No waiting happens
/// here - the wait engine layers polling on top.
#[derive(Clone)]
pub struct Resolver {
    driver: DynDriver,
}

impl Resolver {
    pub fn new(driver: DynDriver) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &DynDriver {
        &self.driver
    }

    /// Resolve to exactly one element; zero matches is `NotPresent`.
    pub async fn resolve(&self, locator: &Locator) -> Result<DynElement> {
        debug!("Resolving element {}", locator);
        self.driver.find(locator).await
    }

    /// Resolve to all matching elements in document order.
    ///
    /// An empty result set is treated as a usage error (`NotPresent`),
    /// matching the single form: callers of a list-typed field expect at
    /// least one match.
    pub async fn resolve_all(&self, locator: &Locator) -> Result<Vec<DynElement>> {
        debug!("Resolving element list {}", locator);
        let elements = self.driver.find_all(locator).await?;
        if elements.is_empty() {
            return Err(CoreError::not_present(locator));
        }
        Ok(elements)
    }
}
