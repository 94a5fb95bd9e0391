use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use crate::config::CoreConfig;
use crate::driver::{DynDriver, DynElement};
use crate::elements::Element;
use crate::errors::{CoreError, Result};
use crate::locator::Locator;
use crate::registry::{Binding, CapabilityKind, CapabilityRegistry};
use crate::resolver::Resolver;
use crate::wait::{Condition, Wait};

/// Everything a capability implementation is constructed around.
///
/// Bundles the driver handle, the element resolved for this one call, the
/// field's locator and the worker configuration. Lives for exactly one
/// capability method invocation.
pub struct ElementContext {
    driver: DynDriver,
    element: DynElement,
    locator: Locator,
    config: CoreConfig,
}

impl ElementContext {
    pub(crate) fn new(
        driver: DynDriver,
        element: DynElement,
        locator: Locator,
        config: CoreConfig,
    ) -> Self {
        Self {
            driver,
            element,
            locator,
            config,
        }
    }

    pub fn driver(&self) -> &DynDriver {
        &self.driver
    }

    pub fn element(&self) -> &DynElement {
        &self.element
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub(crate) fn into_parts(self) -> (DynDriver, DynElement, Locator, CoreConfig) {
        (self.driver, self.element, self.locator, self.config)
    }
}

/// Contract every capability implementation fulfils.
///
/// `attach` wraps one freshly resolved element; the resulting value is
/// discarded at the end of the call that created it. `base` exposes the
/// shared element contract so generic passthroughs work for any role.
pub trait Capability: Send + Sized + 'static {
    /// The registry tag this implementation answers to
    const KIND: CapabilityKind;

    /// Wrap a freshly resolved element
    fn attach(ctx: ElementContext) -> Self;

    /// The base element contract underneath this role
    fn base(&self) -> &Element;
}

/// Lazily-bound handle to a single element field.
///
/// Holds no element. Every call resolves the locator against the live
/// document, wraps the result in the registry's implementation for `C`,
/// forwards, and drops the wrapper - so no stale reference can survive
/// from one call to the next.
pub struct ElementProxy<C: Capability> {
    resolver: Resolver,
    locator: Locator,
    config: CoreConfig,
    binding: Binding,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> ElementProxy<C> {
    pub(crate) fn bind(
        driver: DynDriver,
        locator: Locator,
        config: CoreConfig,
        registry: &CapabilityRegistry,
    ) -> Result<Self> {
        let binding = registry.implementation_for(C::KIND)?;
        Ok(Self {
            resolver: Resolver::new(driver),
            locator,
            config,
            binding,
            _capability: PhantomData,
        })
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Resolve the locator now and wrap the result in a fresh `C`.
    ///
    /// The returned value is good for the duration of the current call
    /// chain only; keep the proxy, not the capability.
    pub async fn resolve(&self) -> Result<C> {
        let element = self.resolver.resolve(&self.locator).await?;
        let ctx = ElementContext::new(
            self.resolver.driver().clone(),
            element,
            self.locator.clone(),
            self.config.clone(),
        );
        downcast::<C>(self.binding.construct(ctx), self.binding.implementation())
    }

    /// Placeholder description; never touches the driver and never fails
    pub fn describe(&self) -> String {
        format!("proxy element for: {}", self.locator)
    }

    fn wait(&self) -> Wait {
        Wait::from_config(&self.config)
    }

    /// Whether the locator currently resolves; `NotPresent` becomes `false`
    pub async fn is_present(&self) -> Result<bool> {
        match self.resolver.resolve(&self.locator).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_present() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Whether the element currently resolves and is displayed;
    /// `NotPresent` becomes `false`
    pub async fn is_visible(&self) -> Result<bool> {
        match self.resolver.resolve(&self.locator).await {
            Ok(element) => element.is_displayed().await,
            Err(err) if err.is_not_present() => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub async fn wait_until(&self, condition: Condition) -> Result<()> {
        self.wait()
            .until(&self.resolver, &self.locator, condition)
            .await
    }

    pub async fn wait_until_within(&self, condition: Condition, timeout: Duration) -> Result<()> {
        self.wait()
            .with_timeout(timeout)
            .until(&self.resolver, &self.locator, condition)
            .await
    }

    pub async fn wait_until_present(&self) -> Result<()> {
        self.wait_until(Condition::Present).await
    }

    pub async fn wait_until_visible(&self) -> Result<()> {
        self.wait_until(Condition::Visible).await
    }

    pub async fn wait_until_not_visible(&self) -> Result<()> {
        self.wait_until(Condition::NotVisible).await
    }

    pub async fn wait_until_enabled(&self) -> Result<()> {
        self.wait_until(Condition::Enabled).await
    }

    pub async fn wait_until_disabled(&self) -> Result<()> {
        self.wait_until(Condition::NotEnabled).await
    }

    pub async fn wait_until_clickable(&self) -> Result<()> {
        self.wait_until(Condition::Clickable).await
    }

    /// Rendered text of the freshly resolved element
    pub async fn text(&self) -> Result<String> {
        self.resolve().await?.base().text().await
    }

    /// Value attribute of the freshly resolved element
    pub async fn value(&self) -> Result<String> {
        self.resolve().await?.base().value().await
    }

    /// Attribute of the freshly resolved element
    pub async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.resolve().await?.base().attr(name).await
    }

    pub async fn tag_name(&self) -> Result<String> {
        self.resolve().await?.base().tag_name().await
    }

    pub async fn highlight(&self) -> Result<()> {
        self.resolve().await?.base().highlight().await
    }

    pub async fn scroll_into_view(&self) -> Result<()> {
        self.resolve().await?.base().scroll_into_view().await
    }
}

impl<C: Capability> fmt::Display for ElementProxy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proxy element for: {}", self.locator)
    }
}

impl<C: Capability> fmt::Debug for ElementProxy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementProxy")
            .field("locator", &self.locator)
            .field("binding", &self.binding)
            .finish()
    }
}

/// Lazily-bound handle to a collection field.
///
/// Every access resolves the locator to all current matches and wraps
/// each one fresh; an empty result set is a usage error, same as the
/// single form.
pub struct ElementListProxy<C: Capability> {
    resolver: Resolver,
    locator: Locator,
    config: CoreConfig,
    binding: Binding,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> ElementListProxy<C> {
    pub(crate) fn bind(
        driver: DynDriver,
        locator: Locator,
        config: CoreConfig,
        registry: &CapabilityRegistry,
    ) -> Result<Self> {
        let binding = registry.implementation_for(C::KIND)?;
        Ok(Self {
            resolver: Resolver::new(driver),
            locator,
            config,
            binding,
            _capability: PhantomData,
        })
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Resolve all current matches, each wrapped fresh, in document order
    pub async fn all(&self) -> Result<Vec<C>> {
        let elements = self.resolver.resolve_all(&self.locator).await?;
        elements
            .into_iter()
            .map(|element| {
                let ctx = ElementContext::new(
                    self.resolver.driver().clone(),
                    element,
                    self.locator.clone(),
                    self.config.clone(),
                );
                downcast::<C>(self.binding.construct(ctx), self.binding.implementation())
            })
            .collect()
    }

    /// Number of elements currently matching
    pub async fn count(&self) -> Result<usize> {
        Ok(self.resolver.resolve_all(&self.locator).await?.len())
    }

    /// The element at `index` in the current resolution
    pub async fn nth(&self, index: usize) -> Result<C> {
        let mut all = self.all().await?;
        if index >= all.len() {
            return Err(CoreError::NotPresent {
                locator: format!("{} [index {index} of {}]", self.locator, all.len()),
            });
        }
        Ok(all.swap_remove(index))
    }

    pub async fn first(&self) -> Result<C> {
        self.nth(0).await
    }

    /// Rendered text of every current match, in document order
    pub async fn texts(&self) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for capability in self.all().await? {
            texts.push(capability.base().text().await?);
        }
        Ok(texts)
    }
}

impl<C: Capability> fmt::Display for ElementListProxy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proxy element list for: {}", self.locator)
    }
}

impl<C: Capability> fmt::Debug for ElementListProxy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementListProxy")
            .field("locator", &self.locator)
            .field("binding", &self.binding)
            .finish()
    }
}

fn downcast<C: Capability>(
    boxed: Box<dyn std::any::Any + Send>,
    implementation: &'static str,
) -> Result<C> {
    boxed.downcast::<C>().map(|c| *c).map_err(|_| {
        CoreError::Configuration(format!(
            "binding for {:?} produces {implementation}, not {}",
            C::KIND,
            std::any::type_name::<C>()
        ))
    })
}
