use std::any::Any;
use std::collections::HashMap;

use crate::errors::{CoreError, Result};
use crate::proxy::{Capability, ElementContext};

/// Tag identifying one abstract element role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Element,
    Button,
    CheckBox,
    Radio,
    Select,
    TextInput,
    Table,
    Link,
    Label,
}

impl CapabilityKind {
    /// Every kind the default registry must cover
    pub const ALL: [CapabilityKind; 9] = [
        CapabilityKind::Element,
        CapabilityKind::Button,
        CapabilityKind::CheckBox,
        CapabilityKind::Radio,
        CapabilityKind::Select,
        CapabilityKind::TextInput,
        CapabilityKind::Table,
        CapabilityKind::Link,
        CapabilityKind::Label,
    ];
}

type Constructor = fn(ElementContext) -> Box<dyn Any + Send>;

fn construct<C: Capability>(ctx: ElementContext) -> Box<dyn Any + Send> {
    Box::new(C::attach(ctx))
}

/// The declared implementation for one capability kind
#[derive(Clone, Copy)]
pub struct Binding {
    kind: CapabilityKind,
    implementation: &'static str,
    constructor: Constructor,
}

impl Binding {
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// Type name of the implementation this binding produces
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    pub(crate) fn construct(&self, ctx: ElementContext) -> Box<dyn Any + Send> {
        (self.constructor)(ctx)
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind)
            .field("implementation", &self.implementation)
            .finish()
    }
}

/// Maps each capability kind to its sole concrete implementation.
///
/// Lookup happens once per proxy at construction time, so a missing
/// binding surfaces as a `Configuration` error when the page object is
/// built, not when a test first touches the field.
#[derive(Debug)]
pub struct CapabilityRegistry {
    bindings: HashMap<CapabilityKind, Binding>,
}

impl CapabilityRegistry {
    /// A registry with no bindings at all
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The standard registry covering every shipped capability
    pub fn with_defaults() -> Self {
        use crate::elements::{
            Button, CheckBox, Element, Label, Link, Radio, Select, Table, TextInput,
        };
        let mut registry = Self::empty();
        registry.register::<Element>();
        registry.register::<Button>();
        registry.register::<CheckBox>();
        registry.register::<Radio>();
        registry.register::<Select>();
        registry.register::<TextInput>();
        registry.register::<Table>();
        registry.register::<Link>();
        registry.register::<Label>();
        registry
    }

    /// Declare `C` as the implementation for its kind, replacing any
    /// previous binding for that kind.
    pub fn register<C: Capability>(&mut self) {
        let binding = Binding {
            kind: C::KIND,
            implementation: std::any::type_name::<C>(),
            constructor: construct::<C>,
        };
        self.bindings.insert(C::KIND, binding);
    }

    /// The binding for a kind; absence is a fatal configuration error.
    pub fn implementation_for(&self, kind: CapabilityKind) -> Result<Binding> {
        self.bindings
            .get(&kind)
            .copied()
            .ok_or_else(|| CoreError::missing_binding(kind))
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
