use std::fmt;

/// Immutable query descriptor bound to a page-object field.
///
/// A locator never changes after binding; it is re-evaluated against the
/// live document on every capability call, so holding one across page
/// reloads is always safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Element id attribute
    Id(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Form control name attribute
    Name(String),
    /// Exact anchor text
    LinkText(String),
    /// Accessibility id (`aria-label` on web backends)
    AccessibilityId(String),
    /// Tag name
    TagName(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Locator::Id(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Locator::Css(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Locator::XPath(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Locator::Name(value.into())
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Locator::LinkText(value.into())
    }

    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Locator::AccessibilityId(value.into())
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        Locator::TagName(value.into())
    }

    /// The raw query string without the strategy prefix
    pub fn value(&self) -> &str {
        match self {
            Locator::Id(v)
            | Locator::Css(v)
            | Locator::XPath(v)
            | Locator::Name(v)
            | Locator::LinkText(v)
            | Locator::AccessibilityId(v)
            | Locator::TagName(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(v) => write!(f, "by id: {v}"),
            Locator::Css(v) => write!(f, "by css: {v}"),
            Locator::XPath(v) => write!(f, "by xpath: {v}"),
            Locator::Name(v) => write!(f, "by name: {v}"),
            Locator::LinkText(v) => write!(f, "by link text: {v}"),
            Locator::AccessibilityId(v) => write!(f, "by accessibility id: {v}"),
            Locator::TagName(v) => write!(f, "by tag name: {v}"),
        }
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
