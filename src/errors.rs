use crate::locator::Locator;
use crate::registry::CapabilityKind;
use thiserror::Error;

/// Result type alias for all library operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by element resolution, waiting and capability operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// A locator resolved to zero elements where at least one was required
    #[error("element not found - {locator}")]
    NotPresent { locator: String },

    /// Visibility wait expired while the element stayed hidden or absent
    #[error("element not visible after {timeout_secs}s - {locator}")]
    NotVisible { locator: String, timeout_secs: u64 },

    /// Invisibility wait expired while the element stayed visible
    #[error("element still visible after {timeout_secs}s - {locator}")]
    StillVisible { locator: String, timeout_secs: u64 },

    /// Enablement wait expired while the element stayed disabled
    #[error("element not enabled after {timeout_secs}s - {locator}")]
    NotEnabled { locator: String, timeout_secs: u64 },

    /// Disablement wait expired while the element stayed enabled
    #[error("element still enabled after {timeout_secs}s - {locator}")]
    StillEnabled { locator: String, timeout_secs: u64 },

    /// A capability type has no registered implementation, or a page
    /// object field could not be constructed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An operation required a specific element kind (e.g. `<select>`)
    /// but found something else
    #[error("expected a <{expected}> element but found <{actual}> - {locator}")]
    UnexpectedTag {
        locator: String,
        expected: &'static str,
        actual: String,
    },

    /// A deselect operation was attempted on a single-choice select
    #[error("only options of a multi-select may be deselected - {locator}")]
    NotMultiple { locator: String },

    /// Any failure surfaced by the underlying driver, passed through
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl CoreError {
    pub(crate) fn not_present(locator: &Locator) -> Self {
        CoreError::NotPresent {
            locator: locator.to_string(),
        }
    }

    pub(crate) fn missing_binding(kind: CapabilityKind) -> Self {
        CoreError::Configuration(format!(
            "no implementation registered for capability {kind:?}"
        ))
    }

    pub(crate) fn driver<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Driver(Box::new(source))
    }

    /// True for the not-found family of failures, the ones a boolean
    /// presence/visibility probe converts to `false`
    pub fn is_not_present(&self) -> bool {
        matches!(self, CoreError::NotPresent { .. })
    }
}
