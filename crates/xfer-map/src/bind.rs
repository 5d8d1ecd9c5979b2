//! Name-based resolution of target attributes against source fields.

use xfer_model::{SourceField, SourceFields};

/// Controls how [`crate::EntityMapping::auto_bind`] matches names.
///
/// An exact match always wins. The relaxed modes are only tried when it
/// fails, in the order case-insensitive then separator-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoBindOptions {
    /// Match `email` against `EMAIL`.
    pub case_insensitive: bool,
    /// Match `first_name` against `First Name`. Implies case-insensitive.
    pub ignore_separators: bool,
}

impl Default for AutoBindOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            ignore_separators: false,
        }
    }
}

impl AutoBindOptions {
    /// Only byte-for-byte equal names bind.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            case_insensitive: false,
            ignore_separators: false,
        }
    }

    #[must_use]
    pub fn with_case_insensitive(mut self, enable: bool) -> Self {
        self.case_insensitive = enable;
        self
    }

    #[must_use]
    pub fn with_ignore_separators(mut self, enable: bool) -> Self {
        self.ignore_separators = enable;
        self
    }
}

/// Find the source field best matching `target_name`.
pub fn resolve_source<'a>(
    sources: &'a SourceFields,
    target_name: &str,
    options: AutoBindOptions,
) -> Option<&'a SourceField> {
    sources
        .find(target_name)
        .or_else(|| {
            options
                .case_insensitive
                .then(|| sources.find_ignore_case(target_name))
                .flatten()
        })
        .or_else(|| {
            options
                .ignore_separators
                .then(|| sources.find_normalized(target_name))
                .flatten()
        })
}
