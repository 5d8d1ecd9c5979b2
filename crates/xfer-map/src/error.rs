//! Error types for mapping settings.

use thiserror::Error;

/// Errors from reading mapping settings.
///
/// Mapping lookups themselves never fail; only parsing externally supplied
/// settings data can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Mapping type title not recognized.
    #[error("Unknown mapping type: {0}")]
    UnknownMappingType(String),

    /// Required key absent from a settings section.
    #[error("Missing setting '{key}' in section '{section}'")]
    MissingSetting {
        /// Section that was read.
        section: String,
        /// Key that was expected.
        key: String,
    },

    /// Value present but not parseable.
    #[error("Setting '{key}' has invalid value '{value}' (expected {expected})")]
    InvalidSetting {
        /// Key that was read.
        key: String,
        /// Raw stored value.
        value: String,
        /// What the value should have looked like.
        expected: &'static str,
    },
}

impl MappingError {
    /// Get the settings key associated with this error, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingSetting { key, .. } | Self::InvalidSetting { key, .. } => Some(key),
            Self::UnknownMappingType(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
