//! Mapping type tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// How a target attribute receives its value during a transfer.
///
/// Any variant may be set from any other. Switching variants never clears
/// the source or default fields on [`crate::AttributeMapping`]; consumers
/// ignore fields that do not apply to the current variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingType {
    /// Not resolved yet. Blocks completeness.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Value comes from a source field.
    #[serde(rename = "import")]
    Import,
    /// Value is the literal default.
    #[serde(rename = "default")]
    DefaultValue,
    /// Attribute is left out of the transfer.
    #[serde(rename = "skip")]
    Skip,
}

impl MappingType {
    pub const ALL: [MappingType; 4] = [
        MappingType::None,
        MappingType::Import,
        MappingType::DefaultValue,
        MappingType::Skip,
    ];

    /// Stable title used in settings and on the command line.
    pub fn title(&self) -> &'static str {
        match self {
            MappingType::None => "none",
            MappingType::Import => "import",
            MappingType::DefaultValue => "default",
            MappingType::Skip => "skip",
        }
    }

    /// True for every variant except [`MappingType::None`].
    pub fn is_resolved(&self) -> bool {
        !matches!(self, MappingType::None)
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for MappingType {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MappingType::ALL
            .into_iter()
            .find(|t| t.title() == normalized)
            .ok_or_else(|| MappingError::UnknownMappingType(s.to_string()))
    }
}
