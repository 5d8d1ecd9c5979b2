//! Structured key-value settings exchanged with a persistence layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

/// Hooks an outer persistence layer calls to restore and capture state.
pub trait TransferSettings {
    /// Populate state from `settings`.
    fn load_settings(&mut self, settings: &SettingsSection) -> Result<()>;

    /// Write state into `settings`.
    fn save_settings(&self, settings: &mut SettingsSection);
}

/// A named section of string values and nested child sections.
///
/// Values are kept in key order; child sections in insertion order with
/// unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sections: Vec<SettingsSection>,
}

impl SettingsSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            sections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like [`Self::get`] but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| MappingError::MissingSetting {
            section: self.name.clone(),
            key: key.to_string(),
        })
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get(key)
            .map(|value| {
                value.trim().parse().map_err(|_| MappingError::InvalidSetting {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: "integer",
                })
            })
            .transpose()
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get(key)
            .map(|value| match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(MappingError::InvalidSetting {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: "true or false",
                }),
            })
            .transpose()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.put(key, value.to_string());
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&SettingsSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    /// Drop every child section, keeping this section's own values.
    pub fn clear_sections(&mut self) {
        self.sections.clear();
    }

    /// Return the child section `name`, creating it if absent.
    pub fn add_section(&mut self, name: &str) -> &mut SettingsSection {
        let position = match self.sections.iter().position(|s| s.name == name) {
            Some(position) => position,
            None => {
                self.sections.push(SettingsSection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[position]
    }
}
