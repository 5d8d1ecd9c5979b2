//! Fields discovered in an incoming stream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named field of the source stream and its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,
    pub index: usize,
}

/// Ordered source fields with exact, case-insensitive and normalized lookup.
///
/// When two fields collide under a relaxed lookup the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct SourceFields {
    fields: Vec<SourceField>,
    by_upper: HashMap<String, usize>,
    by_normalized: HashMap<String, usize>,
}

impl SourceFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::new();
        let mut by_upper = HashMap::new();
        let mut by_normalized = HashMap::new();
        for (index, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim().to_string();
            by_upper.entry(name.to_uppercase()).or_insert(index);
            by_normalized.entry(normalize_name(&name)).or_insert(index);
            fields.push(SourceField { name, index });
        }
        Self {
            fields,
            by_upper,
            by_normalized,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceField> {
        self.fields.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SourceField> {
        self.fields.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&SourceField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn find_ignore_case(&self, name: &str) -> Option<&SourceField> {
        self.by_upper
            .get(&name.trim().to_uppercase())
            .and_then(|&index| self.fields.get(index))
    }

    /// Matches ignoring case and the separators `_ - . / \` and whitespace.
    pub fn find_normalized(&self, name: &str) -> Option<&SourceField> {
        self.by_normalized
            .get(&normalize_name(name))
            .and_then(|&index| self.fields.get(index))
    }
}

/// Lowercases and collapses separators so `First_Name` and `first name` agree.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
