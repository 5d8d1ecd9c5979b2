//! Binding of a single target attribute.

use std::sync::Arc;

use xfer_model::{AttributeRef, EntityAttribute, SourceField};

use crate::types::MappingType;

/// Sentinel for an unresolved source index in persisted settings.
pub const UNRESOLVED_SOURCE_INDEX: i64 = -1;

/// How one target attribute is fed during a transfer.
///
/// Holds a shared handle to the live attribute plus a copy of its name. The
/// copy is the matching key within an [`crate::EntityMapping`], so a binding
/// survives the attribute object being re-fetched from the database.
///
/// Fields belonging to different [`MappingType`] variants are independent:
/// changing the type never touches the source or default fields, and the
/// `skip` flag is never synchronized with [`MappingType::Skip`].
#[derive(Debug, Clone)]
pub struct AttributeMapping {
    target_attribute: AttributeRef,
    target_attribute_name: String,
    source_attribute_name: Option<String>,
    source_attribute_index: Option<usize>,
    skip: bool,
    default_value: Option<String>,
    mapping_type: MappingType,
}

impl AttributeMapping {
    /// Create an unresolved mapping for `attribute`.
    pub fn new(attribute: AttributeRef) -> Self {
        let target_attribute_name = attribute.name().to_string();
        Self {
            target_attribute: attribute,
            target_attribute_name,
            source_attribute_name: None,
            source_attribute_index: None,
            skip: false,
            default_value: None,
            mapping_type: MappingType::None,
        }
    }

    pub fn target_attribute(&self) -> &AttributeRef {
        &self.target_attribute
    }

    /// Matching key within the owning entity mapping.
    pub fn target_attribute_name(&self) -> &str {
        &self.target_attribute_name
    }

    /// Re-key this mapping without changing the attribute it references.
    pub fn set_target_attribute_name(&mut self, name: impl Into<String>) {
        self.target_attribute_name = name.into();
    }

    pub fn mapping_type(&self) -> MappingType {
        self.mapping_type
    }

    // No transition checks and no field clearing; see `MappingType`.
    pub fn set_mapping_type(&mut self, mapping_type: MappingType) {
        self.mapping_type = mapping_type;
    }

    pub fn source_attribute_name(&self) -> Option<&str> {
        self.source_attribute_name.as_deref()
    }

    pub fn set_source_attribute_name(&mut self, name: Option<String>) {
        self.source_attribute_name = name;
    }

    /// Position of the bound field in the source stream, `None` if unresolved.
    pub fn source_attribute_index(&self) -> Option<usize> {
        self.source_attribute_index
    }

    pub fn set_source_attribute_index(&mut self, index: Option<usize>) {
        self.source_attribute_index = index;
    }

    /// Source index with [`UNRESOLVED_SOURCE_INDEX`] standing in for `None`.
    pub fn source_attribute_index_raw(&self) -> i64 {
        self.source_attribute_index
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(UNRESOLVED_SOURCE_INDEX)
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn set_skip(&mut self, skip: bool) {
        self.skip = skip;
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn set_default_value(&mut self, value: Option<String>) {
        self.default_value = value;
    }

    /// Bind to `field` and switch to [`MappingType::Import`].
    pub fn import_from(&mut self, field: &SourceField) {
        self.source_attribute_name = Some(field.name.clone());
        self.source_attribute_index = Some(field.index);
        self.mapping_type = MappingType::Import;
    }

    /// Import selected but no source position resolved.
    ///
    /// The transfer stage reports this as a configuration error, distinct
    /// from a target attribute that does not exist.
    pub fn is_unresolved_import(&self) -> bool {
        self.mapping_type == MappingType::Import && self.source_attribute_index.is_none()
    }

    /// True if both mappings reference the same live attribute object.
    pub fn references(&self, attribute: &AttributeRef) -> bool {
        Arc::ptr_eq(&self.target_attribute, attribute)
    }
}
