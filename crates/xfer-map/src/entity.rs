//! Attribute mappings for one target entity.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use xfer_model::{
    AttributeRef, EntityAttribute, EntityRef, EvaluationContext, NamingService, SourceFields,
};

use crate::attribute::AttributeMapping;
use crate::bind::{AutoBindOptions, resolve_source};
use crate::types::MappingType;

/// Ordered attribute mappings for one target entity.
///
/// Entries are keyed by target attribute *name*, never by object identity,
/// and kept in the order they were first requested.
#[derive(Debug, Clone)]
pub struct EntityMapping {
    entity_name: String,
    entity: EntityRef,
    attribute_mappings: Vec<AttributeMapping>,
}

impl EntityMapping {
    /// Create an empty mapping, naming it with the DML rendering of `entity`.
    pub fn new(entity: EntityRef, naming: &dyn NamingService) -> Self {
        let entity_name = naming.full_name(entity.as_ref(), EvaluationContext::Dml);
        Self::from_parts(entity, entity_name)
    }

    pub(crate) fn from_parts(entity: EntityRef, entity_name: String) -> Self {
        Self {
            entity_name,
            entity,
            attribute_mappings: Vec::new(),
        }
    }

    /// Fully-qualified DML name computed at construction.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn attribute_mappings(&self) -> &[AttributeMapping] {
        &self.attribute_mappings
    }

    /// Edit entries in place. Adding goes through
    /// [`Self::get_or_create_attribute_mapping`].
    ///
    /// Renaming through this slice is not checked: two entries may end up with
    /// the same target name, after which name lookups return the first of them.
    pub fn attribute_mappings_mut(&mut self) -> &mut [AttributeMapping] {
        &mut self.attribute_mappings
    }

    /// Replace all entries, dropping later duplicates of a target name.
    pub fn set_attribute_mappings(&mut self, mappings: Vec<AttributeMapping>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            if seen.insert(mapping.target_attribute_name().to_string()) {
                kept.push(mapping);
            } else {
                warn!(
                    entity = %self.entity_name,
                    attribute = mapping.target_attribute_name(),
                    "dropping duplicate attribute mapping"
                );
            }
        }
        self.attribute_mappings = kept;
    }

    /// Return the mapping whose target name equals `attribute.name()`,
    /// appending an unresolved one if there is none.
    pub fn get_or_create_attribute_mapping(
        &mut self,
        attribute: &AttributeRef,
    ) -> &mut AttributeMapping {
        let position = match self.position_of(attribute.name()) {
            Some(position) => position,
            None => {
                debug!(
                    entity = %self.entity_name,
                    attribute = attribute.name(),
                    "created attribute mapping"
                );
                self.attribute_mappings.push(AttributeMapping::new(Arc::clone(attribute)));
                self.attribute_mappings.len() - 1
            }
        };
        &mut self.attribute_mappings[position]
    }

    pub fn attribute_mapping(&self, name: &str) -> Option<&AttributeMapping> {
        self.position_of(name).map(|p| &self.attribute_mappings[p])
    }

    pub fn attribute_mapping_mut(&mut self, name: &str) -> Option<&mut AttributeMapping> {
        self.position_of(name).map(|p| &mut self.attribute_mappings[p])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.attribute_mappings
            .iter()
            .position(|m| m.target_attribute_name() == name)
    }

    /// True when no entry is [`MappingType::None`]. Vacuously true when empty.
    ///
    /// Source fields and default literals are not validated, and the `skip`
    /// flag plays no part.
    pub fn is_complete(&self) -> bool {
        self.attribute_mappings
            .iter()
            .all(|m| m.mapping_type().is_resolved())
    }

    /// Entries set to import whose source position was never resolved.
    pub fn unresolved_imports(&self) -> impl Iterator<Item = &AttributeMapping> {
        self.attribute_mappings
            .iter()
            .filter(|m| m.is_unresolved_import())
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.attribute_mappings.len(),
            ..MappingSummary::default()
        };
        for mapping in &self.attribute_mappings {
            match mapping.mapping_type() {
                MappingType::None => summary.unmapped += 1,
                MappingType::Import => summary.imported += 1,
                MappingType::DefaultValue => summary.defaulted += 1,
                MappingType::Skip => summary.skipped += 1,
            }
            if mapping.is_unresolved_import() {
                summary.unresolved_imports += 1;
            }
        }
        summary
    }

    /// Bind unresolved entries to same-named source fields.
    ///
    /// Only entries still at [`MappingType::None`] are considered, and a
    /// source field already imported by another entry is not bound again.
    /// Returns the number of entries bound.
    pub fn auto_bind(&mut self, sources: &SourceFields, options: AutoBindOptions) -> usize {
        let mut used: HashSet<usize> = self
            .attribute_mappings
            .iter()
            .filter(|m| m.mapping_type() == MappingType::Import)
            .filter_map(AttributeMapping::source_attribute_index)
            .collect();
        let mut bound = 0;
        for mapping in &mut self.attribute_mappings {
            if mapping.mapping_type() != MappingType::None {
                continue;
            }
            let Some(field) = resolve_source(sources, mapping.target_attribute_name(), options)
            else {
                continue;
            };
            if !used.insert(field.index) {
                debug!(
                    attribute = mapping.target_attribute_name(),
                    source = %field.name,
                    "source field already bound"
                );
                continue;
            }
            mapping.import_from(field);
            bound += 1;
        }
        debug!(entity = %self.entity_name, bound, "auto-bound attribute mappings");
        bound
    }
}

/// Counts of entries per mapping type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    pub total: usize,
    pub unmapped: usize,
    pub imported: usize,
    pub defaulted: usize,
    pub skipped: usize,
    /// Imports without a resolved source position (also counted in `imported`).
    pub unresolved_imports: usize,
}

impl MappingSummary {
    pub fn is_complete(&self) -> bool {
        self.unmapped == 0
    }
}
