//! Snapshot records of mapping state.
//!
//! These are what an outer persistence layer stores: one record per target
//! attribute carrying the bound attribute's name, the (possibly renamed)
//! target name, the mapping type, source field name and index, skip flag and
//! default literal. Restoring needs the live attributes of the entity, which
//! the records only name, so it goes through [`EntityMapping::restore`]
//! rather than a plain constructor.

use serde::{Deserialize, Serialize};
use tracing::warn;
use xfer_model::{AttributeRef, EntityAttribute};

use crate::attribute::{AttributeMapping, UNRESOLVED_SOURCE_INDEX};
use crate::entity::EntityMapping;
use crate::error::Result;
use crate::settings::SettingsSection;
use crate::types::MappingType;

const KEY_ATTRIBUTE: &str = "attribute";
const KEY_TARGET: &str = "targetAttribute";
const KEY_MAPPING_TYPE: &str = "mappingType";
const KEY_SOURCE_NAME: &str = "sourceAttribute";
const KEY_SOURCE_INDEX: &str = "sourceIndex";
const KEY_SKIP: &str = "skip";
const KEY_DEFAULT_VALUE: &str = "defaultValue";
const KEY_ENTITY: &str = "entity";

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Persisted form of one [`AttributeMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMappingRecord {
    /// Name of the live attribute the mapping is bound to.
    pub attribute: String,
    /// Target name, which differs from `attribute` after a rename.
    pub target_attribute: String,
    pub mapping_type: MappingType,
    pub source_attribute: Option<String>,
    /// [`UNRESOLVED_SOURCE_INDEX`] when unresolved.
    pub source_index: i64,
    pub skip: bool,
    pub default_value: Option<String>,
}

impl AttributeMappingRecord {
    /// Source position, treating every negative value as unresolved.
    pub fn source_index(&self) -> Option<usize> {
        usize::try_from(self.source_index).ok()
    }

    pub fn write_to(&self, section: &mut SettingsSection) {
        section.put(KEY_ATTRIBUTE, self.attribute.as_str());
        section.put(KEY_TARGET, self.target_attribute.as_str());
        section.put(KEY_MAPPING_TYPE, self.mapping_type.title());
        match &self.source_attribute {
            Some(name) => section.put(KEY_SOURCE_NAME, name.as_str()),
            None => {
                section.remove(KEY_SOURCE_NAME);
            }
        }
        section.put_int(KEY_SOURCE_INDEX, self.source_index);
        section.put_bool(KEY_SKIP, self.skip);
        match &self.default_value {
            Some(value) => section.put(KEY_DEFAULT_VALUE, value.as_str()),
            None => {
                section.remove(KEY_DEFAULT_VALUE);
            }
        }
    }

    /// Read a record; target and mapping type are required, the rest default.
    /// A record without an attribute key is bound by its target name.
    pub fn read_from(section: &SettingsSection) -> Result<Self> {
        let target_attribute = section.require(KEY_TARGET)?.to_string();
        let mapping_type: MappingType = section.require(KEY_MAPPING_TYPE)?.parse()?;
        Ok(Self {
            attribute: section
                .get(KEY_ATTRIBUTE)
                .map_or_else(|| target_attribute.clone(), str::to_string),
            target_attribute,
            mapping_type,
            source_attribute: section.get(KEY_SOURCE_NAME).map(str::to_string),
            source_index: section
                .get_int(KEY_SOURCE_INDEX)?
                .unwrap_or(UNRESOLVED_SOURCE_INDEX),
            skip: section.get_bool(KEY_SKIP)?.unwrap_or(false),
            default_value: section.get(KEY_DEFAULT_VALUE).map(str::to_string),
        })
    }

    /// Copy the recorded binding onto `mapping`. The target name is left as is.
    pub fn apply_to(&self, mapping: &mut AttributeMapping) {
        mapping.set_mapping_type(self.mapping_type);
        mapping.set_source_attribute_name(self.source_attribute.clone());
        mapping.set_source_attribute_index(self.source_index());
        mapping.set_skip(self.skip);
        mapping.set_default_value(self.default_value.clone());
    }
}

impl ToSnapshot for AttributeMapping {
    type Snapshot = AttributeMappingRecord;

    fn to_snapshot(&self) -> AttributeMappingRecord {
        AttributeMappingRecord {
            attribute: self.target_attribute().name().to_string(),
            target_attribute: self.target_attribute_name().to_string(),
            mapping_type: self.mapping_type(),
            source_attribute: self.source_attribute_name().map(str::to_string),
            source_index: self.source_attribute_index_raw(),
            skip: self.is_skip(),
            default_value: self.default_value().map(str::to_string),
        }
    }
}

/// Persisted form of one [`EntityMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMappingSnapshot {
    pub entity_name: String,
    pub attributes: Vec<AttributeMappingRecord>,
}

impl EntityMappingSnapshot {
    /// Write into a child section of `parent` named after the entity, with
    /// one grandchild section per attribute. Attribute sections left from an
    /// earlier save are replaced.
    pub fn write_to(&self, parent: &mut SettingsSection) {
        let section = parent.add_section(&self.entity_name);
        section.clear_sections();
        section.put(KEY_ENTITY, self.entity_name.as_str());
        for record in &self.attributes {
            record.write_to(section.add_section(&record.target_attribute));
        }
    }

    pub fn read_from(section: &SettingsSection) -> Result<Self> {
        let entity_name = section.require(KEY_ENTITY)?.to_string();
        let attributes = section
            .sections()
            .iter()
            .map(AttributeMappingRecord::read_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entity_name,
            attributes,
        })
    }
}

impl ToSnapshot for EntityMapping {
    type Snapshot = EntityMappingSnapshot;

    fn to_snapshot(&self) -> EntityMappingSnapshot {
        EntityMappingSnapshot {
            entity_name: self.entity_name().to_string(),
            attributes: self
                .attribute_mappings()
                .iter()
                .map(AttributeMapping::to_snapshot)
                .collect(),
        }
    }
}

impl EntityMapping {
    /// Apply `snapshot` using the live `attributes` of the entity.
    ///
    /// Each record is matched to the live attribute it was bound to. Unless an
    /// entry already carries the record's target name, the attribute is looked
    /// up through [`Self::get_or_create_attribute_mapping`] and renamed to that
    /// target name. Records with no live attribute are skipped. Returns the
    /// number of records applied.
    pub fn restore(
        &mut self,
        snapshot: &EntityMappingSnapshot,
        attributes: &[AttributeRef],
    ) -> usize {
        let mut applied = 0;
        for record in &snapshot.attributes {
            let Some(attribute) = attributes.iter().find(|a| a.name() == record.attribute) else {
                warn!(
                    entity = %snapshot.entity_name,
                    attribute = %record.attribute,
                    "no live attribute for stored mapping"
                );
                continue;
            };
            if self.attribute_mapping(&record.target_attribute).is_none() {
                self.get_or_create_attribute_mapping(attribute)
                    .set_target_attribute_name(record.target_attribute.as_str());
            }
            if let Some(entry) = self.attribute_mapping_mut(&record.target_attribute) {
                record.apply_to(entry);
                applied += 1;
            }
        }
        applied
    }
}
