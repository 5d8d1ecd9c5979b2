//! Session registry of entity mappings.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};
use xfer_model::{Entity, EntityRef, EvaluationContext, NamingService, QuotedNaming};

use crate::entity::EntityMapping;
use crate::error::Result;
use crate::settings::{SettingsSection, TransferSettings};

/// All entity mappings of one data-transfer session.
///
/// Keyed by the fully-qualified DML name of each entity, so two distinct
/// entity objects describing the same table share one [`EntityMapping`].
/// Owned by the session and dropped with it.
#[derive(Debug)]
pub struct TransferMappingSet {
    naming: Arc<dyn NamingService>,
    entity_mappings: HashMap<String, EntityMapping>,
}

impl Default for TransferMappingSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferMappingSet {
    /// Create an empty set using [`QuotedNaming`].
    pub fn new() -> Self {
        Self::with_naming(Arc::new(QuotedNaming))
    }

    pub fn with_naming(naming: Arc<dyn NamingService>) -> Self {
        Self {
            naming,
            entity_mappings: HashMap::new(),
        }
    }

    pub fn naming(&self) -> &dyn NamingService {
        self.naming.as_ref()
    }

    /// Return the mapping for `entity`, creating it on first request.
    pub fn get_or_create_entity_mapping(&mut self, entity: &EntityRef) -> &mut EntityMapping {
        let full_name = self.identity_of(entity.as_ref());
        self.entity_mappings
            .entry(full_name)
            .or_insert_with_key(|name| {
                debug!(entity = %name, "created entity mapping");
                EntityMapping::from_parts(Arc::clone(entity), name.clone())
            })
    }

    /// Look up by fully-qualified DML name without creating anything.
    pub fn entity_mapping(&self, full_name: &str) -> Option<&EntityMapping> {
        self.entity_mappings.get(full_name)
    }

    pub fn entity_mapping_mut(&mut self, full_name: &str) -> Option<&mut EntityMapping> {
        self.entity_mappings.get_mut(full_name)
    }

    /// Look up the mapping `entity` would resolve to without creating it.
    pub fn find_entity_mapping(&self, entity: &dyn Entity) -> Option<&EntityMapping> {
        self.entity_mappings.get(&self.identity_of(entity))
    }

    /// Iterate mappings in no particular order.
    pub fn entity_mappings(&self) -> impl Iterator<Item = &EntityMapping> {
        self.entity_mappings.values()
    }

    pub fn len(&self) -> usize {
        self.entity_mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_mappings.is_empty()
    }

    /// True when every registered entity mapping is complete.
    pub fn is_complete(&self) -> bool {
        self.entity_mappings.values().all(EntityMapping::is_complete)
    }

    fn identity_of(&self, entity: &dyn Entity) -> String {
        self.naming.full_name(entity, EvaluationContext::Dml)
    }
}

// Mapping state lives for one session only. The hooks exist so an outer
// persistence layer can wrap them; see `EntityMappingSnapshot`.
impl TransferSettings for TransferMappingSet {
    fn load_settings(&mut self, settings: &SettingsSection) -> Result<()> {
        trace!(section = settings.name(), "mapping settings are not restored");
        Ok(())
    }

    fn save_settings(&self, settings: &mut SettingsSection) {
        trace!(section = settings.name(), "mapping settings are not saved");
    }
}
