//! Tests for the session-level mapping registry.

use std::sync::Arc;

use xfer_map::{MappingType, SettingsSection, TransferMappingSet, TransferSettings};
use xfer_model::{
    Entity, EntityRef, EvaluationContext, NamingService, TableEntity, quote_identifier,
};

fn customers_table() -> TableEntity {
    TableEntity::parse_path("PUBLIC.CUSTOMERS")
        .unwrap()
        .with_column_names(["ID", "NAME", "EMAIL"])
        .unwrap()
}

fn customers() -> EntityRef {
    customers_table().into_ref()
}

#[test]
fn same_entity_returns_same_mapping() {
    let entity = customers();
    let mut set = TransferMappingSet::new();

    let first: *const _ = set.get_or_create_entity_mapping(&entity);
    let second: *const _ = set.get_or_create_entity_mapping(&entity);

    assert!(std::ptr::eq(first, second));
    assert_eq!(set.len(), 1);
}

#[test]
fn refetched_entity_with_same_name_shares_mapping() {
    let table = customers_table();
    let email = table.attributes().remove(2);
    let original = table.into_ref();
    // A second metadata object for the same table, as after a schema refresh.
    let refetched = customers();
    assert!(!Arc::ptr_eq(&original, &refetched));

    let mut set = TransferMappingSet::new();
    set.get_or_create_entity_mapping(&original)
        .get_or_create_attribute_mapping(&email)
        .set_mapping_type(MappingType::Skip);

    let first: *const _ = set.get_or_create_entity_mapping(&original);
    let second: *const _ = set.get_or_create_entity_mapping(&refetched);
    assert!(std::ptr::eq(first, second));

    let mapping = set.get_or_create_entity_mapping(&refetched);
    assert_eq!(mapping.attribute_mappings().len(), 1);
    assert_eq!(
        mapping.attribute_mappings()[0].mapping_type(),
        MappingType::Skip
    );
}

#[test]
fn distinct_entities_get_distinct_mappings() {
    let mut set = TransferMappingSet::new();
    let customers = customers();
    let orders = TableEntity::parse_path("PUBLIC.ORDERS").unwrap().into_ref();
    let other_schema = TableEntity::parse_path("ARCHIVE.CUSTOMERS")
        .unwrap()
        .into_ref();

    set.get_or_create_entity_mapping(&customers);
    set.get_or_create_entity_mapping(&orders);
    set.get_or_create_entity_mapping(&other_schema);

    assert_eq!(set.len(), 3);
    assert!(set.entity_mapping("\"PUBLIC\".\"CUSTOMERS\"").is_some());
    assert!(set.entity_mapping("\"ARCHIVE\".\"CUSTOMERS\"").is_some());
    assert!(set.entity_mapping("PUBLIC.CUSTOMERS").is_none());
}

#[test]
fn entity_name_is_the_dml_rendering() {
    let mut set = TransferMappingSet::new();
    let mapping = set.get_or_create_entity_mapping(&customers());
    assert_eq!(mapping.entity_name(), "\"PUBLIC\".\"CUSTOMERS\"");
    assert_eq!(mapping.entity().name(), "CUSTOMERS");
}

#[test]
fn lookups_without_creation() {
    let mut set = TransferMappingSet::new();
    let entity = customers();
    assert!(set.is_empty());
    assert!(set.find_entity_mapping(entity.as_ref()).is_none());

    set.get_or_create_entity_mapping(&entity);
    assert!(set.find_entity_mapping(entity.as_ref()).is_some());
    let key = "\"PUBLIC\".\"CUSTOMERS\"";
    assert!(set.entity_mapping_mut(key).is_some());
    assert_eq!(set.entity_mappings().count(), 1);
}

#[test]
fn set_completeness_covers_every_entity() {
    let mut set = TransferMappingSet::new();
    assert!(set.is_complete());

    let table = TableEntity::parse_path("PUBLIC.CUSTOMERS")
        .unwrap()
        .with_column_names(["ID"])
        .unwrap();
    let attributes = table.attributes();
    let entity = table.into_ref();
    let orders = TableEntity::parse_path("PUBLIC.ORDERS").unwrap().into_ref();

    set.get_or_create_entity_mapping(&orders);
    set.get_or_create_entity_mapping(&entity)
        .get_or_create_attribute_mapping(&attributes[0]);
    assert!(!set.is_complete());

    set.get_or_create_entity_mapping(&entity)
        .get_or_create_attribute_mapping(&attributes[0])
        .set_mapping_type(MappingType::Import);
    assert!(set.is_complete());
}

/// Case-folding naming, as some databases treat unquoted names.
#[derive(Debug)]
struct UppercaseNaming;

impl NamingService for UppercaseNaming {
    fn full_name(&self, entity: &dyn Entity, _context: EvaluationContext) -> String {
        entity
            .container_path()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(entity.name()))
            .map(|s| quote_identifier(&s.to_uppercase()))
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[test]
fn identity_follows_injected_naming_service() {
    let mut set = TransferMappingSet::with_naming(Arc::new(UppercaseNaming));
    let lower = TableEntity::parse_path("public.customers").unwrap().into_ref();
    let upper = TableEntity::parse_path("PUBLIC.CUSTOMERS").unwrap().into_ref();

    let first: *const _ = set.get_or_create_entity_mapping(&lower);
    let second: *const _ = set.get_or_create_entity_mapping(&upper);

    assert!(std::ptr::eq(first, second));
    assert_eq!(
        set.naming().full_name(lower.as_ref(), EvaluationContext::Ui),
        "\"PUBLIC\".\"CUSTOMERS\""
    );
}

#[test]
fn settings_hooks_leave_state_untouched() {
    let mut set = TransferMappingSet::new();
    set.get_or_create_entity_mapping(&customers());

    let mut saved = SettingsSection::new("stream.producer");
    set.save_settings(&mut saved);
    assert_eq!(saved, SettingsSection::new("stream.producer"));

    let mut incoming = SettingsSection::new("stream.producer");
    incoming.put("unrelated", "value");
    set.load_settings(&incoming).expect("load is a no-op");
    assert_eq!(set.len(), 1);
}
