//! Tests for per-entity attribute mappings.

use std::sync::Arc;

use xfer_map::{
    AttributeMapping, AutoBindOptions, EntityMapping, MappingSummary, MappingType,
    TransferMappingSet,
};
use xfer_model::{AttributeRef, QuotedNaming, SourceField, SourceFields, TableEntity};

struct Customers {
    entity: xfer_model::EntityRef,
    id: AttributeRef,
    name: AttributeRef,
    email: AttributeRef,
}

fn customers() -> Customers {
    let table = TableEntity::parse_path("PUBLIC.CUSTOMERS")
        .unwrap()
        .with_column_names(["ID", "NAME", "EMAIL"])
        .unwrap();
    let mut attributes = table.attributes().into_iter();
    let id = attributes.next().unwrap();
    let name = attributes.next().unwrap();
    let email = attributes.next().unwrap();
    Customers {
        entity: table.into_ref(),
        id,
        name,
        email,
    }
}

fn target_names(mapping: &EntityMapping) -> Vec<&str> {
    mapping
        .attribute_mappings()
        .iter()
        .map(AttributeMapping::target_attribute_name)
        .collect()
}

#[test]
fn customers_scenario() {
    let c = customers();
    let mut set = TransferMappingSet::new();
    let mapping = set.get_or_create_entity_mapping(&c.entity);
    assert!(mapping.is_complete(), "empty mapping is vacuously complete");

    mapping.get_or_create_attribute_mapping(&c.name);
    assert!(!mapping.is_complete());
    mapping.get_or_create_attribute_mapping(&c.id);
    mapping.get_or_create_attribute_mapping(&c.email);
    assert_eq!(target_names(mapping), vec!["NAME", "ID", "EMAIL"]);
    assert!(!mapping.is_complete());

    mapping
        .get_or_create_attribute_mapping(&c.id)
        .set_mapping_type(MappingType::Import);
    assert!(!mapping.is_complete());
    mapping
        .get_or_create_attribute_mapping(&c.name)
        .set_mapping_type(MappingType::Skip);
    assert!(!mapping.is_complete());
    mapping
        .get_or_create_attribute_mapping(&c.email)
        .set_mapping_type(MappingType::DefaultValue);
    assert!(mapping.is_complete());

    assert_eq!(target_names(mapping), vec!["NAME", "ID", "EMAIL"]);
}

#[test]
fn resetting_to_none_breaks_completeness() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping
        .get_or_create_attribute_mapping(&c.id)
        .set_mapping_type(MappingType::Import);
    assert!(mapping.is_complete());

    mapping
        .get_or_create_attribute_mapping(&c.id)
        .set_mapping_type(MappingType::None);
    assert!(!mapping.is_complete());
}

#[test]
fn lookup_matches_by_name_not_identity() {
    let c = customers();
    let refreshed = customers();
    assert!(!Arc::ptr_eq(&c.email, &refreshed.email));

    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    {
        let email = mapping.get_or_create_attribute_mapping(&c.email);
        email.set_mapping_type(MappingType::Import);
        email.set_source_attribute_name(Some("mail".to_string()));
        email.set_source_attribute_index(Some(4));
    }

    let again = mapping.get_or_create_attribute_mapping(&refreshed.email);
    assert_eq!(again.mapping_type(), MappingType::Import);
    assert_eq!(again.source_attribute_name(), Some("mail"));
    assert_eq!(again.source_attribute_index(), Some(4));
    // The entry keeps the attribute object it was created with.
    assert!(again.references(&c.email));
    assert_eq!(mapping.attribute_mappings().len(), 1);
}

#[test]
fn name_matching_is_case_sensitive() {
    let c = customers();
    let lowercase = TableEntity::new("CUSTOMERS")
        .unwrap()
        .with_column_names(["email"])
        .unwrap()
        .attributes()
        .remove(0);

    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping.get_or_create_attribute_mapping(&c.email);
    mapping.get_or_create_attribute_mapping(&lowercase);
    assert_eq!(target_names(&mapping), vec!["EMAIL", "email"]);
}

#[test]
fn default_value_survives_type_switches() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    let email = mapping.get_or_create_attribute_mapping(&c.email);
    email.set_mapping_type(MappingType::DefaultValue);
    email.set_default_value(Some("n/a".to_string()));

    email.set_mapping_type(MappingType::Skip);
    assert_eq!(email.default_value(), Some("n/a"));

    email.set_mapping_type(MappingType::DefaultValue);
    assert_eq!(email.default_value(), Some("n/a"));
}

#[test]
fn stale_fields_are_kept_across_every_transition() {
    // Transitions are unconstrained and never clear fields belonging to
    // another mapping type. Downstream code relies on ignoring them.
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    let id = mapping.get_or_create_attribute_mapping(&c.id);
    id.import_from(&SourceField {
        name: "customer_id".to_string(),
        index: 0,
    });
    id.set_default_value(Some("0".to_string()));

    for from in MappingType::ALL {
        for to in MappingType::ALL {
            id.set_mapping_type(from);
            id.set_mapping_type(to);
            assert_eq!(id.mapping_type(), to);
            assert_eq!(id.source_attribute_name(), Some("customer_id"));
            assert_eq!(id.source_attribute_index(), Some(0));
            assert_eq!(id.default_value(), Some("0"));
        }
    }
}

#[test]
fn skip_flag_does_not_affect_completeness() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping.get_or_create_attribute_mapping(&c.id).set_skip(true);
    assert!(!mapping.is_complete());

    let id = mapping.get_or_create_attribute_mapping(&c.id);
    id.set_skip(false);
    id.set_mapping_type(MappingType::Skip);
    assert!(mapping.is_complete());
}

#[test]
fn renamed_mapping_is_matched_by_its_new_name() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping
        .get_or_create_attribute_mapping(&c.name)
        .set_target_attribute_name("FULL_NAME");

    assert!(mapping.attribute_mapping("NAME").is_none());
    assert!(mapping.attribute_mapping("FULL_NAME").is_some());

    // Requesting NAME again creates a fresh entry.
    mapping.get_or_create_attribute_mapping(&c.name);
    assert_eq!(target_names(&mapping), vec!["FULL_NAME", "NAME"]);
}

#[test]
fn in_place_rename_can_shadow_another_entry() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping.get_or_create_attribute_mapping(&c.id);
    mapping
        .get_or_create_attribute_mapping(&c.name)
        .set_mapping_type(MappingType::Skip);

    mapping.attribute_mappings_mut()[1].set_target_attribute_name("ID");
    assert_eq!(target_names(&mapping), vec!["ID", "ID"]);

    // Lookups and get-or-create resolve to the first entry.
    let first = mapping.get_or_create_attribute_mapping(&c.id);
    assert_eq!(first.mapping_type(), MappingType::None);
    assert!(first.references(&c.id));
    assert_eq!(mapping.attribute_mappings().len(), 2);
}

#[test]
fn set_attribute_mappings_drops_duplicates() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);

    let mut first = AttributeMapping::new(Arc::clone(&c.id));
    first.set_mapping_type(MappingType::Import);
    let duplicate = AttributeMapping::new(Arc::clone(&c.id));
    let email = AttributeMapping::new(Arc::clone(&c.email));

    mapping.set_attribute_mappings(vec![first, duplicate, email]);
    assert_eq!(target_names(&mapping), vec!["ID", "EMAIL"]);
    assert_eq!(
        mapping.attribute_mapping("ID").map(AttributeMapping::mapping_type),
        Some(MappingType::Import)
    );
}

#[test]
fn attribute_mappings_mut_edits_in_place() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping.get_or_create_attribute_mapping(&c.id);
    mapping.get_or_create_attribute_mapping(&c.name);

    for entry in mapping.attribute_mappings_mut() {
        entry.set_mapping_type(MappingType::Skip);
    }
    assert!(mapping.is_complete());

    mapping
        .attribute_mapping_mut("NAME")
        .unwrap()
        .set_mapping_type(MappingType::None);
    assert!(!mapping.is_complete());
}

#[test]
fn summary_counts_types_and_unresolved_imports() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping
        .get_or_create_attribute_mapping(&c.id)
        .set_mapping_type(MappingType::Import);
    mapping
        .get_or_create_attribute_mapping(&c.name)
        .set_mapping_type(MappingType::DefaultValue);
    mapping.get_or_create_attribute_mapping(&c.email);

    let summary = mapping.summary();
    assert_eq!(
        summary,
        MappingSummary {
            total: 3,
            unmapped: 1,
            imported: 1,
            defaulted: 1,
            skipped: 0,
            unresolved_imports: 1,
        }
    );
    assert!(!summary.is_complete());

    let unresolved: Vec<&str> = mapping
        .unresolved_imports()
        .map(AttributeMapping::target_attribute_name)
        .collect();
    assert_eq!(unresolved, vec!["ID"]);
}

#[test]
fn auto_bind_resolves_unmapped_entries() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping.get_or_create_attribute_mapping(&c.id);
    mapping.get_or_create_attribute_mapping(&c.name);
    mapping.get_or_create_attribute_mapping(&c.email);

    let sources = SourceFields::new(["email", "id", "phone"]);
    let bound = mapping.auto_bind(&sources, AutoBindOptions::default());
    assert_eq!(bound, 2);

    let id = mapping.attribute_mapping("ID").unwrap();
    assert_eq!(id.mapping_type(), MappingType::Import);
    assert_eq!(id.source_attribute_name(), Some("id"));
    assert_eq!(id.source_attribute_index(), Some(1));

    let email = mapping.attribute_mapping("EMAIL").unwrap();
    assert_eq!(email.source_attribute_index(), Some(0));

    let name = mapping.attribute_mapping("NAME").unwrap();
    assert_eq!(name.mapping_type(), MappingType::None);
    assert!(!mapping.is_complete());
}

#[test]
fn auto_bind_leaves_resolved_entries_alone() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping
        .get_or_create_attribute_mapping(&c.id)
        .set_mapping_type(MappingType::Skip);
    mapping.get_or_create_attribute_mapping(&c.email);

    let sources = SourceFields::new(["ID", "EMAIL"]);
    assert_eq!(mapping.auto_bind(&sources, AutoBindOptions::exact()), 1);

    let id = mapping.attribute_mapping("ID").unwrap();
    assert_eq!(id.mapping_type(), MappingType::Skip);
    assert_eq!(id.source_attribute_index(), None);
}

#[test]
fn auto_bind_does_not_reuse_imported_source() {
    let c = customers();
    let mut mapping = EntityMapping::new(c.entity, &QuotedNaming);
    mapping
        .get_or_create_attribute_mapping(&c.name)
        .import_from(&SourceField {
            name: "EMAIL".to_string(),
            index: 0,
        });
    mapping.get_or_create_attribute_mapping(&c.email);

    let sources = SourceFields::new(["EMAIL"]);
    assert_eq!(mapping.auto_bind(&sources, AutoBindOptions::default()), 0);
    assert_eq!(
        mapping.attribute_mapping("EMAIL").map(AttributeMapping::mapping_type),
        Some(MappingType::None)
    );
}
