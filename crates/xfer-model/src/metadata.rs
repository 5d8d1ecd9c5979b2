//! Seams onto the database metadata subsystem.
//!
//! Entities and attributes are owned by whoever introspected the database.
//! Mapping code only ever reads their names, so both traits stay minimal.

use std::fmt;
use std::sync::Arc;

/// A target entity (table, view) that rows are transferred into.
pub trait Entity: fmt::Debug + Send + Sync {
    /// Unqualified entity name.
    fn name(&self) -> &str;

    /// Enclosing containers, outermost first (e.g. catalog, schema).
    fn container_path(&self) -> &[String] {
        &[]
    }
}

/// A single attribute (column) of a target entity.
pub trait EntityAttribute: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// Shared handle to an entity owned by the metadata subsystem.
pub type EntityRef = Arc<dyn Entity>;

/// Shared handle to an attribute owned by the metadata subsystem.
pub type AttributeRef = Arc<dyn EntityAttribute>;
