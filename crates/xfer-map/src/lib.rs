//! Target attribute mapping for stream transfers.
//!
//! Tracks, per target entity, how each attribute is fed when rows from an
//! incoming stream are transferred: imported from a source field, filled
//! with a literal default, or skipped. The state is session-scoped and
//! purely in memory.
//!
//! # Example
//!
//! ```
//! use xfer_map::{MappingType, TransferMappingSet};
//! use xfer_model::TableEntity;
//!
//! let table = TableEntity::parse_path("PUBLIC.CUSTOMERS")
//!     .unwrap()
//!     .with_column_names(["ID", "NAME"])
//!     .unwrap();
//! let attributes = table.attributes();
//! let entity = table.into_ref();
//!
//! let mut set = TransferMappingSet::new();
//! let mapping = set.get_or_create_entity_mapping(&entity);
//! assert_eq!(mapping.entity_name(), "\"PUBLIC\".\"CUSTOMERS\"");
//!
//! mapping
//!     .get_or_create_attribute_mapping(&attributes[0])
//!     .set_mapping_type(MappingType::Skip);
//! assert!(mapping.is_complete());
//!
//! mapping.get_or_create_attribute_mapping(&attributes[1]);
//! assert!(!mapping.is_complete());
//! ```

mod attribute;
mod bind;
mod entity;
mod error;
mod set;
mod settings;
mod snapshot;
mod types;

pub use attribute::{AttributeMapping, UNRESOLVED_SOURCE_INDEX};
pub use bind::{AutoBindOptions, resolve_source};
pub use entity::{EntityMapping, MappingSummary};
pub use error::{MappingError, Result};
pub use set::TransferMappingSet;
pub use settings::{SettingsSection, TransferSettings};
pub use snapshot::{AttributeMappingRecord, EntityMappingSnapshot, ToSnapshot};
pub use types::MappingType;
