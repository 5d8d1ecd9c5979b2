pub mod error;
pub mod metadata;
pub mod naming;
pub mod source;
pub mod table;

pub use error::{ModelError, Result};
pub use metadata::{AttributeRef, Entity, EntityAttribute, EntityRef};
pub use naming::{EvaluationContext, NamingService, QuotedNaming, quote_identifier};
pub use source::{SourceField, SourceFields, normalize_name};
pub use table::{TableColumn, TableEntity};
