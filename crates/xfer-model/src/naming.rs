//! Fully-qualified object naming.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::Entity;

/// Where a rendered name is going to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationContext {
    /// Data manipulation statements (INSERT, SELECT).
    Dml,
    /// Data definition statements (CREATE, ALTER).
    Ddl,
    /// Human-facing labels.
    Ui,
}

/// Renders fully-qualified entity names.
///
/// The DML rendering doubles as the identity key of an entity within a
/// transfer session, so implementations must be deterministic: two entity
/// objects describing the same table must render identically.
pub trait NamingService: fmt::Debug + Send + Sync {
    fn full_name(&self, entity: &dyn Entity, context: EvaluationContext) -> String;
}

/// Default naming: dot-joined path, double-quoted for SQL contexts.
///
/// `PUBLIC` / `CUSTOMERS` renders as `"PUBLIC"."CUSTOMERS"` for
/// [`EvaluationContext::Dml`] and as `PUBLIC.CUSTOMERS` for
/// [`EvaluationContext::Ui`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedNaming;

impl NamingService for QuotedNaming {
    fn full_name(&self, entity: &dyn Entity, context: EvaluationContext) -> String {
        entity
            .container_path()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(entity.name()))
            .map(|segment| match context {
                EvaluationContext::Dml | EvaluationContext::Ddl => quote_identifier(segment),
                EvaluationContext::Ui => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Wraps an identifier in double quotes, doubling embedded quotes.
pub fn quote_identifier(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}
