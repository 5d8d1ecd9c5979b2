//! Concrete table metadata.
//!
//! Used by the CLI and tests where no live database connection exists. Any
//! other metadata provider only needs to implement [`Entity`] and
//! [`EntityAttribute`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::metadata::{AttributeRef, Entity, EntityAttribute, EntityRef};

/// A column of a [`TableEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    name: String,
    ordinal_position: usize,
}

impl TableColumn {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidAttributeName(name));
        }
        Ok(Self {
            name: trimmed.to_string(),
            ordinal_position: 0,
        })
    }

    pub fn ordinal_position(&self) -> usize {
        self.ordinal_position
    }
}

impl EntityAttribute for TableColumn {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A table with an optional container path (catalog, schema).
#[derive(Debug, Clone)]
pub struct TableEntity {
    path: Vec<String>,
    name: String,
    columns: Vec<Arc<TableColumn>>,
}

impl TableEntity {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidEntityName(name));
        }
        Ok(Self {
            path: Vec::new(),
            name: trimmed.to_string(),
            columns: Vec::new(),
        })
    }

    /// Parses a dot-separated path such as `PUBLIC.CUSTOMERS`.
    ///
    /// The last segment is the table name, everything before it is the
    /// container path.
    pub fn parse_path(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('.').map(str::trim).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ModelError::InvalidEntityPath(path.to_string()));
        }
        let Some((name, containers)) = segments.split_last() else {
            return Err(ModelError::InvalidEntityPath(path.to_string()));
        };
        let mut table = Self::new(*name)?;
        table.path = containers.iter().map(|s| (*s).to_string()).collect();
        Ok(table)
    }

    #[must_use]
    pub fn with_container(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    /// Appends a column, assigning it the next ordinal position.
    #[must_use]
    pub fn with_column(mut self, mut column: TableColumn) -> Self {
        column.ordinal_position = self.columns.len();
        self.columns.push(Arc::new(column));
        self
    }

    pub fn with_column_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.with_column(TableColumn::new(name)?);
        }
        Ok(self)
    }

    pub fn columns(&self) -> &[Arc<TableColumn>] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Arc<TableColumn>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Columns as type-erased attribute handles sharing the same allocations.
    pub fn attributes(&self) -> Vec<AttributeRef> {
        self.columns
            .iter()
            .map(|c| Arc::clone(c) as AttributeRef)
            .collect()
    }

    pub fn into_ref(self) -> EntityRef {
        Arc::new(self)
    }
}

impl Entity for TableEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn container_path(&self) -> &[String] {
        &self.path
    }
}
