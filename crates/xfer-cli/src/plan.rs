//! Mapping plan construction for a single target table.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::{debug, info};
use xfer_map::{
    AttributeMappingRecord, AutoBindOptions, EntityMapping, MappingSummary, MappingType,
    ToSnapshot, TransferMappingSet,
};
use xfer_model::{SourceFields, TableEntity};

/// Everything needed to plan one table.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub entity_path: String,
    pub targets: Vec<String>,
    pub sources: Vec<String>,
    /// `(column, literal)` pairs.
    pub defaults: Vec<(String, String)>,
    pub skips: Vec<String>,
    pub bind_options: AutoBindOptions,
}

/// Result of planning: the session's mapping set plus the planned table key.
#[derive(Debug)]
pub struct Plan {
    pub set: TransferMappingSet,
    pub entity_name: String,
    pub source_count: usize,
}

/// Serializable view of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub entity: String,
    pub complete: bool,
    pub summary: MappingSummary,
    pub attributes: Vec<AttributeMappingRecord>,
}

impl Plan {
    pub fn mapping(&self) -> Option<&EntityMapping> {
        self.set.entity_mapping(&self.entity_name)
    }

    pub fn is_complete(&self) -> bool {
        self.set.is_complete()
    }

    pub fn report(&self) -> PlanReport {
        let (summary, attributes) = match self.mapping() {
            Some(mapping) => (mapping.summary(), mapping.to_snapshot().attributes),
            None => (MappingSummary::default(), Vec::new()),
        };
        PlanReport {
            entity: self.entity_name.clone(),
            complete: self.is_complete(),
            summary,
            attributes,
        }
    }
}

/// Build the plan.
///
/// Every target column gets an entry in table order. Explicit `--skip` and
/// `--default` choices are applied first; remaining columns are bound to
/// source fields by name.
pub fn build_plan(request: &PlanRequest) -> Result<Plan> {
    let table = TableEntity::parse_path(&request.entity_path)
        .with_context(|| format!("parse target entity '{}'", request.entity_path))?
        .with_column_names(request.targets.iter().cloned())
        .context("target columns")?;
    let attributes = table.attributes();
    let entity = table.into_ref();

    let mut set = TransferMappingSet::new();
    let mapping = set.get_or_create_entity_mapping(&entity);
    let entity_name = mapping.entity_name().to_string();
    for attribute in &attributes {
        mapping.get_or_create_attribute_mapping(attribute);
    }

    for column in &request.skips {
        mapping
            .attribute_mapping_mut(column)
            .ok_or_else(|| anyhow!("--skip names unknown target column '{column}'"))?
            .set_mapping_type(MappingType::Skip);
    }
    for (column, value) in &request.defaults {
        let entry = mapping
            .attribute_mapping_mut(column)
            .ok_or_else(|| anyhow!("--default names unknown target column '{column}'"))?;
        entry.set_mapping_type(MappingType::DefaultValue);
        entry.set_default_value(Some(value.clone()));
    }

    let sources = SourceFields::new(&request.sources);
    let bound = mapping.auto_bind(&sources, request.bind_options);
    info!(
        entity = %entity_name,
        targets = attributes.len(),
        sources = sources.len(),
        bound,
        complete = mapping.is_complete(),
        "planned attribute mappings"
    );

    Ok(Plan {
        set,
        entity_name,
        source_count: sources.len(),
    })
}

/// Parse a `COLUMN=VALUE` default. The value may be empty or contain `=`.
pub fn parse_default(raw: &str) -> Result<(String, String)> {
    let Some((column, value)) = raw.split_once('=') else {
        bail!("default '{raw}' is not of the form COLUMN=VALUE");
    };
    let column = column.trim();
    if column.is_empty() {
        bail!("default '{raw}' has an empty column name");
    }
    Ok((column.to_string(), value.to_string()))
}

/// Read only the header record of a delimited file.
pub fn read_source_header(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("open source header {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read header record of {}", path.display()))?;
    let fields: Vec<String> = headers.iter().map(str::to_string).collect();
    debug!(path = %path.display(), fields = fields.len(), "read source header");
    Ok(fields)
}
