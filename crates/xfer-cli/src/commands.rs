use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use xfer_cli::plan::{Plan, PlanRequest, build_plan, parse_default, read_source_header};
use xfer_map::{AutoBindOptions, MappingType};

use crate::cli::PlanArgs;
use crate::summary::apply_table_style;

pub fn run_types() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Description", "Resolved"]);
    apply_table_style(&mut table);
    for mapping_type in MappingType::ALL {
        let resolved = if mapping_type.is_resolved() { "yes" } else { "no" };
        table.add_row(vec![
            mapping_type.title(),
            type_description(mapping_type),
            resolved,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_plan(args: &PlanArgs) -> Result<Plan> {
    let span = info_span!("plan", entity = %args.entity);
    let _guard = span.enter();

    let sources = match &args.source_header {
        Some(path) => read_source_header(path, delimiter_byte(args.delimiter)?)?,
        None => args.sources.clone(),
    };
    let defaults = args
        .defaults
        .iter()
        .map(|raw| parse_default(raw))
        .collect::<Result<Vec<_>>>()
        .context("parse --default values")?;
    let bind_options = AutoBindOptions::default()
        .with_case_insensitive(!args.exact_case)
        .with_ignore_separators(args.ignore_separators);

    let request = PlanRequest {
        entity_path: args.entity.clone(),
        targets: args.targets.clone(),
        sources,
        defaults,
        skips: args.skips.clone(),
        bind_options,
    };
    let plan = build_plan(&request)?;
    info!(complete = plan.is_complete(), "plan ready");
    Ok(plan)
}

fn type_description(mapping_type: MappingType) -> &'static str {
    match mapping_type {
        MappingType::None => "Not decided yet; blocks the transfer",
        MappingType::Import => "Copy the value of a source field",
        MappingType::DefaultValue => "Write a literal default value",
        MappingType::Skip => "Leave the column out of the transfer",
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter '{delimiter}' must be a single ASCII character");
    }
    Ok(delimiter as u8)
}
