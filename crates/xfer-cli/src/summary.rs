use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xfer_cli::plan::Plan;
use xfer_map::{AttributeMapping, MappingType};

use crate::cli::PlanFormatArg;

pub fn print_plan(plan: &Plan, format: PlanFormatArg) -> Result<()> {
    match format {
        PlanFormatArg::Table => {
            print_plan_table(plan);
            Ok(())
        }
        PlanFormatArg::Json => {
            let json = serde_json::to_string_pretty(&plan.report()).context("serialize plan")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn print_plan_table(plan: &Plan) {
    println!("Entity: {}", plan.entity_name);
    println!("Source fields: {}", plan.source_count);
    let Some(mapping) = plan.mapping() else {
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Mapping"),
        header_cell("Source"),
        header_cell("Index"),
        header_cell("Default"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in mapping.attribute_mappings() {
        table.add_row(vec![
            Cell::new(entry.target_attribute_name()),
            mapping_type_cell(entry.mapping_type()),
            text_cell(entry.source_attribute_name()),
            index_cell(entry),
            text_cell(entry.default_value()),
        ]);
    }
    let summary = mapping.summary();
    let status = if summary.is_complete() {
        Cell::new("COMPLETE")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("INCOMPLETE")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    };
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        status,
        Cell::new(format!(
            "{} imported, {} default, {} skipped",
            summary.imported, summary.defaulted, summary.skipped
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(summary.unmapped, "unmapped"),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn mapping_type_cell(mapping_type: MappingType) -> Cell {
    let color = match mapping_type {
        MappingType::None => Color::Red,
        MappingType::Import => Color::Green,
        MappingType::DefaultValue => Color::Yellow,
        MappingType::Skip => Color::DarkGrey,
    };
    Cell::new(mapping_type.title()).fg(color)
}

fn index_cell(entry: &AttributeMapping) -> Cell {
    match entry.source_attribute_index() {
        Some(index) => Cell::new(index),
        None if entry.is_unresolved_import() => Cell::new("?").fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, label: &str) -> Cell {
    if count > 0 {
        Cell::new(format!("{count} {label}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(format!("{count} {label}"))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
