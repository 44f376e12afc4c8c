use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cde_cli::types::{TableStatus, TableSummary, ValidateResult};

pub fn print_summary(result: &ValidateResult) {
    let config = &result.config;
    println!(
        "Dataset: {} / {} / {}",
        config.species, config.tissue, config.modality
    );
    println!("CDE: {} ({})", config.cde_version, result.source_sha256);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Delimiter"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Filled"),
        header_cell("Sanitized"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Center);

    let mut total_rows = 0usize;
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for summary in &result.tables {
        total_rows += summary.rows;
        total_errors += summary.errors;
        total_warnings += summary.warnings;
        table.add_row(vec![
            Cell::new(&summary.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(&summary.status),
            Cell::new(summary.rows),
            match summary.delimiter {
                Some(delimiter) => Cell::new(delimiter.name()),
                None => dim_cell("-"),
            },
            count_cell(summary.errors, Color::Red),
            count_cell(summary.warnings, Color::Yellow),
            count_cell(summary.filled, Color::Magenta),
            released_cell(summary),
        ]);
    }
    for missing in &result.missing_tables {
        table.add_row(vec![
            dim_cell(missing),
            dim_cell("not provided"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total_errors, Color::Red).add_attribute(Attribute::Bold),
        count_cell(total_warnings, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_notes(result);
}

fn print_notes(result: &ValidateResult) {
    for summary in &result.tables {
        match &summary.status {
            TableStatus::Skipped(reason) => println!("{}: skipped, {reason}", summary.table),
            TableStatus::Error(reason) => eprintln!("error: {reason}"),
            TableStatus::Passed | TableStatus::Failed => {}
        }
        if !summary.pending_fill.is_empty() {
            println!(
                "{}: missing cells in {} were filled with NA; pass --fill {}.COLUMN=VALUE to choose",
                summary.table,
                summary.pending_fill.join(", "),
                summary.table
            );
        }
        if let Some(report) = &summary.outputs.report {
            println!("{}: report written to {}", summary.table, report.display());
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: &TableStatus) -> Cell {
    match status {
        TableStatus::Passed => Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        TableStatus::Failed => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        TableStatus::Skipped(_) => Cell::new("SKIP").fg(Color::Yellow),
        TableStatus::Error(_) => Cell::new("ERROR").fg(Color::Red),
    }
}

fn released_cell(summary: &TableSummary) -> Cell {
    match &summary.outputs.sanitized {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
