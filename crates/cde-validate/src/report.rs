//! Report aggregation and sanitized-table release.

use cde_model::{
    FillSummary, Issue, MISSING_TOKEN, MissingCellRecord, RawTable, TableSchema, ValidationReport,
};

/// Assemble the report for one table.
///
/// Filled cells are summarised per column in record order.
pub fn build(table_name: &str, issues: Vec<Issue>, records: &[MissingCellRecord]) -> ValidationReport {
    let mut filled: Vec<FillSummary> = Vec::new();
    for record in records {
        match filled.last_mut() {
            Some(summary) if summary.column == record.column => summary.cells += 1,
            _ => filled.push(FillSummary {
                column: record.column.clone(),
                cells: 1,
                replacement: record.replacement.clone(),
                candidates: record.candidates.clone(),
                chosen: record.chosen,
            }),
        }
    }
    ValidationReport {
        table: table_name.to_string(),
        issues,
        filled,
    }
}

/// True when the report holds no Error issue.
pub fn is_clean(report: &ValidationReport) -> bool {
    report.is_clean()
}

/// Schema columns in schema order (absent ones filled with the missing
/// token), followed by the upload's other columns in file order.
pub fn sanitize(table: &RawTable, schema: &TableSchema) -> RawTable {
    let mut order: Vec<&str> = schema.column_names();
    order.extend(
        table
            .column_names()
            .iter()
            .map(String::as_str)
            .filter(|name| !schema.contains(name)),
    );
    table.project(&order, MISSING_TOKEN)
}

/// The sanitized table, released only for a clean report.
pub fn release_sanitized(report: &ValidationReport, table: RawTable) -> Option<RawTable> {
    is_clean(report).then_some(table)
}
