//! Delimited text to [`RawTable`].

use std::collections::BTreeSet;

use cde_model::{DataType, RawTable};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::sniff::Delimiter;

/// Rows below the header in a downloaded template: description, data type,
/// required flag, validation rule and fill values.
pub const HELPER_ROW_COUNT: usize = 5;

/// Header names pandas-style exports give a leading index column.
const INDEX_COLUMN_NAMES: &[&str] = &["", "Unnamed: 0"];

const REQUIRED_FLAGS: &[&str] = &["Required", "Optional", "Assigned", "Alias"];

/// Parsed table plus what the loader removed.
#[derive(Debug, Clone)]
pub struct LoadedRows {
    pub table: RawTable,
    pub helper_rows_stripped: bool,
    pub dropped_index_column: bool,
}

/// Parse decoded text with a known delimiter.
///
/// Blank rows are skipped. Cells are kept verbatim; only header names are
/// trimmed.
pub fn load(table_name: &str, text: &str, delimiter: Delimiter) -> Result<LoadedRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Csv {
            table: table_name.to_string(),
            message: e.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(expected) = header.as_ref().map(Vec::len) else {
            header = Some(
                record
                    .iter()
                    .map(|value| value.trim_matches('\u{feff}').trim().to_string())
                    .collect(),
            );
            continue;
        };
        if record.len() != expected {
            return Err(IngestError::StructureMismatch {
                table: table_name.to_string(),
                line: record.position().map_or(0, csv::Position::line),
                expected,
                found: record.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let Some(mut header) = header else {
        return Err(IngestError::EmptyTable {
            table: table_name.to_string(),
        });
    };

    let dropped_index_column =
        header.len() > 1 && INDEX_COLUMN_NAMES.contains(&header[0].as_str());
    if dropped_index_column {
        header.remove(0);
        for row in &mut rows {
            row.remove(0);
        }
    }
    check_header(table_name, &header)?;

    let helper_rows_stripped = has_helper_rows(&rows);
    if helper_rows_stripped {
        let count = HELPER_ROW_COUNT.min(rows.len());
        rows.drain(..count);
        debug!(table = %table_name, rows = count, "stripped template helper rows");
    }
    if rows.is_empty() {
        return Err(IngestError::EmptyTable {
            table: table_name.to_string(),
        });
    }

    let table = RawTable::from_rows(header, rows).map_err(|e| IngestError::Csv {
        table: table_name.to_string(),
        message: e.to_string(),
    })?;
    debug!(
        table = %table_name,
        rows = table.row_count(),
        columns = table.column_count(),
        delimiter = %delimiter,
        "loaded table"
    );
    Ok(LoadedRows {
        table,
        helper_rows_stripped,
        dropped_index_column,
    })
}

fn check_header(table_name: &str, header: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (idx, name) in header.iter().enumerate() {
        if name.is_empty() {
            return Err(IngestError::EmptyColumnName {
                table: table_name.to_string(),
                position: idx + 1,
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(IngestError::DuplicateColumn {
                table: table_name.to_string(),
                column: name.clone(),
            });
        }
    }
    Ok(())
}

/// Template signature: the second row holds data type names and the third
/// holds required flags.
fn has_helper_rows(rows: &[Vec<String>]) -> bool {
    let (Some(types), Some(flags)) = (rows.get(1), rows.get(2)) else {
        return false;
    };
    row_matches(types, is_data_type_cell) && row_matches(flags, |cell| REQUIRED_FLAGS.contains(&cell))
}

fn row_matches(row: &[String], predicate: impl Fn(&str) -> bool) -> bool {
    let mut cells = row
        .iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .peekable();
    cells.peek().is_some() && cells.all(predicate)
}

fn is_data_type_cell(cell: &str) -> bool {
    let name = cell.strip_prefix("Validation:").unwrap_or(cell);
    name.parse::<DataType>().is_ok()
}
