//! One table from bytes to report.

use cde_ingest::{Delimiter, IngestError, ingest_bytes};
use cde_model::{RawTable, TableSchema, ValidationPolicy, ValidationReport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::column::validate_table;
use crate::error::EngineError;
use crate::missing::{FillChoices, MissingResolution, apply_fill_choices, resolve};
use crate::report::{build, release_sanitized, sanitize};

/// Caller-supplied inputs besides the table and its schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub policy: ValidationPolicy,
    pub fill_choices: FillChoices,
}

/// Everything produced by a validated table.
#[derive(Debug, Clone)]
pub struct TableRun {
    pub report: ValidationReport,
    /// Present only when the report has no errors.
    pub sanitized: Option<RawTable>,
    pub delimiter: Delimiter,
    pub encoding: &'static str,
    pub helper_rows_stripped: bool,
    pub warnings: Vec<String>,
    pub missing: MissingResolution,
}

impl TableRun {
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }
}

/// Outcome of a table run that did not fail.
#[derive(Debug, Clone)]
pub enum TableOutcome {
    /// Header-only table; nothing to validate.
    Skipped { table: String, reason: String },
    Validated(Box<TableRun>),
}

impl TableOutcome {
    pub fn table(&self) -> &str {
        match self {
            TableOutcome::Skipped { table, .. } => table,
            TableOutcome::Validated(run) => &run.report.table,
        }
    }
}

/// Decode, load, resolve, validate and report one table.
pub fn run_table(
    table_name: &str,
    bytes: &[u8],
    schema: &TableSchema,
    options: &EngineOptions,
) -> Result<TableOutcome, EngineError> {
    let loaded = match ingest_bytes(table_name, bytes) {
        Ok(loaded) => loaded,
        Err(error @ IngestError::EmptyTable { .. }) => {
            info!(table = %table_name, "skipping table without data rows");
            return Ok(TableOutcome::Skipped {
                table: table_name.to_string(),
                reason: error.to_string(),
            });
        }
        Err(error) => return Err(error.into()),
    };

    let mut missing = resolve(loaded.table, schema);
    apply_fill_choices(&mut missing, &options.fill_choices).map_err(|source| {
        EngineError::Validate {
            table: table_name.to_string(),
            source,
        }
    })?;

    let issues = validate_table(schema, &missing.table, &options.policy);
    let report = build(table_name, issues, &missing.records);
    let sanitized = release_sanitized(&report, sanitize(&missing.table, schema));
    info!(
        table = %table_name,
        errors = report.error_count(),
        warnings = report.warning_count(),
        filled = report.filled_cell_count(),
        "validated table"
    );

    Ok(TableOutcome::Validated(Box::new(TableRun {
        report,
        sanitized,
        delimiter: loaded.delimiter,
        encoding: loaded.encoding,
        helper_rows_stripped: loaded.helper_rows_stripped,
        warnings: loaded.warnings,
        missing,
    })))
}
