//! Validation of uploaded table files against a resolved schema set.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cde_ingest::table_name_from_path;
use cde_model::{TableSchema, ValidationPolicy};
use cde_report::{ReportContext, render_comments_csv, render_json, render_markdown, write_sanitized};
use cde_standards::SchemaSet;
use cde_validate::{EngineOptions, TableOutcome, TableRun, run_table};
use tracing::{info, info_span, warn};

use crate::inputs::{CommentBook, FillPlan};
use crate::types::{TableOutputs, TableStatus, TableSummary, ValidateResult};

const REPORT_SUFFIX: &str = ".md";
const COMMENTS_SUFFIX: &str = "_comments.csv";
const SANITIZED_SUFFIX: &str = "_sanitized.csv";
const JSON_SUFFIX: &str = ".json";
const ARTIFACT_SUFFIXES: [&str; 4] = [REPORT_SUFFIX, COMMENTS_SUFFIX, SANITIZED_SUFFIX, JSON_SUFFIX];

/// Everything needed to validate a batch of files.
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub policy: ValidationPolicy,
    pub fill: FillPlan,
    pub comments: CommentBook,
    pub write_json: bool,
}

/// Validate every file and write its artifacts into the output directory.
///
/// Table-level failures are recorded in the result; only output I/O errors
/// abort the batch.
pub fn validate_files(schemas: &SchemaSet, request: &ValidateRequest) -> Result<ValidateResult> {
    fs::create_dir_all(&request.output_dir).with_context(|| {
        format!("create output directory {}", request.output_dir.display())
    })?;

    let mut tables = Vec::with_capacity(request.files.len());
    for file in &request.files {
        tables.push(validate_file(schemas, request, file)?);
    }

    let missing_tables: Vec<String> = schemas
        .table_names()
        .into_iter()
        .filter(|expected| !tables.iter().any(|summary| summary.table == *expected))
        .map(str::to_string)
        .collect();
    if !missing_tables.is_empty() {
        info!(tables = ?missing_tables, "expected tables without an uploaded file");
    }

    let has_errors = tables.iter().any(|summary| summary.status.is_failure());
    Ok(ValidateResult {
        config: schemas.config.clone(),
        source_sha256: schemas.source_sha256.clone(),
        output_dir: request.output_dir.clone(),
        tables,
        missing_tables,
        has_errors,
    })
}

fn validate_file(schemas: &SchemaSet, request: &ValidateRequest, file: &Path) -> Result<TableSummary> {
    let name = table_name_from_path(file);
    let span = info_span!("table", table = %name);
    let _guard = span.enter();

    let Some(schema) = schemas.schema(&name) else {
        warn!(file = %file.display(), "not an expected table for this dataset");
        let reason = format!(
            "{name} is not an expected table for {} / {} / {}",
            schemas.config.species, schemas.config.tissue, schemas.config.modality
        );
        return Ok(TableSummary::new(name, file.to_path_buf(), TableStatus::Error(reason)));
    };
    let bytes = match fs::read(file) {
        Ok(bytes) => bytes,
        Err(error) => {
            clear_outputs(&request.output_dir, &schema.name)?;
            let reason = format!("failed to read {}: {error}", file.display());
            return Ok(TableSummary::new(&schema.name, file.to_path_buf(), TableStatus::Error(reason)));
        }
    };

    let options = EngineOptions {
        policy: request.policy,
        fill_choices: request.fill.for_table(&schema),
    };
    match run_table(&schema.name, &bytes, &schema, &options) {
        Ok(TableOutcome::Skipped { reason, .. }) => {
            clear_outputs(&request.output_dir, &schema.name)?;
            Ok(TableSummary::new(
                &schema.name,
                file.to_path_buf(),
                TableStatus::Skipped(reason),
            ))
        }
        Ok(TableOutcome::Validated(run)) => {
            for note in &run.warnings {
                warn!(file = %file.display(), "{note}");
            }
            let outputs = write_outputs(schemas, request, &schema, &run)?;
            let status = if run.is_clean() {
                TableStatus::Passed
            } else {
                TableStatus::Failed
            };
            let mut summary = TableSummary::new(&schema.name, file.to_path_buf(), status);
            summary.rows = run.missing.table.row_count();
            summary.delimiter = Some(run.delimiter);
            summary.errors = run.report.error_count();
            summary.warnings = run.report.warning_count();
            summary.filled = run.report.filled_cell_count();
            summary.pending_fill = run
                .missing
                .pending_columns()
                .into_iter()
                .map(str::to_string)
                .collect();
            summary.outputs = outputs;
            Ok(summary)
        }
        Err(error) => {
            clear_outputs(&request.output_dir, &schema.name)?;
            Ok(TableSummary::new(
                &schema.name,
                file.to_path_buf(),
                TableStatus::Error(error.to_string()),
            ))
        }
    }
}

fn write_outputs(
    schemas: &SchemaSet,
    request: &ValidateRequest,
    schema: &TableSchema,
    run: &TableRun,
) -> Result<TableOutputs> {
    let dir = &request.output_dir;
    let table = &schema.name;
    let context = ReportContext::new(&schemas.config.cde_version, run.delimiter)
        .with_sha256(&schemas.source_sha256);
    let mut outputs = TableOutputs::default();

    let report_path = artifact_path(dir, table, REPORT_SUFFIX);
    write_text(&report_path, &render_markdown(&run.report, &context))?;
    outputs.report = Some(report_path);

    let comments_path = artifact_path(dir, table, COMMENTS_SUFFIX);
    let comments = request.comments.for_table(table);
    match render_comments_csv(&run.report, &comments)? {
        Some(csv) => {
            write_text(&comments_path, &csv)?;
            outputs.comments = Some(comments_path);
        }
        None => remove_stale(&comments_path)?,
    }

    let sanitized_path = artifact_path(dir, table, SANITIZED_SUFFIX);
    match &run.sanitized {
        Some(sanitized) => {
            let file = File::create(&sanitized_path)
                .with_context(|| format!("create {}", sanitized_path.display()))?;
            write_sanitized(BufWriter::new(file), sanitized, run.delimiter)
                .with_context(|| format!("write {}", sanitized_path.display()))?;
            outputs.sanitized = Some(sanitized_path);
        }
        None => remove_stale(&sanitized_path)?,
    }

    let json_path = artifact_path(dir, table, JSON_SUFFIX);
    if request.write_json {
        write_text(&json_path, &render_json(&run.report, &context)?)?;
        outputs.json = Some(json_path);
    } else {
        remove_stale(&json_path)?;
    }
    Ok(outputs)
}

fn artifact_path(dir: &Path, table: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{table}{suffix}"))
}

/// Remove every artifact of a table that produced no report this run.
fn clear_outputs(dir: &Path, table: &str) -> Result<()> {
    for suffix in ARTIFACT_SUFFIXES {
        remove_stale(&artifact_path(dir, table, suffix))?;
    }
    Ok(())
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("remove stale {}", path.display()))?;
    }
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
