//! Machine-readable report.

use anyhow::{Context, Result};
use cde_ingest::Delimiter;
use cde_model::{FillSummary, Issue, ValidationReport};
use serde::Serialize;

use crate::common::ReportContext;

#[derive(Serialize)]
struct JsonReport<'a> {
    table: &'a str,
    cde_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cde_sha256: Option<&'a str>,
    delimiter: Delimiter,
    clean: bool,
    errors: usize,
    warnings: usize,
    issues: &'a [Issue],
    filled: &'a [FillSummary],
}

/// Pretty-printed JSON document for one report.
pub fn render_json(report: &ValidationReport, context: &ReportContext) -> Result<String> {
    let document = JsonReport {
        table: &report.table,
        cde_version: &context.cde_version,
        cde_sha256: context.cde_sha256.as_deref(),
        delimiter: context.delimiter,
        clean: report.is_clean(),
        errors: report.error_count(),
        warnings: report.warning_count(),
        issues: &report.issues,
        filled: &report.filled,
    };
    serde_json::to_string_pretty(&document)
        .with_context(|| format!("serialize report for {}", report.table))
}
