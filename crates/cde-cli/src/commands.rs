use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cde_cli::inputs::{CommentBook, FillPlan};
use cde_cli::pipeline::{ValidateRequest, validate_files};
use cde_cli::template::render_template;
use cde_cli::types::ValidateResult;
use cde_model::{Severity, ValidationPolicy};
use cde_standards::{CdeRegistry, SchemaSet, default_standards_root, load_registry};
use comfy_table::Table;
use tracing::{info, info_span};

use crate::cli::{SelectionArgs, SeverityArg, StandardsArgs, TemplateArgs, ValidateArgs};
use crate::summary::apply_table_style;

const DEFAULT_OUTPUT_DIR: &str = "qc";

fn load_standards(args: &StandardsArgs) -> Result<CdeRegistry> {
    let root = args
        .standards_dir
        .clone()
        .unwrap_or_else(default_standards_root);
    load_registry(&root).with_context(|| format!("load CDE standards from {}", root.display()))
}

fn resolve_selection(selection: &SelectionArgs) -> Result<SchemaSet> {
    let registry = load_standards(&selection.standards)?;
    let version = match &selection.cde_version {
        Some(version) => version.clone(),
        None => registry
            .latest_version()
            .context("no CDE versions registered")?
            .to_string(),
    };
    registry
        .resolve(&selection.species, &selection.tissue, &selection.modality, &version)
        .context("resolve dataset configuration")
}

fn severity(arg: SeverityArg) -> Severity {
    match arg {
        SeverityArg::Warning => Severity::Warning,
        SeverityArg::Error => Severity::Error,
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let schemas = resolve_selection(&args.selection)?;
    let span = info_span!("validate", cde_version = %schemas.config.cde_version);
    let _guard = span.enter();

    let comments = match &args.comments {
        Some(path) => CommentBook::load(path)?,
        None => CommentBook::default(),
    };
    let request = ValidateRequest {
        files: args.files.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        policy: ValidationPolicy {
            unexpected_column: severity(args.unexpected_columns),
            optional_invalid: severity(args.optional_invalid),
        },
        fill: FillPlan::parse(&args.fill)?,
        comments,
        write_json: args.json,
    };
    info!(files = request.files.len(), "validating tables");
    validate_files(&schemas, &request)
}

pub fn run_tables(args: &SelectionArgs) -> Result<()> {
    let schemas = resolve_selection(args)?;
    println!(
        "{} / {} / {} (CDE {})",
        schemas.config.species, schemas.config.tissue, schemas.config.modality, schemas.config.cde_version
    );
    let mut table = Table::new();
    table.set_header(vec!["Table", "Columns", "Required", "Optional"]);
    apply_table_style(&mut table);
    for schema in &schemas.tables {
        let required = schema.required_columns().count();
        table.add_row(vec![
            schema.name.clone(),
            schema.columns.len().to_string(),
            required.to_string(),
            (schema.columns.len() - required).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<Vec<PathBuf>> {
    let schemas = resolve_selection(&args.selection)?;
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output directory {}", args.output_dir.display()))?;
    let mut written = Vec::with_capacity(schemas.tables.len());
    for schema in &schemas.tables {
        let path = args.output_dir.join(format!("{}.csv", schema.name));
        let contents = render_template(schema)?;
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub fn run_versions(args: &StandardsArgs) -> Result<()> {
    let registry = load_standards(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Version", "Tables", "Source SHA-256"]);
    apply_table_style(&mut table);
    for version in registry.versions() {
        let Some(release) = registry.release(version) else {
            continue;
        };
        let tables: BTreeSet<&str> = release.rows.iter().map(|row| row.table.as_str()).collect();
        table.add_row(vec![
            release.version.clone(),
            tables.len().to_string(),
            release.source_sha256.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
