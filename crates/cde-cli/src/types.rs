use std::path::PathBuf;

use cde_ingest::Delimiter;
use cde_model::DatasetConfig;

#[derive(Debug)]
pub struct ValidateResult {
    pub config: DatasetConfig,
    pub source_sha256: String,
    pub output_dir: PathBuf,
    pub tables: Vec<TableSummary>,
    /// Expected tables with no uploaded file.
    pub missing_tables: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Passed,
    Failed,
    Skipped(String),
    /// The table could not be validated at all.
    Error(String),
}

impl TableStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, TableStatus::Failed | TableStatus::Error(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableOutputs {
    pub report: Option<PathBuf>,
    pub comments: Option<PathBuf>,
    pub sanitized: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table: String,
    pub file: PathBuf,
    pub status: TableStatus,
    pub rows: usize,
    pub delimiter: Option<Delimiter>,
    pub errors: usize,
    pub warnings: usize,
    pub filled: usize,
    /// Columns whose filled cells still wait for a `--fill` choice.
    pub pending_fill: Vec<String>,
    pub outputs: TableOutputs,
}

impl TableSummary {
    pub(crate) fn new(table: impl Into<String>, file: PathBuf, status: TableStatus) -> Self {
        Self {
            table: table.into(),
            file,
            status,
            rows: 0,
            delimiter: None,
            errors: 0,
            warnings: 0,
            filled: 0,
            pending_fill: Vec::new(),
            outputs: TableOutputs::default(),
        }
    }
}
