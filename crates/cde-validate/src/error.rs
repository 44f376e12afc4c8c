//! Error types for validation and engine runs.

use cde_ingest::IngestError;
use thiserror::Error;

/// Errors raised while applying reviewer input to a resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    /// The chosen fill value is not one of the column's candidates.
    #[error("column '{column}': '{value}' is not a fill value (expected one of: {})", candidates.join(", "))]
    InvalidFillChoice {
        column: String,
        value: String,
        candidates: Vec<String>,
    },

    /// A choice was given for a column whose missing cells have no candidates.
    #[error("column '{column}' declares no fill values")]
    NoFillCandidates { column: String },
}

/// Terminal failure of a table run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("table {table}: {source}")]
    Validate {
        table: String,
        #[source]
        source: ValidateError,
    },
}

impl EngineError {
    /// Table the failure belongs to, when known.
    pub fn table(&self) -> Option<&str> {
        match self {
            EngineError::Ingest(error) => error.table(),
            EngineError::Validate { table, .. } => Some(table),
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
