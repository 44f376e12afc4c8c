//! Error types for table ingestion.
//!
//! Every variant is terminal for the table it names.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning uploaded bytes into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Bytes are not text in a supported encoding.
    #[error("table {table}: unreadable encoding ({reason})")]
    UnreadableEncoding { table: String, reason: String },

    // === Structure Errors ===
    /// The header splits, but no candidate delimiter agrees with most rows.
    #[error("table {table}: could not determine the field delimiter")]
    UnparsableDelimiter { table: String },

    /// Header row present but no data rows.
    #[error("table {table}: header row found but no data rows")]
    EmptyTable { table: String },

    /// A row has a different field count than the header.
    #[error("table {table}: line {line} has {found} fields, expected {expected}")]
    StructureMismatch {
        table: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A header cell is blank.
    #[error("table {table}: column {position} has an empty name")]
    EmptyColumnName { table: String, position: usize },

    /// Two header cells share a name.
    #[error("table {table}: duplicate column '{column}'")]
    DuplicateColumn { table: String, column: String },

    /// The CSV reader rejected the input.
    #[error("table {table}: failed to parse: {message}")]
    Csv { table: String, message: String },
}

impl IngestError {
    /// Table named by the error, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            IngestError::FileRead { .. } => None,
            IngestError::UnreadableEncoding { table, .. }
            | IngestError::UnparsableDelimiter { table }
            | IngestError::EmptyTable { table }
            | IngestError::StructureMismatch { table, .. }
            | IngestError::EmptyColumnName { table, .. }
            | IngestError::DuplicateColumn { table, .. }
            | IngestError::Csv { table, .. } => Some(table),
        }
    }

    /// True for the header-only outcome, which skips validation instead of failing it.
    pub fn is_empty_table(&self) -> bool {
        matches!(self, IngestError::EmptyTable { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::StructureMismatch {
            table: "SAMPLE".to_string(),
            line: 4,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "table SAMPLE: line 4 has 2 fields, expected 3"
        );
        assert_eq!(err.table(), Some("SAMPLE"));
    }

    #[test]
    fn test_empty_table_is_skip() {
        let err = IngestError::EmptyTable {
            table: "STUDY".to_string(),
        };
        assert!(err.is_empty_table());
        assert!(
            !IngestError::UnparsableDelimiter {
                table: "STUDY".to_string()
            }
            .is_empty_table()
        );
    }
}
