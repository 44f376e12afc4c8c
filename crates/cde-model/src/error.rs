use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },
    #[error("column '{column}' has {found} cells, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has {found} fields, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
