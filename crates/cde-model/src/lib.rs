pub mod config;
pub mod error;
pub mod issue;
pub mod report;
pub mod schema;
pub mod table;

pub use config::{DatasetConfig, ValidationPolicy};
pub use error::{ModelError, Result};
pub use issue::{Finding, Issue, Severity};
pub use report::{FillSummary, ValidationReport};
pub use schema::{ColumnSpec, DataType, TableSchema};
pub use table::{MISSING_TOKEN, MissingCellRecord, RawTable};
