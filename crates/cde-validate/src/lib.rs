//! CDE metadata table validation.
//!
//! - **Missing values**: null-like cells become `NA`, with fill-value
//!   candidates for reviewer choice
//! - **Column checks**: presence, Integer/Float parsing, Enum membership and
//!   Regex matching
//! - **Reports**: issue aggregation, cleanliness and sanitized-table release
//!
//! # Example
//!
//! ```ignore
//! use cde_validate::{EngineOptions, TableOutcome, run_table};
//!
//! let schema = schema_set.schema("SAMPLE").expect("expected table");
//! match run_table("SAMPLE", &bytes, &schema, &EngineOptions::default())? {
//!     TableOutcome::Skipped { reason, .. } => println!("skipped: {reason}"),
//!     TableOutcome::Validated(run) => println!("{} errors", run.report.error_count()),
//! }
//! ```

mod checks;
mod column;
mod engine;
mod error;
mod missing;
mod report;

// === Error Types ===
pub use error::{EngineError, Result, ValidateError};

// === Missing Values ===
pub use missing::{
    FillChoices, MissingResolution, NULL_LIKE_LITERALS, apply_fill_choices, fill_candidates,
    is_missing, is_unset, resolve,
};

// === Column Validation ===
pub use checks::invalid_values;
pub use column::{validate, validate_table};

// === Reports ===
pub use report::{build, is_clean, release_sanitized, sanitize};

// === Engine ===
pub use engine::{EngineOptions, TableOutcome, TableRun, run_table};
