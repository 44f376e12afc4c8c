//! Validation issue types.
//!
//! `Finding` says what was observed for a column; `Issue` pairs it with the
//! severity chosen by the validation policy.

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks release of the sanitized table
    Error,
    /// Advisory only
    Warning,
    /// Column passed every check
    Success,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Success => "Success",
        }
    }

    /// Upper-case tag used in rendered logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Success => "SUCCESS",
        }
    }
}

/// What the validator observed for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    MissingRequiredColumn {
        column: String,
    },
    MissingOptionalColumn {
        column: String,
    },
    /// Column present in the upload but not declared for the table
    UnexpectedColumn {
        column: String,
    },
    InvalidValues {
        column: String,
        data_type: DataType,
        /// Distinct invalid values in first-seen order
        invalid_values: Vec<String>,
        /// Values that would have been accepted
        expected: Vec<String>,
    },
    ColumnValid {
        column: String,
    },
}

impl Finding {
    pub fn column(&self) -> &str {
        match self {
            Finding::MissingRequiredColumn { column } => column,
            Finding::MissingOptionalColumn { column } => column,
            Finding::UnexpectedColumn { column } => column,
            Finding::InvalidValues { column, .. } => column,
            Finding::ColumnValid { column } => column,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Finding::MissingRequiredColumn { .. } => "missing required column".to_string(),
            Finding::MissingOptionalColumn { .. } => "missing optional column".to_string(),
            Finding::UnexpectedColumn { .. } => {
                "column not part of CDE, not evaluated".to_string()
            }
            Finding::InvalidValues { invalid_values, .. } => {
                format!("has {} invalid values", invalid_values.len())
            }
            Finding::ColumnValid { .. } => "all values valid".to_string(),
        }
    }
}

/// A single validation issue. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub finding: Finding,
}

impl Issue {
    pub fn new(severity: Severity, finding: Finding) -> Self {
        Self { severity, finding }
    }

    pub fn missing_required(column: impl Into<String>) -> Self {
        Self::new(
            Severity::Error,
            Finding::MissingRequiredColumn {
                column: column.into(),
            },
        )
    }

    pub fn missing_optional(column: impl Into<String>) -> Self {
        Self::new(
            Severity::Warning,
            Finding::MissingOptionalColumn {
                column: column.into(),
            },
        )
    }

    pub fn unexpected(column: impl Into<String>, severity: Severity) -> Self {
        Self::new(
            severity,
            Finding::UnexpectedColumn {
                column: column.into(),
            },
        )
    }

    pub fn valid(column: impl Into<String>) -> Self {
        Self::new(
            Severity::Success,
            Finding::ColumnValid {
                column: column.into(),
            },
        )
    }

    pub fn column(&self) -> &str {
        self.finding.column()
    }

    pub fn message(&self) -> String {
        self.finding.message()
    }

    pub fn invalid_values(&self) -> &[String] {
        match &self.finding {
            Finding::InvalidValues { invalid_values, .. } => invalid_values,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
