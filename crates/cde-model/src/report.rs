use serde::{Deserialize, Serialize};

use crate::issue::{Issue, Severity};

/// Missing cells filled in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSummary {
    pub column: String,
    pub cells: usize,
    /// Value currently written into the filled cells.
    pub replacement: String,
    /// Values the reviewer may choose from; empty when none were declared.
    pub candidates: Vec<String>,
    /// True when the replacement came from a reviewer choice.
    #[serde(default)]
    pub chosen: bool,
}

impl FillSummary {
    pub fn awaiting_choice(&self) -> bool {
        !self.candidates.is_empty() && !self.chosen
    }
}

/// Validation outcome for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub table: String,
    pub issues: Vec<Issue>,
    pub filled: Vec<FillSummary>,
}

impl ValidationReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn success_count(&self) -> usize {
        self.count(Severity::Success)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// True when no Error issue exists; gates sanitized-table release.
    pub fn is_clean(&self) -> bool {
        !self.has_errors()
    }

    pub fn issues_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.column() == column)
    }

    pub fn filled_cell_count(&self) -> usize {
        self.filled.iter().map(|summary| summary.cells).sum()
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}
