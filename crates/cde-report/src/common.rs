//! Shared types for report rendering.

use cde_ingest::Delimiter;

/// Facts about a run that belong in every rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub cde_version: String,
    /// SHA-256 of the CDE source the schema was built from.
    pub cde_sha256: Option<String>,
    pub delimiter: Delimiter,
}

impl ReportContext {
    pub fn new(cde_version: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            cde_version: cde_version.into(),
            cde_sha256: None,
            delimiter,
        }
    }

    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.cde_sha256 = Some(sha256.into());
        self
    }
}

/// `'a', 'b'` rendering of a value list.
pub(crate) fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
