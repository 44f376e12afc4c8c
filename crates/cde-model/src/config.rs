use serde::{Deserialize, Serialize};

use crate::issue::Severity;

/// Dataset selection used to resolve the expected tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub species: String,
    pub tissue: String,
    pub modality: String,
    pub cde_version: String,
}

impl DatasetConfig {
    pub fn new(
        species: impl Into<String>,
        tissue: impl Into<String>,
        modality: impl Into<String>,
        cde_version: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            tissue: tissue.into(),
            modality: modality.into(),
            cde_version: cde_version.into(),
        }
    }
}

/// Severities the validator assigns where the choice is a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Severity for columns present in the upload but absent from the table schema.
    pub unexpected_column: Severity,
    /// Severity for invalid values in optional columns.
    pub optional_invalid: Severity,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            unexpected_column: Severity::Warning,
            optional_invalid: Severity::Error,
        }
    }
}
