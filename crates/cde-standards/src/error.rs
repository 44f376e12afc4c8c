#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML layout {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CDE CSV {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("CDE {source_name} is missing required column '{column}'")]
    MissingCdeColumn { source_name: String, column: String },

    #[error("CDE {source_name} has empty values in required columns. Examples: {examples}")]
    IncompleteCde {
        source_name: String,
        examples: String,
    },

    #[error("CDE field {table}.{field} is an Enum without allowed values")]
    EmptyEnum { table: String, field: String },

    #[error("CDE version {version} is already registered")]
    DuplicateVersion { version: String },

    #[error("no CDE versions found under {path}")]
    NoVersions { path: PathBuf },

    #[error(
        "no schema set for species '{species}', tissue '{tissue}', modality '{modality}', CDE version '{cde_version}'"
    )]
    UnknownConfiguration {
        species: String,
        tissue: String,
        modality: String,
        cde_version: String,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(source_name: &str, error: &::csv::Error) -> Self {
        Self::Csv {
            source_name: source_name.to_string(),
            message: error.to_string(),
        }
    }
}
