#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use cde_model::{DatasetConfig, TableSchema};
use tracing::{debug, warn};

use crate::csv::cde::CdeRow;
use crate::error::StandardsError;
use crate::layout::TableLayout;
use crate::version::{canonical_version, version_sort_key};

/// One published CDE version: its rows, its table layout and the digest of
/// the source file it was parsed from.
#[derive(Debug, Clone)]
pub struct CdeRelease {
    pub version: String,
    pub source_sha256: String,
    pub rows: Vec<CdeRow>,
    pub layout: TableLayout,
}

impl CdeRelease {
    /// Build a release, rejecting rows that cannot become column specs.
    pub fn new(
        version: impl Into<String>,
        source_sha256: impl Into<String>,
        rows: Vec<CdeRow>,
        layout: TableLayout,
    ) -> Result<Self, StandardsError> {
        for row in &rows {
            row.to_column_spec()?;
        }
        Ok(Self {
            version: version.into(),
            source_sha256: source_sha256.into(),
            rows,
            layout,
        })
    }

    /// Column schema for one table under the given selection.
    pub fn table_schema(
        &self,
        table: &str,
        species: &str,
        tissue: &str,
        assay: Option<&str>,
    ) -> Result<TableSchema, StandardsError> {
        let columns = self
            .rows
            .iter()
            .filter(|row| row.table == table)
            .filter(|row| row.specificity.applies_to(species, tissue, assay))
            .map(CdeRow::to_column_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableSchema::new(table, columns))
    }
}

/// Tables and column schemas expected for one dataset configuration.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    pub config: DatasetConfig,
    pub source_sha256: String,
    pub tables: Vec<Arc<TableSchema>>,
}

impl SchemaSet {
    /// Look up a table by name, ignoring ASCII case when there is no exact match.
    pub fn schema(&self, table: &str) -> Option<Arc<TableSchema>> {
        self.tables
            .iter()
            .find(|schema| schema.name == table)
            .or_else(|| {
                self.tables
                    .iter()
                    .find(|schema| schema.name.eq_ignore_ascii_case(table))
            })
            .cloned()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|schema| schema.name.as_str()).collect()
    }
}

/// Immutable-once-built collection of CDE releases keyed by version.
#[derive(Debug, Clone, Default)]
pub struct CdeRegistry {
    releases: BTreeMap<String, Arc<CdeRelease>>,
}

impl CdeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a release under its canonical version. A version is published
    /// once and never replaced.
    pub fn register(&mut self, mut release: CdeRelease) -> Result<(), StandardsError> {
        release.version = canonical_version(&release.version);
        if self.releases.contains_key(&release.version) {
            return Err(StandardsError::DuplicateVersion {
                version: release.version,
            });
        }
        debug!(
            version = %release.version,
            rows = release.rows.len(),
            "registered CDE release"
        );
        self.releases
            .insert(release.version.clone(), Arc::new(release));
        Ok(())
    }

    pub fn with_release(mut self, release: CdeRelease) -> Result<Self, StandardsError> {
        self.register(release)?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Registered versions, oldest first.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.releases.keys().map(String::as_str).collect();
        versions.sort_by_key(|version| version_sort_key(version));
        versions
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.versions().last().copied()
    }

    pub fn release(&self, version: &str) -> Option<&Arc<CdeRelease>> {
        self.releases.get(&canonical_version(version))
    }

    pub fn resolve_config(&self, config: &DatasetConfig) -> Result<SchemaSet, StandardsError> {
        self.resolve(
            &config.species,
            &config.tissue,
            &config.modality,
            &config.cde_version,
        )
    }

    /// Expected tables and their column schemas for a dataset configuration.
    pub fn resolve(
        &self,
        species: &str,
        tissue: &str,
        modality: &str,
        cde_version: &str,
    ) -> Result<SchemaSet, StandardsError> {
        let unknown = || StandardsError::UnknownConfiguration {
            species: species.to_string(),
            tissue: tissue.to_string(),
            modality: modality.to_string(),
            cde_version: cde_version.to_string(),
        };
        let release = self.release(cde_version).ok_or_else(unknown)?;
        let table_names = release
            .layout
            .expected_tables(species, tissue, modality)
            .filter(|tables| !tables.is_empty())
            .ok_or_else(unknown)?;
        let assay = release.layout.assay_key(modality);

        let mut tables = Vec::with_capacity(table_names.len());
        for name in &table_names {
            let schema = release.table_schema(name, species, tissue, assay)?;
            if schema.columns.is_empty() {
                warn!(
                    table = %name,
                    version = %release.version,
                    "expected table has no CDE columns"
                );
            }
            tables.push(Arc::new(schema));
        }
        debug!(
            version = %release.version,
            tables = ?table_names,
            "resolved schema set"
        );
        Ok(SchemaSet {
            config: DatasetConfig::new(species, tissue, modality, release.version.clone()),
            source_sha256: release.source_sha256.clone(),
            tables,
        })
    }
}
