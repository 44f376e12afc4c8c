#![deny(unsafe_code)]

//! Which tables a dataset configuration is expected to upload.
//!
//! ```toml
//! mandatory = ["STUDY", "PROTOCOL", "SUBJECT", "SAMPLE", "DATA"]
//!
//! [species.Human]
//! tables = ["PMDBS", "CLINPATH", "CONDITION"]
//!
//! [tissue.iPSC]
//! tables = ["CELL"]
//!
//! [modality."Bulk RNAseq"]
//! assay = "bulk_rna_seq"
//! tables = ["ASSAY_RNAseq"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGroup {
    #[serde(default)]
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityTables {
    /// Key matched against the CDE `SpecificAssays` column.
    #[serde(default)]
    pub assay: Option<String>,
    #[serde(default)]
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    #[serde(default)]
    pub mandatory: Vec<String>,
    #[serde(default)]
    pub species: BTreeMap<String, TableGroup>,
    #[serde(default)]
    pub tissue: BTreeMap<String, TableGroup>,
    #[serde(default)]
    pub modality: BTreeMap<String, ModalityTables>,
}

impl TableLayout {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Expected tables in upload order, or `None` when any selection is unknown.
    pub fn expected_tables(&self, species: &str, tissue: &str, modality: &str) -> Option<Vec<String>> {
        let species = self.species.get(species)?;
        let tissue = self.tissue.get(tissue)?;
        let modality = self.modality.get(modality)?;
        let mut tables: Vec<String> = Vec::new();
        for table in self
            .mandatory
            .iter()
            .chain(&species.tables)
            .chain(&tissue.tables)
            .chain(&modality.tables)
        {
            if !tables.contains(table) {
                tables.push(table.clone());
            }
        }
        Some(tables)
    }

    pub fn assay_key(&self, modality: &str) -> Option<&str> {
        self.modality.get(modality)?.assay.as_deref()
    }

    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn tissue_names(&self) -> impl Iterator<Item = &str> {
        self.tissue.keys().map(String::as_str)
    }

    pub fn modality_names(&self) -> impl Iterator<Item = &str> {
        self.modality.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"
mandatory = ["STUDY", "SAMPLE"]

[species.Human]
tables = ["PMDBS", "SAMPLE"]

[species.Mouse]
tables = ["MOUSE"]

[tissue.Brain]

[tissue.iPSC]
tables = ["CELL"]

[modality."Bulk RNAseq"]
assay = "bulk_rna_seq"
tables = ["ASSAY_RNAseq"]

[modality.Genetics]
"#;

    #[test]
    fn expected_tables_in_order_without_duplicates() {
        let layout = TableLayout::from_toml_str(LAYOUT).expect("parse layout");
        assert_eq!(
            layout.expected_tables("Human", "iPSC", "Bulk RNAseq"),
            Some(vec![
                "STUDY".to_string(),
                "SAMPLE".to_string(),
                "PMDBS".to_string(),
                "CELL".to_string(),
                "ASSAY_RNAseq".to_string(),
            ])
        );
        assert_eq!(
            layout.expected_tables("Mouse", "Brain", "Genetics"),
            Some(vec![
                "STUDY".to_string(),
                "SAMPLE".to_string(),
                "MOUSE".to_string()
            ])
        );
    }

    #[test]
    fn unknown_selection_has_no_tables() {
        let layout = TableLayout::from_toml_str(LAYOUT).expect("parse layout");
        assert_eq!(layout.expected_tables("Zebrafish", "Brain", "Genetics"), None);
        assert_eq!(layout.expected_tables("Human", "Liver", "Genetics"), None);
        assert_eq!(layout.expected_tables("Human", "Brain", "Sequencing"), None);
    }

    #[test]
    fn assay_keys() {
        let layout = TableLayout::from_toml_str(LAYOUT).expect("parse layout");
        assert_eq!(layout.assay_key("Bulk RNAseq"), Some("bulk_rna_seq"));
        assert_eq!(layout.assay_key("Genetics"), None);
        assert_eq!(layout.species_names().collect::<Vec<_>>(), vec!["Human", "Mouse"]);
    }
}
