#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use cde_model::{ColumnSpec, DataType};
use tracing::warn;

use crate::csv::list::parse_list_cell;
use crate::error::StandardsError;

/// Columns that must exist and be populated on every CDE row.
pub const REQUIRED_CDE_COLUMNS: &[&str] = &[
    "Table",
    "Field",
    "DisplayName",
    "Description",
    "DataType",
    "Required",
    "FillNull",
];

/// Required-flag values that mark rows the uploader never supplies.
const SKIPPED_REQUIRED_FLAGS: &[&str] = &["Assigned", "Alias"];

const MAX_INCOMPLETE_EXAMPLES: usize = 10;

/// Which selections a CDE row applies to. Empty lists apply to everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Specificity {
    pub assays: Vec<String>,
    pub tissues: Vec<String>,
    pub species: Vec<String>,
}

impl Specificity {
    /// A modality without an assay key only matches rows with no assay restriction.
    pub fn applies_to(&self, species: &str, tissue: &str, assay: Option<&str>) -> bool {
        axis_allows(&self.species, Some(species))
            && axis_allows(&self.tissues, Some(tissue))
            && axis_allows(&self.assays, assay)
    }
}

fn axis_allows(allowed: &[String], selected: Option<&str>) -> bool {
    allowed.is_empty()
        || selected.is_some_and(|selected| allowed.iter().any(|value| value == selected.trim()))
}

/// One row of the CDE definition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CdeRow {
    pub table: String,
    pub field: String,
    pub display_name: String,
    pub description: String,
    pub data_type: String,
    pub required: String,
    pub validation: String,
    pub fill_null: String,
    pub specificity: Specificity,
}

impl CdeRow {
    pub fn is_required(&self) -> bool {
        self.required.eq_ignore_ascii_case("Required")
    }

    /// Convert to a column specification, enforcing the enum invariant.
    pub fn to_column_spec(&self) -> Result<ColumnSpec, StandardsError> {
        let mut data_type = self.data_type.parse::<DataType>().unwrap_or_else(|_| {
            warn!(
                table = %self.table,
                field = %self.field,
                data_type = %self.data_type,
                "unknown CDE data type, treating as String"
            );
            DataType::String
        });
        let mut allowed_values = Vec::new();
        let mut pattern = None;
        match data_type {
            DataType::Enum => {
                allowed_values = dedup(parse_list_cell(&self.validation));
                if allowed_values.is_empty() {
                    return Err(StandardsError::EmptyEnum {
                        table: self.table.clone(),
                        field: self.field.clone(),
                    });
                }
            }
            DataType::Regex => {
                let rule = self.validation.trim();
                if rule.is_empty() {
                    warn!(
                        table = %self.table,
                        field = %self.field,
                        "Regex field without a pattern, treating as String"
                    );
                    data_type = DataType::String;
                } else {
                    pattern = Some(rule.to_string());
                }
            }
            DataType::Integer | DataType::Float | DataType::String => {}
        }
        Ok(ColumnSpec {
            name: self.field.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            data_type,
            required: self.is_required(),
            allowed_values,
            pattern,
            fill_values: dedup(parse_list_cell(&self.fill_null)),
        })
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

pub fn parse_cde_csv(path: &Path) -> Result<Vec<CdeRow>, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    parse_cde_reader(&path.display().to_string(), bytes.as_slice())
}

/// Parse a CDE definition, dropping Assigned/Alias rows, rows without a
/// table and exact duplicates, then checking completeness.
pub fn parse_cde_reader<R: Read>(
    source_name: &str,
    reader: R,
) -> Result<Vec<CdeRow>, StandardsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(source_name, &e))?
        .clone();
    let index: BTreeMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim_matches('\u{feff}').trim().to_string(), idx))
        .collect();
    for column in REQUIRED_CDE_COLUMNS {
        if !index.contains_key(*column) {
            return Err(StandardsError::MissingCdeColumn {
                source_name: source_name.to_string(),
                column: (*column).to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    let mut seen = BTreeSet::new();
    let mut incomplete = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StandardsError::csv(source_name, &e))?;
        let get = |name: &str| -> String {
            index
                .get(name)
                .and_then(|idx| record.get(*idx))
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };
        let table = get("Table");
        let required = get("Required");
        if table.is_empty() || SKIPPED_REQUIRED_FLAGS.contains(&required.as_str()) {
            continue;
        }
        let raw: Vec<String> = record.iter().map(|value| value.trim().to_string()).collect();
        if !seen.insert(raw) {
            continue;
        }
        if REQUIRED_CDE_COLUMNS
            .iter()
            .any(|column| get(*column).is_empty())
        {
            incomplete.push(format!("{}.{}", table, non_empty_or_unknown(get("Field"))));
            continue;
        }
        rows.push(CdeRow {
            table,
            field: get("Field"),
            display_name: get("DisplayName"),
            description: get("Description"),
            data_type: get("DataType"),
            required,
            validation: get("Validation"),
            fill_null: get("FillNull"),
            specificity: Specificity {
                assays: parse_list_cell(&get("SpecificAssays")),
                tissues: parse_list_cell(&get("SpecificTissueCell")),
                species: parse_list_cell(&get("SpecificSpecies")),
            },
        });
    }

    if !incomplete.is_empty() {
        return Err(StandardsError::IncompleteCde {
            source_name: source_name.to_string(),
            examples: summarize_examples(&incomplete),
        });
    }
    Ok(rows)
}

fn non_empty_or_unknown(value: String) -> String {
    if value.is_empty() {
        "UNKNOWN".to_string()
    } else {
        value
    }
}

fn summarize_examples(labels: &[String]) -> String {
    let shown: Vec<&str> = labels
        .iter()
        .take(MAX_INCOMPLETE_EXAMPLES)
        .map(String::as_str)
        .collect();
    let extra = labels.len() - shown.len();
    let details = shown.join(", ");
    if extra > 0 {
        format!("{details}, and {extra} more")
    } else {
        details
    }
}
