//! Missing-value resolution.
//!
//! Every missing cell is rewritten to [`MISSING_TOKEN`] and recorded. Columns
//! that declare fill values keep the token provisionally until the reviewer
//! picks a replacement through [`apply_fill_choices`].

use std::collections::BTreeMap;

use cde_model::{MISSING_TOKEN, MissingCellRecord, RawTable, TableSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValidateError};

/// Literal spellings treated as an absent value.
pub const NULL_LIKE_LITERALS: [&str; 7] = ["none", "None", "nan", "NaN", "NAN", "N/A", "n/a"];

/// True for empty, whitespace-only and null-like cells.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NULL_LIKE_LITERALS.contains(&trimmed)
}

/// True for cells the validator never flags: missing cells and the canonical token.
pub fn is_unset(value: &str) -> bool {
    value == MISSING_TOKEN || is_missing(value)
}

/// A table with its missing cells rewritten, plus what was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingResolution {
    pub table: RawTable,
    /// Ordered by column (table order), then row.
    pub records: Vec<MissingCellRecord>,
}

impl MissingResolution {
    /// Columns with filled cells still waiting for a reviewer choice, in table order.
    pub fn pending_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for record in self.records.iter().filter(|record| record.needs_choice()) {
            if columns.last() != Some(&record.column.as_str()) {
                columns.push(&record.column);
            }
        }
        columns
    }

    /// Candidates offered for a column, if any of its cells were filled.
    pub fn candidates(&self, column: &str) -> Option<&[String]> {
        self.records
            .iter()
            .find(|record| record.column == column)
            .map(|record| record.candidates.as_slice())
    }
}

/// Reviewer choices: one replacement value per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillChoices(BTreeMap<String, String>);

impl FillChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a choice, replacing any earlier one for the column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for FillChoices {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rewrite every missing cell to [`MISSING_TOKEN`].
///
/// Cells in schema columns with fill values are offered the column's fill
/// values plus the token; every other missing cell gets no candidates.
pub fn resolve(mut table: RawTable, schema: &TableSchema) -> MissingResolution {
    let names = table.column_names().to_vec();
    let mut records = Vec::new();
    for name in names {
        let candidates = fill_candidates(schema, &name);
        let Some(cells) = table.column_mut(&name) else {
            continue;
        };
        let before = records.len();
        for (row_index, cell) in cells.iter_mut().enumerate() {
            if !is_missing(cell) {
                continue;
            }
            let original = std::mem::replace(cell, MISSING_TOKEN.to_string());
            records.push(MissingCellRecord {
                row_index,
                column: name.clone(),
                original,
                replacement: MISSING_TOKEN.to_string(),
                candidates: candidates.clone(),
                chosen: false,
            });
        }
        let filled = records.len() - before;
        if filled > 0 {
            debug!(table = %schema.name, column = %name, cells = filled, "filled missing cells");
        }
    }
    MissingResolution { table, records }
}

/// Replacements a reviewer may choose for missing cells of `column`: its
/// fill values plus `NA`. Empty when the column declares no fill values.
pub fn fill_candidates(schema: &TableSchema, column: &str) -> Vec<String> {
    let Some(spec) = schema.column(column).filter(|spec| spec.has_fill_values()) else {
        return Vec::new();
    };
    let mut candidates = spec.fill_values.clone();
    if !spec.is_fill_value(MISSING_TOKEN) {
        candidates.push(MISSING_TOKEN.to_string());
    }
    candidates
}

/// Write reviewer choices into the resolved cells.
///
/// Every choice is checked before any cell changes. Choices for columns
/// without filled cells are ignored. Returns the number of cells rewritten.
pub fn apply_fill_choices(resolution: &mut MissingResolution, choices: &FillChoices) -> Result<usize> {
    let mut applicable = Vec::new();
    for (column, value) in choices.iter() {
        let Some(candidates) = resolution.candidates(column) else {
            debug!(column = %column, "fill choice for column without missing cells");
            continue;
        };
        if candidates.is_empty() {
            return Err(ValidateError::NoFillCandidates {
                column: column.to_string(),
            });
        }
        if !candidates.iter().any(|candidate| candidate == value) {
            return Err(ValidateError::InvalidFillChoice {
                column: column.to_string(),
                value: value.to_string(),
                candidates: candidates.to_vec(),
            });
        }
        applicable.push((column, value));
    }

    let mut rewritten = 0;
    for (column, value) in applicable {
        let MissingResolution { table, records } = &mut *resolution;
        let Some(cells) = table.column_mut(column) else {
            continue;
        };
        for record in records.iter_mut().filter(|record| record.column == column) {
            cells[record.row_index] = value.to_string();
            record.replacement = value.to_string();
            record.chosen = true;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}
