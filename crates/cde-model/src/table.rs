use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Canonical token written into cells that carry no value.
pub const MISSING_TOKEN: &str = "NA";

/// A parsed table: named columns of raw string cells, in file order.
///
/// Cells are stored column-major. Every column has `row_count` cells and
/// column names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    names: Vec<String>,
    cells: Vec<Vec<String>>,
    row_count: usize,
}

impl RawTable {
    /// Build a table from a header and row-major records.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut table = Self {
            names: Vec::with_capacity(header.len()),
            cells: Vec::with_capacity(header.len()),
            row_count: rows.len(),
        };
        for name in header {
            if table.contains(&name) {
                return Err(ModelError::DuplicateColumn { column: name });
            }
            table.names.push(name);
            table.cells.push(Vec::with_capacity(rows.len()));
        }
        let width = table.names.len();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::RowLength {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (column, value) in table.cells.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Ok(table)
    }

    /// Build a table from named columns.
    pub fn from_columns(columns: Vec<(String, Vec<String>)>) -> Result<Self> {
        let mut table = Self::default();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|index| self.cells[index].as_slice())
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut [String]> {
        let index = self.position(name)?;
        Some(self.cells[index].as_mut_slice())
    }

    /// Iterate columns as `(name, cells)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Append a column. Its length must match the existing row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ModelError::DuplicateColumn { column: name });
        }
        if self.names.is_empty() && self.row_count == 0 {
            self.row_count = values.len();
        }
        if values.len() != self.row_count {
            return Err(ModelError::ColumnLength {
                column: name,
                expected: self.row_count,
                found: values.len(),
            });
        }
        self.names.push(name);
        self.cells.push(values);
        Ok(())
    }

    /// Remove a column and return its cells.
    pub fn take_column(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.position(name)?;
        self.names.remove(index);
        Some(self.cells.remove(index))
    }

    /// Row-major view of the cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count).map(move |row| {
            self.cells
                .iter()
                .map(|column| column[row].as_str())
                .collect()
        })
    }

    /// Copy of the table with columns in `order`.
    ///
    /// Names not present are added with every cell set to `filler`; repeated
    /// names are kept once.
    pub fn project(&self, order: &[&str], filler: &str) -> RawTable {
        let mut projected = RawTable {
            names: Vec::with_capacity(order.len()),
            cells: Vec::with_capacity(order.len()),
            row_count: self.row_count,
        };
        for &name in order {
            if projected.contains(name) {
                continue;
            }
            let cells = match self.column(name) {
                Some(cells) => cells.to_vec(),
                None => vec![filler.to_string(); self.row_count],
            };
            projected.names.push(name.to_string());
            projected.cells.push(cells);
        }
        projected
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|existing| existing == name)
    }
}

/// One cell changed by missing-value resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCellRecord {
    /// Zero-based data row index (helper rows excluded).
    pub row_index: usize,
    pub column: String,
    pub original: String,
    pub replacement: String,
    /// Values the reviewer may pick from; empty when the column declares no fill values.
    pub candidates: Vec<String>,
    /// Set once a reviewer choice has been written into the cell.
    #[serde(default)]
    pub chosen: bool,
}

impl MissingCellRecord {
    pub fn needs_choice(&self) -> bool {
        !self.candidates.is_empty() && !self.chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn from_rows_is_column_major() {
        let table = RawTable::from_rows(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"])],
        )
        .expect("table");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("b"), Some(&strings(&["2", "4"])[..]));
        let rows: Vec<Vec<&str>> = table.rows().collect();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn duplicate_columns_rejected() {
        let error = RawTable::from_rows(strings(&["a", "a"]), vec![]).unwrap_err();
        assert!(matches!(error, ModelError::DuplicateColumn { column } if column == "a"));
    }

    #[test]
    fn ragged_rows_rejected() {
        let error =
            RawTable::from_rows(strings(&["a", "b"]), vec![strings(&["1"])]).unwrap_err();
        assert!(matches!(
            error,
            ModelError::RowLength {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn push_column_checks_length() {
        let mut table =
            RawTable::from_rows(strings(&["a"]), vec![strings(&["1"]), strings(&["2"])])
                .expect("table");
        assert!(table.push_column("b", strings(&["x"])).is_err());
        table
            .push_column("b", strings(&["x", "y"]))
            .expect("push column");
        assert_eq!(table.column_names(), &strings(&["a", "b"])[..]);
        assert_eq!(table.take_column("a"), Some(strings(&["1", "2"])));
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn project_reorders_and_fills() {
        let table = RawTable::from_rows(
            strings(&["extra", "id"]),
            vec![strings(&["x", "1"]), strings(&["y", "2"])],
        )
        .expect("table");
        let projected = table.project(&["id", "age", "id", "extra"], MISSING_TOKEN);
        assert_eq!(projected.column_names(), &strings(&["id", "age", "extra"])[..]);
        assert_eq!(projected.column("age"), Some(&strings(&["NA", "NA"])[..]));
        assert_eq!(projected.row_count(), 2);
    }

    #[test]
    fn chosen_record_no_longer_needs_choice() {
        let mut record = MissingCellRecord {
            row_index: 0,
            column: "sex".to_string(),
            original: String::new(),
            replacement: MISSING_TOKEN.to_string(),
            candidates: strings(&["Unknown", "NA"]),
            chosen: false,
        };
        assert!(record.needs_choice());
        record.chosen = true;
        assert!(!record.needs_choice());
    }
}
