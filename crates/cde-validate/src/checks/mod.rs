//! Per-value checks for typed columns.
//!
//! Each module decides validity for one data type; [`invalid_values`]
//! applies the right one to a column and skips unset cells, except in
//! pattern columns where only declared fill values stand in for a value.

mod enumeration;
mod numeric;
mod pattern;

use cde_model::{ColumnSpec, DataType};
use regex::Regex;

use crate::missing::is_unset;

pub use enumeration::is_allowed;
pub use numeric::{is_float, is_integer};
pub use pattern::{compile, full_match};

/// Value rule for one column.
enum ValueCheck<'a> {
    Any,
    Integer,
    Float,
    OneOf(&'a [String]),
    /// `None` when the pattern failed to compile; every value is invalid.
    Pattern(Option<Regex>),
}

impl<'a> ValueCheck<'a> {
    fn for_column(spec: &'a ColumnSpec) -> Self {
        match spec.data_type {
            DataType::String => ValueCheck::Any,
            DataType::Integer => ValueCheck::Integer,
            DataType::Float => ValueCheck::Float,
            DataType::Enum => ValueCheck::OneOf(&spec.allowed_values),
            DataType::Regex => match spec.pattern.as_deref() {
                Some(pattern) => ValueCheck::Pattern(compile(&spec.name, pattern)),
                None => ValueCheck::Any,
            },
        }
    }

    /// Pattern columns treat blank and `NA` cells as values to match.
    fn skips_unset(&self) -> bool {
        !matches!(self, ValueCheck::Pattern(_))
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            ValueCheck::Any => true,
            ValueCheck::Integer => is_integer(value),
            ValueCheck::Float => is_float(value),
            ValueCheck::OneOf(allowed) => is_allowed(value, allowed),
            ValueCheck::Pattern(Some(regex)) => full_match(regex, value),
            ValueCheck::Pattern(None) => false,
        }
    }
}

/// Distinct invalid values of a column, in first-seen order.
///
/// The column's fill values are always valid. Unset cells are valid too,
/// except in Regex columns.
pub fn invalid_values(spec: &ColumnSpec, values: &[String]) -> Vec<String> {
    let check = ValueCheck::for_column(spec);
    if matches!(check, ValueCheck::Any) {
        return Vec::new();
    }
    let skips_unset = check.skips_unset();
    let mut invalid: Vec<String> = Vec::new();
    for value in values {
        if (skips_unset && is_unset(value)) || spec.is_fill_value(value) || check.accepts(value) {
            continue;
        }
        if !invalid.contains(value) {
            invalid.push(value.clone());
        }
    }
    invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(data_type: DataType) -> ColumnSpec {
        ColumnSpec {
            name: "field".to_string(),
            display_name: "Field".to_string(),
            description: String::new(),
            data_type,
            required: true,
            allowed_values: Vec::new(),
            pattern: None,
            fill_values: vec!["Not Reported".to_string()],
        }
    }

    fn values(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn integer_column() {
        let invalid = invalid_values(
            &spec(DataType::Integer),
            &values(&["1", "3.0", "x", "NA", "", "Not Reported", "2.5", "x"]),
        );
        assert_eq!(invalid, vec!["x", "2.5"]);
    }

    #[test]
    fn enum_column_is_case_sensitive() {
        let mut column = spec(DataType::Enum);
        column.allowed_values = values(&["Male", "Female"]);
        let invalid = invalid_values(&column, &values(&["Male", "male", "Not Reported", "FEMALE"]));
        assert_eq!(invalid, vec!["male", "FEMALE"]);
    }

    #[test]
    fn string_column_accepts_anything() {
        assert!(invalid_values(&spec(DataType::String), &values(&["?", "42"])).is_empty());
    }

    #[test]
    fn regex_column() {
        let mut column = spec(DataType::Regex);
        column.pattern = Some("[0-9a-f]{4}".to_string());
        let invalid = invalid_values(&column, &values(&["beef", "BEEF", "beef00"]));
        assert_eq!(invalid, vec!["BEEF", "beef00"]);
    }

    #[test]
    fn broken_pattern_flags_every_value() {
        let mut column = spec(DataType::Regex);
        column.pattern = Some("([a-z".to_string());
        let invalid = invalid_values(&column, &values(&["abc", "Not Reported"]));
        assert_eq!(invalid, vec!["abc"]);
    }

    #[test]
    fn regex_column_flags_unset_cells_without_fill_values() {
        let mut column = spec(DataType::Regex);
        column.pattern = Some("[^@]+@[^@]+".to_string());
        column.fill_values.clear();
        let invalid = invalid_values(&column, &values(&["a@b.org", "NA", "", "NA"]));
        assert_eq!(invalid, vec!["NA", ""]);

        column.fill_values = values(&["NA"]);
        let invalid = invalid_values(&column, &values(&["a@b.org", "NA"]));
        assert!(invalid.is_empty());
    }
}
