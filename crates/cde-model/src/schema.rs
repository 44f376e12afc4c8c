use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value type declared for a CDE field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    String,
    /// Values restricted to the column's allowed set.
    Enum,
    /// Free text that must fully match the column's pattern.
    Regex,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Integer,
        DataType::Float,
        DataType::String,
        DataType::Enum,
        DataType::Regex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "Integer",
            DataType::Float => "Float",
            DataType::String => "String",
            DataType::Enum => "Enum",
            DataType::Regex => "Regex",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown data type: {trimmed}"))
    }
}

/// One column of a CDE table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub data_type: DataType,
    pub required: bool,
    /// Non-empty exactly when `data_type` is `Enum`.
    pub allowed_values: Vec<String>,
    pub pattern: Option<String>,
    /// Suggested replacements for missing cells, in CDE order.
    pub fill_values: Vec<String>,
}

impl ColumnSpec {
    pub fn has_fill_values(&self) -> bool {
        !self.fill_values.is_empty()
    }

    pub fn is_fill_value(&self, value: &str) -> bool {
        self.fill_values.iter().any(|fill| fill == value)
    }

    /// Allowed values followed by fill values not already listed.
    pub fn expected_values(&self) -> Vec<String> {
        let mut expected = self.allowed_values.clone();
        for fill in &self.fill_values {
            if !expected.contains(fill) {
                expected.push(fill.clone());
            }
        }
        expected
    }
}

/// Ordered column specifications for one table kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|column| column.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enum_spec() -> ColumnSpec {
        ColumnSpec {
            name: "file_type".to_string(),
            display_name: "File type".to_string(),
            description: "Processing state".to_string(),
            data_type: DataType::Enum,
            required: true,
            allowed_values: vec!["Raw".to_string(), "Processed".to_string()],
            pattern: None,
            fill_values: vec!["Unknown".to_string(), "Raw".to_string()],
        }
    }

    #[test]
    fn data_type_parses_case_insensitively() {
        assert_eq!("integer".parse::<DataType>(), Ok(DataType::Integer));
        assert_eq!(" Enum ".parse::<DataType>(), Ok(DataType::Enum));
        assert!("Date".parse::<DataType>().is_err());
    }

    #[test]
    fn expected_values_skip_duplicates() {
        assert_eq!(
            enum_spec().expected_values(),
            vec!["Raw", "Processed", "Unknown"]
        );
    }

    #[test]
    fn schema_lookup_by_name() {
        let schema = TableSchema::new("DATA", vec![enum_spec()]);
        assert!(schema.contains("file_type"));
        assert!(!schema.contains("FILE_TYPE"));
        assert_eq!(schema.column_names(), vec!["file_type"]);
        assert_eq!(schema.required_columns().count(), 1);
    }
}
