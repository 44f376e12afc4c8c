//! Column validation against a table schema.

use cde_model::{
    ColumnSpec, DataType, Finding, Issue, RawTable, Severity, TableSchema, ValidationPolicy,
};

use crate::checks;

/// Validate one column.
///
/// `values` is `None` when the column is absent from the upload and `spec`
/// is `None` when the schema does not declare it.
pub fn validate(
    column_name: &str,
    values: Option<&[String]>,
    spec: Option<&ColumnSpec>,
    policy: &ValidationPolicy,
) -> Vec<Issue> {
    match (spec, values) {
        (None, None) => Vec::new(),
        (None, Some(_)) => vec![Issue::unexpected(column_name, policy.unexpected_column)],
        (Some(spec), None) if spec.required => vec![Issue::missing_required(column_name)],
        (Some(_), None) => vec![Issue::missing_optional(column_name)],
        (Some(spec), Some(values)) => {
            let invalid_values = checks::invalid_values(spec, values);
            if invalid_values.is_empty() {
                return vec![Issue::valid(column_name)];
            }
            let severity = if spec.required {
                Severity::Error
            } else {
                policy.optional_invalid
            };
            vec![Issue::new(
                severity,
                Finding::InvalidValues {
                    column: column_name.to_string(),
                    data_type: spec.data_type,
                    invalid_values,
                    expected: expected_values(spec),
                },
            )]
        }
    }
}

/// Accepted values shown next to an invalid-values issue.
fn expected_values(spec: &ColumnSpec) -> Vec<String> {
    match spec.data_type {
        DataType::Enum => spec.expected_values(),
        DataType::Regex => {
            let mut expected: Vec<String> = spec.pattern.iter().cloned().collect();
            expected.extend(spec.fill_values.iter().cloned());
            expected
        }
        DataType::Integer | DataType::Float | DataType::String => spec.fill_values.clone(),
    }
}

/// Validate every schema column in schema order, then flag each upload
/// column the schema does not declare, in file order.
pub fn validate_table(
    schema: &TableSchema,
    table: &RawTable,
    policy: &ValidationPolicy,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for spec in &schema.columns {
        issues.extend(validate(&spec.name, table.column(&spec.name), Some(spec), policy));
    }
    for (name, values) in table.columns() {
        if !schema.contains(name) {
            issues.extend(validate(name, Some(values), None, policy));
        }
    }
    issues
}
