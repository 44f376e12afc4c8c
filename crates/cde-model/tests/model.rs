//! Tests for cde-model types.

use cde_model::{
    DataType, FillSummary, Finding, Issue, RawTable, Severity, ValidationPolicy, ValidationReport,
};

fn invalid_issue(column: &str, severity: Severity) -> Issue {
    Issue::new(
        severity,
        Finding::InvalidValues {
            column: column.to_string(),
            data_type: DataType::Enum,
            invalid_values: vec!["bogus".to_string()],
            expected: vec!["Raw".to_string()],
        },
    )
}

#[test]
fn report_counts_by_severity() {
    let report = ValidationReport {
        table: "SAMPLE".to_string(),
        issues: vec![
            Issue::missing_required("sample_id"),
            Issue::missing_optional("batch_id"),
            invalid_issue("file_type", Severity::Error),
            Issue::valid("sex"),
        ],
        filled: vec![],
    };
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.success_count(), 1);
    assert!(!report.is_clean());
}

#[test]
fn report_is_clean_with_only_warnings() {
    let mut report = ValidationReport::new("STUDY");
    report
        .issues
        .push(Issue::unexpected("batch", Severity::Warning));
    report.issues.push(Issue::valid("study_name"));
    assert!(report.is_clean());
    assert_eq!(report.issues_for("batch").count(), 1);
}

#[test]
fn report_serializes() {
    let report = ValidationReport {
        table: "DATA".to_string(),
        issues: vec![invalid_issue("file_type", Severity::Warning)],
        filled: vec![FillSummary {
            column: "age".to_string(),
            cells: 3,
            replacement: "NA".to_string(),
            candidates: vec![],
            chosen: false,
        }],
    };
    let json = serde_json::to_string(&report).expect("serialize report");
    assert!(json.contains("\"kind\":\"invalid_values\""));
    let round: ValidationReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(round, report);
    assert_eq!(round.filled_cell_count(), 3);
}

#[test]
fn policy_defaults_and_partial_override() {
    let policy = ValidationPolicy::default();
    assert_eq!(policy.unexpected_column, Severity::Warning);
    assert_eq!(policy.optional_invalid, Severity::Error);

    let parsed: ValidationPolicy =
        serde_json::from_str(r#"{"unexpected_column":"error"}"#).expect("parse policy");
    assert_eq!(parsed.unexpected_column, Severity::Error);
    assert_eq!(parsed.optional_invalid, Severity::Error);
}

#[test]
fn table_from_columns_keeps_order() {
    let table = RawTable::from_columns(vec![
        ("b".to_string(), vec!["1".to_string()]),
        ("a".to_string(), vec!["2".to_string()]),
    ])
    .expect("table");
    assert_eq!(table.column_names(), &["b".to_string(), "a".to_string()][..]);
    assert_eq!(table.row_count(), 1);
}
