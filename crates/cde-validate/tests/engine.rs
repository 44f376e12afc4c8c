//! End-to-end table runs against the shipped CDE definitions.

use std::sync::Arc;

use cde_ingest::{Delimiter, IngestError};
use cde_model::{Finding, Severity, TableSchema};
use cde_standards::{default_standards_root, load_registry};
use cde_validate::{EngineError, EngineOptions, FillChoices, TableOutcome, TableRun, run_table};

fn schema(table: &str) -> Arc<TableSchema> {
    let registry = load_registry(&default_standards_root()).expect("load shipped standards");
    let set = registry
        .resolve("Human", "Brain", "Bulk RNAseq", "v4.1")
        .expect("resolve");
    set.schema(table).expect("table in schema set")
}

fn validated(table: &str, text: &str, options: &EngineOptions) -> TableRun {
    match run_table(table, text.as_bytes(), &schema(table), options).expect("run table") {
        TableOutcome::Validated(run) => *run,
        TableOutcome::Skipped { reason, .. } => panic!("unexpected skip: {reason}"),
    }
}

#[test]
fn semicolon_sample_table_with_extra_column() {
    let text = concat!(
        "sample_id;subject_id;replicate;brain_region;RIN;batch_id;batch\n",
        "S1;P1;rep1;cortex;7.5;B01;b1\n",
        "S2;P1;rep2;cortex;8;B01;b1\n",
    );
    let run = validated("SAMPLE", text, &EngineOptions::default());

    assert_eq!(run.delimiter, Delimiter::Semicolon);
    assert_eq!(run.report.error_count(), 0);
    let warnings: Vec<_> = run
        .report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].column(), "batch");
    assert_eq!(warnings[0].message(), "column not part of CDE, not evaluated");

    let sanitized = run.sanitized.expect("clean table is released");
    assert_eq!(sanitized.column_names().last().map(String::as_str), Some("batch"));
}

#[test]
fn header_only_table_is_skipped() {
    let outcome = run_table(
        "STUDY",
        b"project_name,team_dataset_id\n",
        &schema("STUDY"),
        &EngineOptions::default(),
    )
    .expect("run table");
    assert!(matches!(outcome, TableOutcome::Skipped { ref table, .. } if table == "STUDY"));
}

#[test]
fn missing_required_enum_column() {
    let text = "sample_id,file_name,file_MD5\nS1,a.fastq,0123456789abcdef0123456789abcdef\n";
    let run = validated("DATA", text, &EngineOptions::default());

    let issues: Vec<_> = run.report.issues_for("file_type").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(issues[0].message(), "missing required column");
    assert!(run.sanitized.is_none());
}

#[test]
fn invalid_file_type_lists_expected_vocabulary() {
    let text = concat!(
        "sample_id,file_name,file_type,file_MD5\n",
        "S1,a.fastq,quality trimmed and human DNA removed,0123456789abcdef0123456789abcdef\n",
    );
    let run = validated("DATA", text, &EngineOptions::default());

    let issues: Vec<_> = run.report.issues_for("file_type").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    let Finding::InvalidValues {
        invalid_values,
        expected,
        ..
    } = &issues[0].finding
    else {
        panic!("expected invalid values finding");
    };
    assert_eq!(invalid_values, &["quality trimmed and human DNA removed"]);
    assert_eq!(expected, &["Processed", "Unknown", "Raw", "NA", "Not Reported"]);
}

#[test]
fn runs_are_repeatable() {
    let text = "subject_id,sex,age_at_collection\nP1,male,\nP2,Female,71.5\n";
    let first = validated("SUBJECT", text, &EngineOptions::default());
    let second = validated("SUBJECT", text, &EngineOptions::default());
    assert_eq!(first.report, second.report);
    assert_eq!(first.missing, second.missing);
}

#[test]
fn fill_choice_replaces_missing_cells() {
    let text = "subject_id,sex\nP1,\nP2,Female\n";
    let options = EngineOptions {
        fill_choices: FillChoices::new().with("sex", "Not Reported"),
        ..EngineOptions::default()
    };
    let run = validated("SUBJECT", text, &options);

    assert!(run.is_clean());
    let sanitized = run.sanitized.expect("clean table is released");
    assert_eq!(
        sanitized.column("sex"),
        Some(&["Not Reported".to_string(), "Female".to_string()][..])
    );
    assert_eq!(sanitized.column("biobank_name"), Some(&["NA".to_string(), "NA".to_string()][..]));
    assert!(run.report.filled.iter().all(|summary| !summary.awaiting_choice()));
}

#[test]
fn invalid_fill_choice_is_terminal() {
    let options = EngineOptions {
        fill_choices: FillChoices::new().with("sex", "Female"),
        ..EngineOptions::default()
    };
    let error = run_table("SUBJECT", b"subject_id,sex\nP1,\n", &schema("SUBJECT"), &options).unwrap_err();
    assert!(matches!(error, EngineError::Validate { ref table, .. } if table == "SUBJECT"));
}

#[test]
fn ragged_table_is_terminal() {
    let error = run_table(
        "SAMPLE",
        b"sample_id,subject_id\nS1,P1\nS2\n",
        &schema("SAMPLE"),
        &EngineOptions::default(),
    )
    .unwrap_err();
    assert_eq!(error.table(), Some("SAMPLE"));
    assert!(
        matches!(
            error,
            EngineError::Ingest(IngestError::StructureMismatch {
                line: 3,
                expected: 2,
                found: 1,
                ..
            })
        ),
        "{error}"
    );
}

#[test]
fn single_column_tables() {
    let outcome = run_table("SAMPLE", b"sample_id\n", &schema("SAMPLE"), &EngineOptions::default())
        .expect("run table");
    assert!(matches!(outcome, TableOutcome::Skipped { .. }));

    let run = validated("SAMPLE", "sample_id\nS1\nS2\n", &EngineOptions::default());
    assert_eq!(run.delimiter, Delimiter::Comma);
    assert_eq!(run.missing.table.row_count(), 2);
    let issues: Vec<_> = run.report.issues_for("subject_id").collect();
    assert_eq!(issues[0].message(), "missing required column");
}

#[test]
fn blank_email_is_not_a_valid_address() {
    let text = concat!(
        "project_name,team_dataset_id,submitter_email,number_samples\n",
        "PD atlas,D1,,3\n",
        "PD atlas,D2,lab@example.org,4\n",
    );
    let run = validated("STUDY", text, &EngineOptions::default());

    let issues: Vec<_> = run.report.issues_for("submitter_email").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    let Finding::InvalidValues { invalid_values, .. } = &issues[0].finding else {
        panic!("expected invalid values finding");
    };
    assert_eq!(invalid_values, &["NA"]);
    assert!(run.sanitized.is_none());
}
