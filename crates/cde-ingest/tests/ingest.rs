//! Integration tests for table ingestion.

use std::fs;

use cde_ingest::{Delimiter, IngestError, ingest_bytes, ingest_file, sniff};
use proptest::prelude::*;

fn render(rows: &[Vec<String>], delimiter: Delimiter) -> String {
    let separator = delimiter.as_char().to_string();
    let mut text = String::new();
    for row in rows {
        text.push_str(&row.join(&separator));
        text.push('\n');
    }
    text
}

fn table_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    (2usize..6, 1usize..8).prop_flat_map(|(width, height)| {
        prop::collection::vec(
            prop::collection::vec("[a-zA-Z0-9]{1,8}", width..=width),
            height + 1..=height + 1,
        )
    })
}

proptest! {
    #[test]
    fn sniffs_the_delimiter_it_was_written_with(
        rows in table_strategy(),
        delimiter in prop::sample::select(vec![
            Delimiter::Comma,
            Delimiter::Semicolon,
            Delimiter::Tab,
        ]),
    ) {
        let text = render(&rows, delimiter);
        prop_assert_eq!(sniff("T", &text).expect("sniff"), delimiter);
    }
}

#[test]
fn semicolon_file_with_csv_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("SAMPLE.csv");
    fs::write(
        &path,
        "sample_id;subject_id;RIN\r\nS1;P1;7,5\r\nS2;P1;8,0\r\n",
    )
    .expect("write table");

    let loaded = ingest_file(&path).expect("ingest");
    assert_eq!(loaded.name, "SAMPLE");
    assert_eq!(loaded.delimiter, Delimiter::Semicolon);
    assert_eq!(loaded.table.row_count(), 2);
    assert_eq!(
        loaded.table.column("RIN"),
        Some(&["7,5".to_string(), "8,0".to_string()][..])
    );
    assert!(loaded.warnings.is_empty());
}

#[test]
fn header_only_file_is_empty_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("STUDY.tsv");
    fs::write(&path, "project_name\tteam_dataset_id\n").expect("write table");

    let error = ingest_file(&path).unwrap_err();
    assert!(error.is_empty_table());
    assert_eq!(error.table(), Some("STUDY"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("DATA.csv");
    assert!(matches!(
        ingest_file(&path),
        Err(IngestError::FileRead { path: reported, .. }) if reported == path
    ));
}

#[test]
fn windows_1252_input_is_loaded_with_warning() {
    let loaded = ingest_bytes("SUBJECT", b"subject_id,site\nP1,Z\xFCrich\n").expect("ingest");
    assert_eq!(loaded.encoding, "windows-1252");
    assert_eq!(
        loaded.table.column("site"),
        Some(&["Z\u{fc}rich".to_string()][..])
    );
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].contains("windows-1252"));
}

#[test]
fn index_column_is_dropped_with_warning() {
    let loaded = ingest_bytes("DATA", b"Unnamed: 0,sample_id,file_name\n0,S1,a.fastq\n").expect("ingest");
    assert_eq!(loaded.table.column_names(), &["sample_id".to_string(), "file_name".to_string()][..]);
    assert_eq!(loaded.warnings, vec!["dropped unnamed leading index column".to_string()]);
}
