//! Properties of missing-value resolution.

use cde_model::{ColumnSpec, DataType, MISSING_TOKEN, RawTable, TableSchema, ValidationPolicy};
use cde_validate::{FillChoices, apply_fill_choices, is_missing, resolve, validate_table};
use proptest::prelude::*;

const FILL_VALUES: [&str; 2] = ["Not Reported", "Unknown"];

fn schema() -> TableSchema {
    let column = |name: &str, data_type: DataType, fill: &[&str]| ColumnSpec {
        name: name.to_string(),
        display_name: name.to_string(),
        description: String::new(),
        data_type,
        required: false,
        allowed_values: Vec::new(),
        pattern: None,
        fill_values: fill.iter().map(|value| (*value).to_string()).collect(),
    };
    TableSchema::new(
        "SUBJECT",
        vec![
            column("biobank_name", DataType::String, &FILL_VALUES),
            column("age", DataType::Float, &FILL_VALUES),
            column("notes", DataType::String, &[]),
        ],
    )
}

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        Just("nan".to_string()),
        Just("None".to_string()),
        Just("N/A".to_string()),
        Just("NA".to_string()),
        "[0-9]{1,3}",
    ]
}

proptest! {
    #[test]
    fn resolved_cells_are_never_empty(
        rows in prop::collection::vec((cell(), cell(), cell()), 1..20),
        choose in prop::option::of(prop::sample::select(vec!["Not Reported", "Unknown", "NA"])),
    ) {
        let schema = schema();
        let table = RawTable::from_rows(
            vec!["biobank_name".to_string(), "age".to_string(), "notes".to_string()],
            rows.into_iter().map(|(a, b, c)| vec![a, b, c]).collect(),
        )
        .expect("table");

        let mut resolution = resolve(table, &schema);
        if let Some(value) = choose {
            let choices = FillChoices::new().with("biobank_name", value).with("age", value);
            apply_fill_choices(&mut resolution, &choices).expect("choice is a candidate");
        }

        for (name, cells) in resolution.table.columns() {
            let spec = schema.column(name).expect("schema column");
            for cell in cells {
                prop_assert!(!is_missing(cell));
                prop_assert!(
                    cell == MISSING_TOKEN
                        || spec.is_fill_value(cell)
                        || cell.chars().all(|c| c.is_ascii_digit()),
                    "unexpected cell {:?} in {}", cell, name
                );
            }
        }
        for record in &resolution.records {
            prop_assert!(
                record.replacement == MISSING_TOKEN || FILL_VALUES.contains(&record.replacement.as_str())
            );
            if !record.candidates.is_empty() {
                prop_assert!(record.candidates.contains(&record.replacement));
            }
        }

        let issues = validate_table(&schema, &resolution.table, &ValidationPolicy::default());
        prop_assert!(issues.iter().all(|issue| !issue.is_error()));
    }
}
