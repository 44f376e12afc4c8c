//! Markdown validation log.

use cde_model::{DataType, FillSummary, Finding, Issue, ValidationReport};

use crate::common::{ReportContext, quote_list};

/// Width of the divider that closes every report.
pub const DIVIDER_WIDTH: usize = 60;

/// Render the validation log for one table.
///
/// Sections: header, summary, per-column issues in report order, filled
/// cells. The output ends with a divider line.
pub fn render_markdown(report: &ValidationReport, context: &ReportContext) -> String {
    let mut lines = vec![
        format!("# Validation report: {}", report.table),
        String::new(),
        format!("- CDE version: {}", context.cde_version),
    ];
    if let Some(sha256) = &context.cde_sha256 {
        lines.push(format!("- CDE source SHA-256: `{sha256}`"));
    }
    lines.push(format!("- Delimiter: {}", context.delimiter));

    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    let result = if report.is_clean() { "PASS" } else { "FAIL" };
    lines.push(format!("- Result: {result}"));
    lines.push(format!("- Errors: {}", report.error_count()));
    lines.push(format!("- Warnings: {}", report.warning_count()));
    lines.push(format!("- Valid columns: {}", report.success_count()));
    lines.push(format!("- Filled cells: {}", report.filled_cell_count()));

    lines.push(String::new());
    lines.push("## Columns".to_string());
    lines.push(String::new());
    if report.issues.is_empty() {
        lines.push("No columns checked.".to_string());
    }
    for issue in &report.issues {
        push_issue(&mut lines, issue);
    }

    lines.push(String::new());
    lines.push("## Missing values".to_string());
    lines.push(String::new());
    if report.filled.is_empty() {
        lines.push("No missing values.".to_string());
    }
    for summary in &report.filled {
        lines.push(fill_line(summary));
    }

    lines.push(String::new());
    lines.push("-".repeat(DIVIDER_WIDTH));
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn push_issue(lines: &mut Vec<String>, issue: &Issue) {
    lines.push(format!(
        "- [{}] `{}`: {}",
        issue.severity.tag(),
        issue.column(),
        issue.message()
    ));
    if let Finding::InvalidValues {
        data_type,
        invalid_values,
        expected,
        ..
    } = &issue.finding
    {
        lines.push(format!("  - Invalid values: {}", quote_list(invalid_values)));
        lines.push(format!("  - Expected: {}", expected_text(*data_type, expected)));
    }
}

fn expected_text(data_type: DataType, expected: &[String]) -> String {
    let (rule, fill_values) = match data_type {
        DataType::Enum => return quote_list(expected),
        DataType::Regex => match expected.split_first() {
            Some((pattern, fill_values)) => (format!("values matching /{pattern}/"), fill_values),
            None => ("values matching the column pattern".to_string(), expected),
        },
        DataType::Integer | DataType::Float | DataType::String => {
            (format!("{data_type} values"), expected)
        }
    };
    if fill_values.is_empty() {
        rule
    } else {
        format!("{rule}, or one of {}", quote_list(fill_values))
    }
}

fn fill_line(summary: &FillSummary) -> String {
    let cells = if summary.cells == 1 { "cell" } else { "cells" };
    let mut line = format!(
        "- `{}`: {} {cells} filled with `{}`",
        summary.column, summary.cells, summary.replacement
    );
    if summary.chosen {
        line.push_str(" (reviewer choice)");
    } else if summary.awaiting_choice() {
        line.push_str(&format!("; choose from {}", quote_list(&summary.candidates)));
    }
    line
}
