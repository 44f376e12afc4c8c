//! Reviewer comments artifact.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use cde_model::ValidationReport;

/// Reviewer notes for one table, keyed by column.
pub type ReviewerComments = BTreeMap<String, String>;

/// Render non-empty reviewer notes as a `column,comment` CSV.
///
/// Columns appear in report order, then any other commented columns
/// alphabetically. Returns `None` when there is nothing to write.
pub fn render_comments_csv(
    report: &ValidationReport,
    comments: &ReviewerComments,
) -> Result<Option<String>> {
    let mut ordered: Vec<(&str, &str)> = Vec::new();
    for issue in &report.issues {
        let column = issue.column();
        if ordered.iter().any(|(seen, _)| *seen == column) {
            continue;
        }
        if let Some(note) = comments.get(column).filter(|note| !note.trim().is_empty()) {
            ordered.push((column, note.trim()));
        }
    }
    for (column, note) in comments {
        let note = note.trim();
        if note.is_empty() || ordered.iter().any(|(seen, _)| *seen == column.as_str()) {
            continue;
        }
        ordered.push((column.as_str(), note));
    }
    if ordered.is_empty() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer
            .write_record(["column", "comment"])
            .context("write comments header")?;
        for (column, note) in ordered {
            writer
                .write_record([column, note])
                .with_context(|| format!("write comment for {column}"))?;
        }
        writer.flush().context("flush comments")?;
    }
    String::from_utf8(buffer)
        .map(Some)
        .context("comments are not UTF-8")
}
