//! Reviewer input: fill-value choices and per-column comments.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use cde_model::TableSchema;
use cde_report::ReviewerComments;
use cde_validate::{FillChoices, fill_candidates};
use tracing::debug;

/// Reviewer comments for every table, keyed by table name.
///
/// Read from TOML with one section per table:
///
/// ```toml
/// [SAMPLE]
/// batch = "internal batch label, kept on purpose"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBook {
    tables: BTreeMap<String, ReviewerComments>,
}

impl CommentBook {
    pub fn parse(text: &str) -> Result<Self> {
        let tables: BTreeMap<String, ReviewerComments> =
            toml::from_str(text).context("parse reviewer comments")?;
        Ok(Self { tables })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read comments file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Comments for one table; section names match ignoring ASCII case.
    pub fn for_table(&self, table: &str) -> ReviewerComments {
        self.tables
            .get(table)
            .or_else(|| {
                self.tables
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(table))
                    .map(|(_, comments)| comments)
            })
            .cloned()
            .unwrap_or_default()
    }
}

/// Fill choices from `--fill` flags.
///
/// `COLUMN=VALUE` applies to every table whose column accepts the value;
/// `TABLE.COLUMN=VALUE` to one table, where a value outside the column's
/// candidates is an error. A scoped choice wins over an unscoped one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillPlan {
    all_tables: FillChoices,
    per_table: BTreeMap<String, FillChoices>,
}

impl FillPlan {
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let mut plan = Self::default();
        for spec in specs {
            let spec = spec.as_ref();
            let Some((key, value)) = spec.split_once('=') else {
                bail!("invalid --fill '{spec}': expected COLUMN=VALUE");
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("invalid --fill '{spec}': empty column name");
            }
            match key.split_once('.') {
                Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                    plan.per_table
                        .entry(table.to_string())
                        .or_default()
                        .insert(column, value);
                }
                _ => plan.all_tables.insert(key, value),
            }
        }
        Ok(plan)
    }

    /// Choices that apply to one table.
    pub fn for_table(&self, schema: &TableSchema) -> FillChoices {
        let mut choices = FillChoices::new();
        for (column, value) in self.all_tables.iter() {
            if fill_candidates(schema, column).iter().any(|candidate| candidate.as_str() == value) {
                choices.insert(column, value);
            } else {
                debug!(
                    table = %schema.name,
                    column,
                    value,
                    "unscoped fill choice does not apply to this table"
                );
            }
        }
        let scoped = self
            .per_table
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(&schema.name));
        for (_, table_choices) in scoped {
            for (column, value) in table_choices.iter() {
                choices.insert(column, value);
            }
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cde_model::{ColumnSpec, DataType};

    #[test]
    fn comments_by_table() {
        let book = CommentBook::parse(
            r#"
            [SAMPLE]
            batch = "kept on purpose"

            [subject]
            sex = "self reported"
            "#,
        )
        .expect("parse");
        assert_eq!(
            book.for_table("SAMPLE").get("batch").map(String::as_str),
            Some("kept on purpose")
        );
        assert_eq!(book.for_table("SUBJECT").len(), 1);
        assert!(book.for_table("DATA").is_empty());
    }

    fn schema(table: &str, columns: &[(&str, &[&str])]) -> TableSchema {
        let columns = columns
            .iter()
            .map(|(name, fill)| ColumnSpec {
                name: (*name).to_string(),
                display_name: (*name).to_string(),
                description: String::new(),
                data_type: DataType::String,
                required: false,
                allowed_values: Vec::new(),
                pattern: None,
                fill_values: fill.iter().map(|value| (*value).to_string()).collect(),
            })
            .collect();
        TableSchema::new(table, columns)
    }

    #[test]
    fn fill_plan_scoping() {
        let plan = FillPlan::parse(&["sex=Unknown", "SUBJECT.sex=Not Reported", "note=a=b"]).expect("parse");
        let subject = schema("SUBJECT", &[("sex", &["Unknown", "Not Reported"]), ("note", &[])]);
        let choices = plan.for_table(&subject);
        assert_eq!(choices.get("sex"), Some("Not Reported"));
        assert_eq!(choices.get("note"), None);

        let sample = schema("SAMPLE", &[("sex", &["Unknown"])]);
        assert_eq!(plan.for_table(&sample).get("sex"), Some("Unknown"));
    }

    #[test]
    fn unscoped_choices_skip_tables_that_cannot_take_them() {
        let plan = FillPlan::parse(&["cell_line=Unknown", "CELL.passage=Later"]).expect("parse");
        let sample = schema("SAMPLE", &[("cell_line", &["Not Reported", "Unknown"])]);
        let cell = schema("CELL", &[("cell_line", &[]), ("passage", &["Unknown"])]);

        assert_eq!(plan.for_table(&sample).get("cell_line"), Some("Unknown"));
        let cell_choices = plan.for_table(&cell);
        assert_eq!(cell_choices.get("cell_line"), None);
        assert_eq!(cell_choices.get("passage"), Some("Later"));
    }

    #[test]
    fn fill_plan_rejects_malformed_flags() {
        assert!(FillPlan::parse(&["sex"]).is_err());
        assert!(FillPlan::parse(&["=Unknown"]).is_err());
    }
}
