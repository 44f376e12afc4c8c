//! Blank table templates.
//!
//! A template holds the header row followed by the helper rows the loader
//! strips on upload: description, data type, required flag, validation rule
//! and fill values.

use anyhow::{Context, Result};
use cde_model::{ColumnSpec, DataType, TableSchema};

/// Validation cell for one column: the allowed list for Enum columns,
/// `Validation:<Type>` otherwise.
fn validation_cell(spec: &ColumnSpec) -> Result<String> {
    match spec.data_type {
        DataType::Enum => serde_json::to_string(&spec.allowed_values)
            .with_context(|| format!("encode allowed values of {}", spec.name)),
        data_type => Ok(format!("Validation:{data_type}")),
    }
}

fn required_flag(spec: &ColumnSpec) -> &'static str {
    if spec.required { "Required" } else { "Optional" }
}

/// Comma-delimited template for one table.
pub fn render_template(schema: &TableSchema) -> Result<String> {
    let columns = &schema.columns;
    let mut validation = Vec::with_capacity(columns.len());
    let mut fill_values = Vec::with_capacity(columns.len());
    for spec in columns {
        validation.push(validation_cell(spec)?);
        fill_values.push(
            serde_json::to_string(&spec.fill_values)
                .with_context(|| format!("encode fill values of {}", spec.name))?,
        );
    }
    let rows: [Vec<String>; 6] = [
        columns.iter().map(|spec| spec.name.clone()).collect(),
        columns.iter().map(|spec| spec.description.clone()).collect(),
        columns
            .iter()
            .map(|spec| spec.data_type.as_str().to_string())
            .collect(),
        columns
            .iter()
            .map(|spec| required_flag(spec).to_string())
            .collect(),
        validation,
        fill_values,
    ];

    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for row in &rows {
            writer
                .write_record(row)
                .with_context(|| format!("write template for {}", schema.name))?;
        }
        writer.flush().context("flush template")?;
    }
    String::from_utf8(buffer).context("template is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, data_type: DataType, required: bool) -> ColumnSpec {
        ColumnSpec {
            name: name.to_string(),
            display_name: name.to_string(),
            description: format!("{name} description"),
            data_type,
            required,
            allowed_values: Vec::new(),
            pattern: None,
            fill_values: Vec::new(),
        }
    }

    #[test]
    fn template_rows() {
        let mut sex = column("sex", DataType::Enum, true);
        sex.allowed_values = vec!["Male".to_string(), "Female".to_string()];
        sex.fill_values = vec!["Unknown".to_string()];
        let schema = TableSchema::new(
            "SUBJECT",
            vec![column("subject_id", DataType::String, true), sex, column("age", DataType::Float, false)],
        );

        let rendered = render_template(&schema).expect("render");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "subject_id,sex,age");
        assert_eq!(lines[2], "String,Enum,Float");
        assert_eq!(lines[3], "Required,Required,Optional");
        assert_eq!(lines[4], r#"Validation:String,"[""Male"",""Female""]",Validation:Float"#);
        assert_eq!(lines[5], r#"[],"[""Unknown""]",[]"#);
    }
}
