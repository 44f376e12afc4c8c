//! Sanitized table output.

use std::io::Write;

use anyhow::{Context, Result};
use cde_ingest::Delimiter;
use cde_model::RawTable;

/// Write a table with its header, using the upload's delimiter.
pub fn write_sanitized<W: Write>(writer: W, table: &RawTable, delimiter: Delimiter) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer);
    writer
        .write_record(table.column_names())
        .context("write sanitized header")?;
    for (index, row) in table.rows().enumerate() {
        writer
            .write_record(&row)
            .with_context(|| format!("write sanitized row {}", index + 1))?;
    }
    writer.flush().context("flush sanitized table")?;
    Ok(())
}

/// [`write_sanitized`] into memory.
pub fn sanitized_bytes(table: &RawTable, delimiter: Delimiter) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_sanitized(&mut buffer, table, delimiter)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_delimiter() {
        let table = RawTable::from_rows(
            vec!["sample_id".to_string(), "RIN".to_string()],
            vec![vec!["S1".to_string(), "7,5".to_string()]],
        )
        .expect("table");
        let bytes = sanitized_bytes(&table, Delimiter::Semicolon).expect("write");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "sample_id;RIN\nS1;7,5\n");

        let bytes = sanitized_bytes(&table, Delimiter::Comma).expect("write");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "sample_id,RIN\nS1,\"7,5\"\n");
    }
}
