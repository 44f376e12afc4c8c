//! Metadata table ingestion.
//!
//! Turns the raw bytes of an uploaded table into a [`RawTable`]:
//!
//! - **Decoding**: UTF-8 (with or without BOM) with a Windows-1252 fallback
//! - **Delimiter sniffing**: comma, semicolon, tab or pipe, independent of
//!   the file extension
//! - **Loading**: header parsing, template helper-row stripping and
//!   structural checks
//!
//! # Example
//!
//! ```ignore
//! use cde_ingest::{ingest_bytes, table_name_from_path};
//!
//! let path = std::path::Path::new("uploads/SAMPLE.csv");
//! let name = table_name_from_path(path);
//! let loaded = ingest_bytes(&name, &std::fs::read(path)?)?;
//! println!("{} rows, delimiter {}", loaded.table.row_count(), loaded.delimiter);
//! ```

mod decode;
mod error;
mod loader;
mod naming;
mod sniff;

use cde_model::RawTable;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use decode::{DecodedText, decode};

// === Delimiter Sniffing ===
pub use sniff::{Delimiter, SNIFF_SAMPLE_LINES, sniff};

// === Loading ===
pub use loader::{HELPER_ROW_COUNT, LoadedRows, load};
pub use naming::table_name_from_path;

/// A table ready for missing-value resolution and validation.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub name: String,
    pub table: RawTable,
    pub delimiter: Delimiter,
    pub encoding: &'static str,
    pub helper_rows_stripped: bool,
    /// Non-fatal observations made while reading, such as encoding fallbacks.
    pub warnings: Vec<String>,
}

/// Decode, sniff and load one table.
pub fn ingest_bytes(name: &str, bytes: &[u8]) -> Result<LoadedTable> {
    let decoded = decode(name, bytes)?;
    let mut warnings = Vec::new();
    if decoded.used_fallback() {
        warnings.push(format!(
            "file is not valid UTF-8; decoded as {}",
            decoded.encoding
        ));
    }
    let delimiter = sniff(name, &decoded.text)?;
    let loaded = load(name, &decoded.text, delimiter)?;
    if loaded.dropped_index_column {
        warnings.push("dropped unnamed leading index column".to_string());
    }
    Ok(LoadedTable {
        name: name.to_string(),
        table: loaded.table,
        delimiter,
        encoding: decoded.encoding,
        helper_rows_stripped: loaded.helper_rows_stripped,
        warnings,
    })
}

/// Read a file from disk and ingest it under the table name derived from its path.
pub fn ingest_file(path: &std::path::Path) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_bytes(&table_name_from_path(path), &bytes)
}
