//! Byte decoding with encoding fallback.

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::warn;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decoded table text with `\n` line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
    pub had_bom: bool,
}

impl DecodedText {
    pub fn used_fallback(&self) -> bool {
        self.encoding != UTF_8.name()
    }
}

/// Decode uploaded bytes: UTF-8 (BOM stripped) first, then Windows-1252.
///
/// UTF-16 and binary content are rejected.
pub fn decode(table: &str, bytes: &[u8]) -> Result<DecodedText> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnreadableEncoding {
            table: table.to_string(),
            reason: "UTF-16 is not supported".to_string(),
        });
    }
    if bytes.contains(&0) {
        return Err(IngestError::UnreadableEncoding {
            table: table.to_string(),
            reason: "binary content".to_string(),
        });
    }

    let had_bom = bytes.starts_with(UTF8_BOM);
    let body = if had_bom {
        &bytes[UTF8_BOM.len()..]
    } else {
        bytes
    };

    let (text, encoding) = match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => (text.into_owned(), UTF_8.name()),
        None => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
            warn!(table = %table, "input is not valid UTF-8, decoded as windows-1252");
            (text.into_owned(), WINDOWS_1252.name())
        }
    };

    Ok(DecodedText {
        text: normalize_line_endings(&text),
        encoding,
        had_bom,
    })
}

fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
