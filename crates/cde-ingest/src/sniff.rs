//! Delimiter detection.
//!
//! A candidate qualifies when the header splits into more than one field
//! under it and at least half of the sampled records share the header's
//! field count. Agreement dominates the score, then width; ties go to the
//! earlier candidate. A header no candidate splits is a single-column table
//! read with commas. Rows that disagree with the chosen width are left for
//! the loader to report by line.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Number of non-empty lines inspected.
pub const SNIFF_SAMPLE_LINES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Candidates in preference order.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
        }
    }

    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::CANDIDATES
            .into_iter()
            .find(|candidate| candidate.as_byte() == byte)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the delimiter of decoded table text.
pub fn sniff(table: &str, text: &str) -> Result<Delimiter> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let sampled: Vec<&str> = lines.by_ref().take(SNIFF_SAMPLE_LINES).collect();
    if sampled.is_empty() {
        return Err(IngestError::EmptyTable {
            table: table.to_string(),
        });
    }
    let truncated = lines.next().is_some();
    let sample = sampled.join("\n");

    let mut best: Option<(Delimiter, (usize, usize))> = None;
    let mut header_splits = false;
    for candidate in Delimiter::CANDIDATES {
        let Some(widths) = record_widths(&sample, candidate, truncated) else {
            continue;
        };
        let Some((&header, _)) = widths.split_first() else {
            continue;
        };
        if header < 2 {
            continue;
        }
        header_splits = true;
        let agreeing = widths.iter().filter(|&&width| width == header).count();
        if agreeing * 2 < widths.len() {
            debug!(
                table = %table,
                delimiter = %candidate,
                agreeing,
                records = widths.len(),
                "inconsistent delimiter candidate"
            );
            continue;
        }
        // Per-mille agreement first, then width.
        let score = (agreeing * 1000 / widths.len(), header);
        debug!(
            table = %table,
            delimiter = %candidate,
            width = header,
            agreeing,
            "delimiter candidate"
        );
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((delimiter, _)) => Ok(delimiter),
        None if !header_splits => {
            debug!(table = %table, "no delimiter splits the header, reading a single column");
            Ok(Delimiter::Comma)
        }
        None => Err(IngestError::UnparsableDelimiter {
            table: table.to_string(),
        }),
    }
}

/// Field count of every sampled record, header first.
///
/// When the sample was cut short, the final record may be an incomplete
/// quoted field and is ignored.
fn record_widths(sample: &str, delimiter: Delimiter, truncated: bool) -> Option<Vec<usize>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(sample.as_bytes());
    let mut widths = Vec::new();
    for record in reader.records() {
        widths.push(record.ok()?.len());
    }
    if truncated && widths.len() > 1 {
        widths.pop();
    }
    Some(widths)
}
