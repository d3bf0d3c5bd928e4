//! Delimited tabular text parsing.
//!
//! The import format is header-first delimited text, tab-separated for the
//! catalog dataset. Parsing is all-or-nothing per batch: any structural
//! problem fails the whole batch and no records are returned. Per-field
//! validation does not happen here, the normalizer handles that row by row
//! and is independently tolerant.

use std::collections::HashMap;
use thiserror::Error;

/// Field delimiter used by the catalog import format.
pub const FIELD_DELIMITER: char = '\t';

/// Structural errors in a tabular batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no header row found in input")]
    MissingHeader,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// One data row: trimmed header name mapped to the raw cell content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the source text, for diagnostics.
    pub line: usize,
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// The raw cell under `header`, or `""` when the header is unknown.
    pub fn field(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }
}

/// Parse header-first delimited text into ordered records.
///
/// The first non-blank line names the fields; header names are trimmed, cell
/// contents are kept raw. Blank lines are skipped. Every data row must have
/// exactly as many fields as the header row.
pub fn parse(text: &str, delimiter: char) -> Result<Vec<RawRecord>, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(ParseError::MissingHeader)?;
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|header| header.trim().to_owned())
        .collect();

    let mut records = Vec::new();
    for (line, raw) in lines {
        let cells: Vec<&str> = raw.split(delimiter).collect();
        if cells.len() != headers.len() {
            return Err(ParseError::RaggedRow {
                line,
                expected: headers.len(),
                found: cells.len(),
            });
        }
        let fields = headers
            .iter()
            .cloned()
            .zip(cells.iter().map(|cell| (*cell).to_owned()))
            .collect();
        records.push(RawRecord { line, fields });
    }
    Ok(records)
}
