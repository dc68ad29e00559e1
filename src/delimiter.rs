//! Column delimiter resolution
//!
//! Resolved once per run; every record in that run splits on the same
//! separator.

use crate::config::Delimiter;
use tracing::trace;

/// Detection order for [`Delimiter::Auto`]
const AUTO_CANDIDATES: [&str; 3] = ["\t", ",", "|"];

const DEFAULT_SEPARATOR: &str = ",";

/// Literal separator a run splits columns on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSeparator(String);

impl FieldSeparator {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a record into its columns
    pub fn split<'a>(&'a self, record: &'a str) -> std::str::Split<'a, &'a str> {
        record.split(self.0.as_str())
    }

    /// The 0-based column of a record, or "" when the record is shorter
    pub fn column<'a>(&'a self, record: &'a str, index: usize) -> &'a str {
        self.split(record).nth(index).unwrap_or("")
    }
}

/// Resolve the configured delimiter against a sample record
///
/// The sample is the first record of the run, or "" if there is none.
pub fn resolve(delimiter: &Delimiter, sample: &str) -> FieldSeparator {
    let separator = match delimiter {
        Delimiter::Comma => ",",
        Delimiter::Tab => "\t",
        Delimiter::Pipe => "|",
        Delimiter::Custom(sep) if sep.is_empty() => DEFAULT_SEPARATOR,
        Delimiter::Custom(sep) => sep.as_str(),
        Delimiter::Auto => {
            let detected = AUTO_CANDIDATES
                .iter()
                .copied()
                .find(|candidate| sample.contains(candidate))
                .unwrap_or(DEFAULT_SEPARATOR);
            trace!(separator = ?detected, "auto-detected column delimiter");
            detected
        }
    };

    FieldSeparator(separator.to_string())
}
