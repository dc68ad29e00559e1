//! Sort key extraction

use crate::config::{SortConfig, SortMode};
use crate::delimiter::{self, FieldSeparator};
use std::borrow::Cow;

/// Width length keys are zero-padded to, so their string order is numeric
pub const LENGTH_KEY_WIDTH: usize = 10;

/// Case-fold a value unless the run is case sensitive
pub fn fold(value: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.to_lowercase())
    }
}

/// Per-run key extractor
///
/// For column mode the delimiter is resolved once, from the first record,
/// when the extractor is built.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    kind: KeyKind,
    case_sensitive: bool,
}

#[derive(Debug, Clone)]
enum KeyKind {
    Whole,
    Length,
    Column {
        index: usize,
        separator: FieldSeparator,
    },
}

impl KeyExtractor {
    pub fn new(config: &SortConfig, records: &[&str]) -> Self {
        let kind = match &config.mode {
            SortMode::Alphabetical { .. } | SortMode::Numeric => KeyKind::Whole,
            SortMode::ByLength => KeyKind::Length,
            SortMode::ByColumn {
                column, delimiter, ..
            } => {
                let sample = records.first().copied().unwrap_or("");
                KeyKind::Column {
                    index: (*column).max(1) - 1,
                    separator: delimiter::resolve(delimiter, sample),
                }
            }
        };

        Self {
            kind,
            case_sensitive: config.case_sensitive,
        }
    }

    /// Comparison key for one record
    ///
    /// Length keys count UTF-16 code units, so a character outside the
    /// Basic Multilingual Plane counts as two.
    pub fn extract(&self, record: &str) -> String {
        match &self.kind {
            KeyKind::Whole => fold(record, self.case_sensitive).into_owned(),
            KeyKind::Length => format!(
                "{:0width$}{}",
                record.encode_utf16().count(),
                fold(record, self.case_sensitive),
                width = LENGTH_KEY_WIDTH
            ),
            KeyKind::Column { index, separator } => {
                fold(separator.column(record, *index), self.case_sensitive).into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{presets, Delimiter};

    #[test]
    fn test_whole_line_key_folds_case() {
        let config = SortConfig::default();
        let extractor = KeyExtractor::new(&config, &[]);
        assert_eq!(extractor.extract("Hello World"), "hello world");

        let config = config.with_case_sensitive(true);
        let extractor = KeyExtractor::new(&config, &[]);
        assert_eq!(extractor.extract("Hello World"), "Hello World");
    }

    #[test]
    fn test_length_key() {
        let extractor = KeyExtractor::new(&presets::by_length(), &[]);
        assert_eq!(extractor.extract("Ab"), "0000000002ab");
        assert_eq!(extractor.extract(""), "0000000000");
        assert_eq!(extractor.extract("ñé"), "0000000002ñé");
    }

    #[test]
    fn test_length_key_counts_utf16_units() {
        let extractor = KeyExtractor::new(&presets::by_length(), &[]);
        assert_eq!(extractor.extract("😀"), "0000000002😀");
        assert_eq!(extractor.extract("a😀"), "0000000003a😀");
    }

    #[test]
    fn test_column_key() {
        let extractor = KeyExtractor::new(&presets::csv_column(2), &["b,2"]);
        assert_eq!(extractor.extract("b,2"), "2");
        assert_eq!(extractor.extract("a,X,9"), "x");
        assert_eq!(extractor.extract("lonely"), "");
    }

    #[test]
    fn test_column_zero_is_first_column() {
        let config = SortConfig::default().with_mode(SortMode::ByColumn {
            column: 0,
            numeric: false,
            natural: false,
            delimiter: Delimiter::Comma,
        });
        let extractor = KeyExtractor::new(&config, &[]);
        assert_eq!(extractor.extract("first,second"), "first");
    }

    #[test]
    fn test_unnormalized_column_zero_still_clamped() {
        let mut config = SortConfig::default();
        config.mode = SortMode::ByColumn {
            column: 0,
            numeric: false,
            natural: false,
            delimiter: Delimiter::Pipe,
        };
        let extractor = KeyExtractor::new(&config, &[]);
        assert_eq!(extractor.extract("a|b"), "a");
    }

    #[test]
    fn test_auto_delimiter_sampled_from_first_record() {
        let config = SortConfig::default().with_mode(SortMode::column(2));
        let extractor = KeyExtractor::new(&config, &["x\ty", "p,q"]);
        assert_eq!(extractor.extract("x\ty"), "y");
        // Later records split on the same separator
        assert_eq!(extractor.extract("p,q"), "");
    }
}
