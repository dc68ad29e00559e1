//! The sort pipeline: normalize, deduplicate, extract keys, order, join.
//!
//! Every entry point here is a pure function of its inputs. Nothing is
//! retained between calls, so callers may run it on every keystroke or from
//! several threads at once.

use crate::config::SortConfig;
use crate::dedup::dedup;
use crate::normalize::{normalize, Normalized};
use crate::ordering::{first_disorder, order};
use tracing::{debug, instrument};

/// Counts reported alongside the sorted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortStats {
    /// Lines in the raw input, before any filtering
    pub input_line_count: usize,
    pub output_line_count: usize,
    /// Records left after filtering and deduplication
    pub unique_count: usize,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortOutcome {
    /// Sorted records joined with `\n`, no trailing newline
    pub output: String,
    pub stats: SortStats,
}

/// Filtered and deduplicated records, ready to order
fn collect_records<'a>(raw: &'a str, config: &SortConfig) -> Normalized<'a> {
    let mut normalized = normalize(raw, config.trim_lines, config.remove_empty_lines);
    debug!(
        input_lines = normalized.input_line_count,
        records = normalized.records.len(),
        "normalized input"
    );

    if config.remove_duplicates {
        let before = normalized.records.len();
        normalized.records = dedup(normalized.records, config.case_sensitive);
        debug!(
            removed = before - normalized.records.len(),
            "removed duplicate records"
        );
    }

    normalized
}

/// Sort a block of text
///
/// Total over all inputs: empty or whitespace-only text yields empty output
/// and zeroed statistics, unparseable numbers fall back to string order and
/// missing columns become empty keys.
#[instrument(level = "debug", skip(raw), fields(bytes = raw.len(), mode = %config.mode))]
pub fn run(raw: &str, config: &SortConfig) -> SortOutcome {
    if raw.trim().is_empty() {
        return SortOutcome::default();
    }

    let normalized = collect_records(raw, config);
    let sorted = order(&normalized.records, config);

    let stats = SortStats {
        input_line_count: normalized.input_line_count,
        output_line_count: sorted.len(),
        unique_count: sorted.len(),
    };
    debug!(?stats, "sort finished");

    SortOutcome {
        output: sorted.join("\n"),
        stats,
    }
}

/// Verify that text is already in the configured order
///
/// Records are normalized (and deduplicated, if enabled) first. On disorder
/// the 1-based record number of the first out-of-order record is returned.
pub fn check(raw: &str, config: &SortConfig) -> Result<(), usize> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    let normalized = collect_records(raw, config);
    match first_disorder(&normalized.records, config) {
        Some(idx) => {
            debug!(record = idx + 1, "input is out of order");
            Err(idx + 1)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{presets, Delimiter, SortConfigBuilder, SortMode, SortOrder};

    fn lines(outcome: &SortOutcome) -> Vec<&str> {
        if outcome.output.is_empty() {
            Vec::new()
        } else {
            outcome.output.split('\n').collect()
        }
    }

    #[test]
    fn test_basic_alphabetical() {
        let outcome = run("zebra\napple\nbanana\ncherry", &SortConfig::default());
        assert_eq!(outcome.output, "apple\nbanana\ncherry\nzebra");
        assert_eq!(outcome.stats.input_line_count, 4);
        assert_eq!(outcome.stats.output_line_count, 4);
        assert_eq!(outcome.stats.unique_count, 4);
    }

    #[test]
    fn test_empty_input_any_config() {
        let configs = [
            SortConfig::default(),
            presets::numeric(),
            presets::by_length(),
            presets::csv_column(3),
            SortConfigBuilder::new()
                .keep_whitespace()
                .keep_empty_lines()
                .unique()
                .reverse()
                .build(),
        ];
        for config in &configs {
            let outcome = run("", config);
            assert_eq!(outcome.output, "");
            assert_eq!(outcome.stats, SortStats::default());
        }
    }

    #[test]
    fn test_whitespace_only_input() {
        let outcome = run("  \n\t\n", &SortConfig::default());
        assert_eq!(outcome, SortOutcome::default());
    }

    #[test]
    fn test_natural_order() {
        let outcome = run("item2\nitem10\nitem1", &presets::natural());
        assert_eq!(lines(&outcome), vec!["item1", "item2", "item10"]);

        let outcome = run("item2\nitem10\nitem1", &SortConfig::default());
        assert_eq!(lines(&outcome), vec!["item1", "item10", "item2"]);
    }

    #[test]
    fn test_column_extraction() {
        let config = SortConfig::default().with_mode(SortMode::ByColumn {
            column: 2,
            numeric: true,
            natural: false,
            delimiter: Delimiter::Comma,
        });
        let outcome = run("b,2\na,10\nc,1", &config);
        assert_eq!(lines(&outcome), vec!["c,1", "b,2", "a,10"]);
    }

    #[test]
    fn test_column_beyond_range_sorts_as_empty() {
        let config = SortConfig::default().with_mode(SortMode::ByColumn {
            column: 3,
            numeric: false,
            natural: false,
            delimiter: Delimiter::Comma,
        });
        let outcome = run("a,b,z\nshort\nc,d,m", &config);
        assert_eq!(lines(&outcome), vec!["short", "c,d,m", "a,b,z"]);
    }

    #[test]
    fn test_length_sort_tiebreak() {
        let outcome = run("bb\na\ncc\nb", &presets::by_length());
        assert_eq!(lines(&outcome), vec!["a", "b", "bb", "cc"]);
    }

    #[test]
    fn test_length_sort_counts_utf16_units() {
        let outcome = run("😀\nab\nb", &presets::by_length());
        assert_eq!(lines(&outcome), vec!["b", "ab", "😀"]);
    }

    #[test]
    fn test_noop_config_round_trip() {
        let config = SortConfigBuilder::new()
            .keep_whitespace()
            .keep_empty_lines()
            .build();
        let input = "alpha\nbeta\ngamma\nomega";
        assert_eq!(run(input, &config).output, input);
    }

    #[test]
    fn test_case_sensitivity_in_dedup() {
        let insensitive = presets::unique();
        let outcome = run("Apple\napple", &insensitive);
        assert_eq!(lines(&outcome), vec!["Apple"]);
        assert_eq!(outcome.stats.input_line_count, 2);
        assert_eq!(outcome.stats.unique_count, 1);

        let sensitive = presets::unique().with_case_sensitive(true);
        let outcome = run("Apple\napple", &sensitive);
        assert_eq!(outcome.stats.output_line_count, 2);
    }

    #[test]
    fn test_all_duplicates_collapse() {
        let outcome = run("x\nx\nx\nx", &presets::unique());
        assert_eq!(outcome.output, "x");
        assert_eq!(outcome.stats.input_line_count, 4);
        assert_eq!(outcome.stats.output_line_count, 1);
    }

    #[test]
    fn test_dedup_monotonic() {
        let inputs = [
            "a\nb\na",
            "one\n\n two \ntwo\nONE",
            "1\n2\n3",
            "dup\ndup",
        ];
        for input in inputs {
            let outcome = run(input, &presets::unique());
            assert!(outcome.stats.output_line_count <= outcome.stats.input_line_count);
        }
        let outcome = run("a\nb\na", &presets::unique());
        assert!(outcome.stats.output_line_count < outcome.stats.input_line_count);
    }

    #[test]
    fn test_idempotent_ordering() {
        let configs = [
            SortConfig::default(),
            presets::natural(),
            presets::numeric().with_order(SortOrder::Descending),
            presets::by_length(),
            presets::csv_column(2),
        ];
        let input = "b,2\nitem10,7\nA,1\nitem2,10\nx,abc\n  c,3 \n\nb,2";
        for config in &configs {
            let once = run(input, config).output;
            let twice = run(&once, config).output;
            assert_eq!(once, twice, "not idempotent for {config:?}");
        }
    }

    #[test]
    fn test_descending() {
        let outcome = run("1\n3\n2", &presets::numeric().with_order(SortOrder::Descending));
        assert_eq!(outcome.output, "3\n2\n1");
    }

    #[test]
    fn test_keep_empty_lines_counts_them() {
        let config = SortConfigBuilder::new().keep_empty_lines().build();
        let outcome = run("b\n\na", &config);
        assert_eq!(lines(&outcome), vec!["", "a", "b"]);
        assert_eq!(outcome.stats.output_line_count, 3);
    }

    #[test]
    fn test_crlf_input() {
        let outcome = run("b\r\na\r\n", &SortConfig::default());
        assert_eq!(outcome.output, "a\nb");
        assert_eq!(outcome.stats.input_line_count, 3);
    }

    #[test]
    fn test_check() {
        assert_eq!(check("a\nb\nc", &SortConfig::default()), Ok(()));
        assert_eq!(check("a\nc\nb", &SortConfig::default()), Err(3));
        assert_eq!(check("", &presets::numeric()), Ok(()));
        assert_eq!(check("2\n10", &presets::numeric()), Ok(()));
        assert_eq!(check("10\n2", &presets::numeric()), Err(2));
    }

    #[test]
    fn test_check_accepts_run_output() {
        let config = presets::natural().with_remove_duplicates(true);
        let outcome = run("f10\nf2\nF2\nf1", &config);
        assert_eq!(check(&outcome.output, &config), Ok(()));
    }
}
