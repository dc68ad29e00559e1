//! Ordering engine: numeric, natural or collated comparison over
//! pre-extracted keys, with direction applied last.

use crate::config::{SortConfig, SortMode};
use crate::key::KeyExtractor;
use crate::locale;
use crate::natural::{natural_compare, natural_compare_tokenized, token_ends};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Record count at which key extraction and sorting go parallel
pub const PARALLEL_THRESHOLD: usize = 8192;

/// A record with its comparison data computed up front
#[derive(Debug, Clone)]
pub struct SortableRecord<'a> {
    pub text: &'a str,
    pub key: String,
    /// Digit/non-digit run boundaries of `key`, only for natural comparison
    pub natural_tokens: Option<Vec<usize>>,
    /// Parsed key, only for modes that compare numerically first
    pub numeric_value: Option<f64>,
}

/// Comparison policy for one run
#[derive(Debug, Clone, Copy)]
pub struct RecordComparator {
    numeric_first: bool,
    natural: bool,
    descending: bool,
}

impl RecordComparator {
    pub fn new(config: &SortConfig) -> Self {
        let numeric_first = match config.mode {
            SortMode::Numeric => true,
            SortMode::ByColumn { numeric, .. } => numeric,
            SortMode::Alphabetical { .. } | SortMode::ByLength => false,
        };

        Self {
            numeric_first,
            natural: config.natural_sort(),
            descending: config.is_descending(),
        }
    }

    /// Whether keys need a parsed numeric value
    pub fn wants_numeric(&self) -> bool {
        self.numeric_first
    }

    /// Whether keys need their natural-sort tokens
    pub fn wants_natural(&self) -> bool {
        self.natural
    }

    /// Compare two records, direction included
    #[inline]
    pub fn compare(&self, a: &SortableRecord<'_>, b: &SortableRecord<'_>) -> Ordering {
        let cmp = match (a.numeric_value, b.numeric_value) {
            (Some(a_num), Some(b_num)) if self.numeric_first => {
                a_num.partial_cmp(&b_num).unwrap_or(Ordering::Equal)
            }
            _ => self.compare_keys(a, b),
        };

        if self.descending {
            cmp.reverse()
        } else {
            cmp
        }
    }

    #[inline]
    fn compare_keys(&self, a: &SortableRecord<'_>, b: &SortableRecord<'_>) -> Ordering {
        if !self.natural {
            return locale::collate(&a.key, &b.key);
        }
        match (&a.natural_tokens, &b.natural_tokens) {
            (Some(a_ends), Some(b_ends)) => {
                natural_compare_tokenized(&a.key, a_ends, &b.key, b_ends)
            }
            _ => natural_compare(&a.key, &b.key),
        }
    }
}

/// Parse the leading float of a value the way a lenient float parser does:
/// leading whitespace and trailing garbage are ignored, but the value must
/// start with a number ("12abc" is 12, "abc12" does not parse).
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return trimmed[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Pre-compute keys for every record
pub fn prepare<'a>(
    records: &[&'a str],
    extractor: &KeyExtractor,
    comparator: &RecordComparator,
) -> Vec<SortableRecord<'a>> {
    let build = |&text: &&'a str| {
        let key = extractor.extract(text);
        let numeric_value = if comparator.wants_numeric() {
            parse_leading_float(&key)
        } else {
            None
        };
        let natural_tokens = comparator.wants_natural().then(|| token_ends(&key));
        SortableRecord {
            text,
            key,
            natural_tokens,
            numeric_value,
        }
    };

    if records.len() >= PARALLEL_THRESHOLD {
        records.par_iter().map(build).collect()
    } else {
        records.iter().map(build).collect()
    }
}

/// Stable ordering of prepared records, returned as positions
///
/// Mixed numeric/string comparisons are not transitive ("-3" < "+5" by
/// value, "+5" < "+x" < "-3" as strings), so this uses a merge sort that
/// tolerates an inconsistent comparator instead of the std sorts.
pub fn sort_records(records: &[SortableRecord<'_>], comparator: &RecordComparator) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    let compare = |a: usize, b: usize| comparator.compare(&records[a], &records[b]);
    let parallel = rayon::current_num_threads() > 1;
    merge_sort_by(&mut order, &compare, parallel);
    order
}

const INSERTION_SORT_THRESHOLD: usize = 24;

fn merge_sort_by<F>(items: &mut [usize], compare: &F, parallel: bool)
where
    F: Fn(usize, usize) -> Ordering + Sync,
{
    if items.len() <= INSERTION_SORT_THRESHOLD {
        insertion_sort_by(items, compare);
        return;
    }

    let mid = items.len() / 2;
    let split_work = parallel && items.len() >= PARALLEL_THRESHOLD;
    {
        let (left, right) = items.split_at_mut(mid);
        if split_work {
            rayon::join(
                || merge_sort_by(left, compare, parallel),
                || merge_sort_by(right, compare, parallel),
            );
        } else {
            merge_sort_by(left, compare, parallel);
            merge_sort_by(right, compare, parallel);
        }
    }
    merge_two_sorted_ranges(items, mid, compare);
}

fn insertion_sort_by<F>(items: &mut [usize], compare: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(items[j - 1], items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Merge `items[..mid]` and `items[mid..]`, left side winning ties
fn merge_two_sorted_ranges<F>(items: &mut [usize], mid: usize, compare: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    if mid == 0 || mid >= items.len() {
        return;
    }
    // Already in order, nothing to merge
    if compare(items[mid - 1], items[mid]) != Ordering::Greater {
        return;
    }

    let mut merged = Vec::with_capacity(items.len());
    let (left, right) = items.split_at(mid);
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if compare(left[i], right[j]) != Ordering::Greater {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    items.copy_from_slice(&merged);
}

/// Order records per the configuration, returning a new vector
pub fn order<'a>(records: &[&'a str], config: &SortConfig) -> Vec<&'a str> {
    let extractor = KeyExtractor::new(config, records);
    let comparator = RecordComparator::new(config);

    let prepared = prepare(records, &extractor, &comparator);
    sort_records(&prepared, &comparator)
        .into_iter()
        .map(|idx| prepared[idx].text)
        .collect()
}

/// 0-based index of the first record that sorts before its predecessor
pub fn first_disorder(records: &[&str], config: &SortConfig) -> Option<usize> {
    let extractor = KeyExtractor::new(config, records);
    let comparator = RecordComparator::new(config);
    let prepared = prepare(records, &extractor, &comparator);

    prepared
        .windows(2)
        .position(|pair| comparator.compare(&pair[0], &pair[1]) == Ordering::Greater)
        .map(|idx| idx + 1)
}
