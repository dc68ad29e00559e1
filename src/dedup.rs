//! First-occurrence deduplication

use crate::key::fold;
use itertools::Itertools;

/// Drop repeated records, keeping the first of each identity in input order
pub fn dedup<'a>(records: Vec<&'a str>, case_sensitive: bool) -> Vec<&'a str> {
    records
        .into_iter()
        .unique_by(|record| fold(record, case_sensitive).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let records = vec!["b", "a", "b", "c", "a"];
        assert_eq!(dedup(records, true), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_case_insensitive_identity() {
        assert_eq!(dedup(vec!["Apple", "apple"], false), vec!["Apple"]);
        assert_eq!(dedup(vec!["Apple", "apple"], true), vec!["Apple", "apple"]);
    }

    #[test]
    fn test_all_duplicates_collapse() {
        assert_eq!(dedup(vec!["x"; 5], true), vec!["x"]);
    }

    #[test]
    fn test_empty() {
        assert!(dedup(Vec::new(), false).is_empty());
    }
}
