//! Natural ordering: embedded digit runs compare by value, so "item2"
//! sorts before "item10".

use crate::locale;
use std::cmp::Ordering;

/// Byte offsets where each maximal run of ASCII digits or non-digits ends
pub fn token_ends(s: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut in_digits = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => ends.push(idx),
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if !s.is_empty() {
        ends.push(s.len());
    }
    ends
}

fn tokens_from<'a: 'b, 'b>(s: &'a str, ends: &'b [usize]) -> impl Iterator<Item = &'a str> + 'b {
    ends.iter().scan(0, move |start, &end| {
        let token = &s[*start..end];
        *start = end;
        Some(token)
    })
}

/// Split a string into maximal runs that are all ASCII digits or all
/// non-digits.
pub fn tokenize(s: &str) -> Vec<&str> {
    let ends = token_ends(s);
    tokens_from(s, &ends).collect()
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit runs by value, at any length
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Walk two token streams in parallel; a side that runs out contributes ""
fn compare_token_streams<'a, 'b>(
    mut a: impl Iterator<Item = &'a str>,
    mut b: impl Iterator<Item = &'b str>,
) -> Ordering {
    loop {
        let (a_tok, b_tok) = match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (a_tok, b_tok) => (a_tok.unwrap_or(""), b_tok.unwrap_or("")),
        };

        let cmp = if is_digit_run(a_tok) && is_digit_run(b_tok) {
            compare_digit_runs(a_tok, b_tok)
        } else {
            locale::collate(a_tok, b_tok)
        };

        if cmp != Ordering::Equal {
            return cmp;
        }
    }
}

/// Three-way natural comparison
///
/// Two digit runs compare numerically and fall through to the next token
/// when equal ("01" vs "1"); anything else compares with the locale
/// collation.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a_ends = token_ends(a);
    let b_ends = token_ends(b);
    compare_token_streams(tokens_from(a, &a_ends), tokens_from(b, &b_ends))
}

/// Natural comparison over boundaries already computed with [`token_ends`]
///
/// Orders exactly like [`natural_compare`]; sorting prepares the boundaries
/// once per record instead of once per comparison.
pub fn natural_compare_tokenized(
    a: &str,
    a_ends: &[usize],
    b: &str,
    b_ends: &[usize],
) -> Ordering {
    compare_token_streams(tokens_from(a, a_ends), tokens_from(b, b_ends))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("item10b2"), vec!["item", "10", "b", "2"]);
        assert_eq!(tokenize("42"), vec!["42"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_multibyte() {
        assert_eq!(tokenize("é12ü"), vec!["é", "12", "ü"]);
    }

    #[test]
    fn test_numeric_runs_by_value() {
        assert_eq!(natural_compare("item2", "item10"), Ordering::Less);
        assert_eq!(natural_compare("item10", "item2"), Ordering::Greater);
        assert_eq!(natural_compare("item10", "item10"), Ordering::Equal);
    }

    #[test]
    fn test_shorter_token_sequence_first() {
        assert_eq!(natural_compare("item", "item1"), Ordering::Less);
        assert_eq!(natural_compare("", "a"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_tie() {
        assert_eq!(natural_compare("v01", "v1"), Ordering::Equal);
        assert_eq!(natural_compare("v01a", "v1b"), Ordering::Less);
    }

    #[test]
    fn test_huge_digit_runs_are_exact() {
        let a = "id 123456789012345678901234567890";
        let b = "id 123456789012345678901234567891";
        assert_eq!(natural_compare(a, b), Ordering::Less);
        assert_eq!(
            natural_compare("99999999999999999999", "100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_cached_key_matches_direct_compare() {
        let pairs = [
            ("item2", "item10"),
            ("v01a", "v1b"),
            ("", "a"),
            ("item", "item1"),
            ("same9", "same9"),
        ];
        for (a, b) in pairs {
            let (a_ends, b_ends) = (token_ends(a), token_ends(b));
            let cached = natural_compare_tokenized(a, &a_ends, b, &b_ends);
            assert_eq!(cached, natural_compare(a, b), "{a} vs {b}");
        }
    }

    #[test]
    fn test_token_ends() {
        assert_eq!(token_ends("ab12c"), vec![2, 4, 5]);
        assert!(token_ends("").is_empty());
        assert_eq!(token_ends("é1"), vec![2, 3]);
    }

    #[test]
    fn test_digit_vs_text_uses_collation() {
        // "1" vs "a": digits collate before letters
        assert_eq!(natural_compare("1x", "ax"), Ordering::Less);
    }
}
