//! Levenshtein edit distance, used to rank fuzzy name matches.

/// Minimum number of single-unit insertions, deletions or substitutions
/// turning `a` into `b`.
///
/// Units are UTF-16 code units, so a character outside the Basic
/// Multilingual Plane (most emoji) counts as two. Runs in
/// `O(len(a) * len(b))` time keeping a single row of the table.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<u16> = a.encode_utf16().collect();
    let b: Vec<u16> = b.encode_utf16().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    // row[j] = distance between the processed prefix of `long` and short[..j]
    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = if lc == sc { 0 } else { 1 };
            row[j + 1] = (diag + cost).min(above + 1).min(row[j] + 1);
            diag = above;
        }
    }

    row[short.len()]
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_literals() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("foo", "foo"), 0);
        assert_eq!(distance("foo", "foo123"), 3);
        assert_eq!(distance("My Document", "my-document"), 3);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abc"), 3);
    }

    #[test]
    fn test_counts_utf16_units_not_bytes() {
        assert_eq!(distance("Föhren", "Fohren"), 1);
        assert_eq!(distance("日本", "日本語"), 1);
    }

    #[test]
    fn test_astral_characters_count_twice() {
        assert_eq!(distance("a", "😀"), 2);
        assert_eq!(distance("photo 😀", "photo "), 2);
        // U+1F600 and U+1F601 share their high surrogate.
        assert_eq!(distance("😀", "😁"), 1);
    }

    #[test]
    fn test_long_names_are_fast() {
        let a = "Quarterly Financial Report - Consolidated Statements ".repeat(3);
        let b = "quarterly-financial-report-consolidated-statement-v2 ".repeat(3);
        assert!(a.len() > 150 && b.len() > 150);
        let start = Instant::now();
        let d = distance(&a, &b);
        assert!(start.elapsed() < Duration::from_millis(100));
        assert!(d > 0);
    }

    proptest! {
        #[test]
        fn prop_identity(s in "\\PC{0,40}") {
            prop_assert_eq!(distance(&s, &s), 0);
        }

        #[test]
        fn prop_symmetric(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn prop_empty_is_length(s in "\\PC{0,40}") {
            prop_assert_eq!(distance("", &s), s.encode_utf16().count());
        }

        #[test]
        fn prop_bounded_by_longer_length(a in "[a-c]{0,12}", b in "[a-c]{0,12}") {
            let d = distance(&a, &b);
            let (la, lb) = (a.chars().count(), b.chars().count());
            prop_assert!(d <= la.max(lb));
            prop_assert!(d >= la.abs_diff(lb));
        }
    }
}
