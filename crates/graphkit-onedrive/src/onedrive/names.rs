//! File-name helpers used when matching requested paths against remote
//! listings: extension splitting and the canonical "sanitized" form.

use crate::onedrive::error::{OneDriveError, OneDriveResult};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Split `name` into `(base_name, extension)` at the last dot.
///
/// The extension is lowercased. A dot at the very start or very end of
/// the name does not start an extension; the whole input is returned as
/// the base name in that case.
pub fn split_extension(name: &str) -> (String, String) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (
            name[..idx].to_string(),
            name[idx + 1..].to_lowercase(),
        ),
        _ => (name.to_string(), String::new()),
    }
}

/// Canonical comparable form of a name.
///
/// Lowercases, folds accented letters to their base letter, collapses
/// every run of characters outside `[a-z0-9]` into a single `-` and trims
/// dashes from both ends.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Locale-aware ordering of display names (ICU root collation).
///
/// Punctuation and spaces are significant and sort before digits and
/// letters (space < `_` < `-` < `.`); accents are secondary differences and
/// lowercase sorts before uppercase.
pub struct NameCollator {
    inner: Collator,
}

impl NameCollator {
    pub fn new() -> OneDriveResult<Self> {
        let inner = Collator::try_new(&Default::default(), CollatorOptions::new()).map_err(|e| {
            OneDriveError::internal(format!("Failed to load collation data: {}", e))
        })?;
        Ok(Self { inner })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner.compare(a, b)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn split(name: &str) -> (String, String) {
        split_extension(name)
    }

    #[test]
    fn test_split_extension_literals() {
        assert_eq!(split(""), ("".into(), "".into()));
        assert_eq!(split("foo"), ("foo".into(), "".into()));
        assert_eq!(split("foo.txt"), ("foo".into(), "txt".into()));
        assert_eq!(split("foo.bar.txt"), ("foo.bar".into(), "txt".into()));
        assert_eq!(split("foo."), ("foo.".into(), "".into()));
        assert_eq!(split(".foo"), (".foo".into(), "".into()));
    }

    #[test]
    fn test_split_extension_lowercases_extension_only() {
        assert_eq!(split("Report.DOCX"), ("Report".into(), "docx".into()));
        assert_eq!(split("Ünïcode.Äb"), ("Ünïcode".into(), "äb".into()));
    }

    #[test]
    fn test_sanitize_literals() {
        assert_eq!(sanitize("MyDocument"), "mydocument");
        assert_eq!(sanitize("My 2. Document"), "my-2-document");
        assert_eq!(sanitize(".My 2. Document-"), "my-2-document");
        assert_eq!(sanitize("Föhren Smürd"), "fohren-smurd");
    }

    #[test]
    fn test_sanitize_degenerate_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("---"), "");
        assert_eq!(sanitize("  a  "), "a");
        assert_eq!(sanitize("my-1-document\""), "my-1-document");
    }

    fn sorted(names: &[&'static str]) -> Vec<&'static str> {
        let collator = NameCollator::new().unwrap();
        let mut names = names.to_vec();
        names.sort_by(|a, b| collator.compare(a, b));
        names
    }

    #[test]
    fn test_collator_case_and_accents() {
        assert_eq!(
            sorted(&["b.txt", "Ä.txt", "a.txt", "A.txt", "c.txt"]),
            vec!["a.txt", "A.txt", "Ä.txt", "b.txt", "c.txt"]
        );
        let collator = NameCollator::new().unwrap();
        assert_eq!(collator.compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_collator_punctuation_order() {
        // Order produced by ICU (`localeCompare`) for the same names.
        assert_eq!(
            sorted(&["report-1.txt", "report_1.txt", "Report 1.txt", "report.1.txt"]),
            vec!["Report 1.txt", "report_1.txt", "report-1.txt", "report.1.txt"]
        );
    }

    #[test]
    fn test_collator_punctuation_before_alphanumerics() {
        assert_eq!(sorted(&["a1", "a-", "aa"]), vec!["a-", "a1", "aa"]);
    }

    proptest! {
        #[test]
        fn prop_split_extension_is_stable(s in "\\PC{0,24}") {
            let (base, ext) = split_extension(&s);
            let rebuilt = if ext.is_empty() { base.clone() } else { format!("{}.{}", base, ext) };
            prop_assert_eq!(split_extension(&rebuilt), (base, ext.clone()));
            prop_assert_eq!(ext.to_lowercase(), ext);
        }

        #[test]
        fn prop_sanitize_is_idempotent(s in "\\PC{0,32}") {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once.clone());
            prop_assert!(!once.starts_with('-') && !once.ends_with('-'));
            prop_assert!(!once.contains("--"));
        }
    }
}
