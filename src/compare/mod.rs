//! Natural-order key comparison
//!
//! Keys are split into segments (digit runs and single characters) and
//! compared position by position. The first differing position decides:
//! - two digit runs compare by numeric value, the longer run first on ties
//! - anything else compares with the configured text collation
//!
//! This gives the Windows Explorer ordering: `img2` < `img10`,
//! `Chapter 1` < `Chapter 10` < `Chapter 2a`.

mod collation;
pub mod segment;

pub use collation::Collation;
pub use segment::decompose;

use collation::TextCollator;
use segment::{compare_digit_runs, is_digit_run};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// Natural-order comparator with its own collation handle
pub struct NaturalComparator {
    collation: Collation,
    collator: TextCollator,
    resolved_locale: Option<String>,
}

impl fmt::Debug for NaturalComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalComparator")
            .field("collation", &self.collation)
            .field("resolved_locale", &self.resolved_locale)
            .finish()
    }
}

impl Default for NaturalComparator {
    fn default() -> Self {
        Self::new(Collation::System)
    }
}

impl NaturalComparator {
    /// Create a comparator, loading collation data for `collation` once
    pub fn new(collation: Collation) -> Self {
        let (collator, resolved_locale) = TextCollator::resolve(&collation);
        Self {
            collation,
            collator,
            resolved_locale,
        }
    }

    /// Comparator using plain code-point order for text segments
    pub fn code_point() -> Self {
        Self::new(Collation::CodePoint)
    }

    /// The collation this comparator was built with
    pub fn collation(&self) -> &Collation {
        &self.collation
    }

    /// Locale whose collation data is in use, `None` for code-point order
    pub fn resolved_locale(&self) -> Option<&str> {
        self.resolved_locale.as_deref()
    }

    /// Compare two keys in natural order
    ///
    /// This is a total order: when every shared position ties, the key with
    /// fewer segments comes first, and identical keys are `Equal`.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let segments_a = decompose(a);
        let segments_b = decompose(b);

        for (seg_a, seg_b) in segments_a.iter().zip(segments_b.iter()) {
            if seg_a == seg_b {
                continue;
            }
            return self.compare_segments(seg_a, seg_b);
        }

        segments_a.len().cmp(&segments_b.len())
    }

    /// Decide the order of two differing segments
    fn compare_segments(&self, a: &str, b: &str) -> Ordering {
        if is_digit_run(a) && is_digit_run(b) {
            return compare_digit_runs(a, b);
        }

        match self.collator.compare(a, b) {
            Ordering::Equal => {
                trace!(a, b, "Collation tie, falling back to code points");
                a.cmp(b)
            }
            order => order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(comparator: &NaturalComparator, items: &[&str]) -> Vec<String> {
        let mut items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        items.sort_by(|a, b| comparator.compare(a, b));
        items
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        let cmp = NaturalComparator::code_point();
        assert_eq!(cmp.compare("img2", "img10"), Ordering::Less);
        assert_eq!(cmp.compare("img10", "img2"), Ordering::Greater);
        assert_eq!(cmp.compare("file100", "file99"), Ordering::Greater);
    }

    #[test]
    fn test_zero_padding_longer_first() {
        let cmp = NaturalComparator::code_point();
        assert_eq!(cmp.compare("0", "00"), Ordering::Greater);
        assert_eq!(cmp.compare("00", "0"), Ordering::Less);
        assert_eq!(cmp.compare("a01", "a1"), Ordering::Less);
    }

    #[test]
    fn test_first_difference_decides() {
        let cmp = NaturalComparator::code_point();
        // Position 1 ("1" vs "2") decides; later positions are never looked at
        assert_eq!(cmp.compare("a1z", "a2a"), Ordering::Less);
    }

    #[test]
    fn test_chapters() {
        let cmp = NaturalComparator::code_point();
        assert_eq!(
            sorted(&cmp, &["Chapter 2a", "Chapter 10", "Chapter 1"]),
            vec!["Chapter 1", "Chapter 2a", "Chapter 10"]
        );
    }

    #[test]
    fn test_identical_keys_are_equal() {
        let cmp = NaturalComparator::code_point();
        assert_eq!(cmp.compare("same", "same"), Ordering::Equal);
        assert_eq!(cmp.compare("", ""), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        let cmp = NaturalComparator::code_point();
        assert_eq!(cmp.compare("", "a"), Ordering::Less);
        assert_eq!(cmp.compare("abc", "ab"), Ordering::Greater);
        assert_eq!(cmp.compare("img", "img1"), Ordering::Less);
    }

    #[test]
    fn test_antisymmetry() {
        let cmp = NaturalComparator::new(Collation::Locale("en".into()));
        let keys = [
            "", "0", "00", "1", "01", "a", "A", "b", "é", "img2", "img10", "x1y", "x01y",
            "第2话", "第10话", "１", "1",
        ];
        for a in keys {
            for b in keys {
                assert_eq!(
                    cmp.compare(a, b),
                    cmp.compare(b, a).reverse(),
                    "compare({a:?}, {b:?})"
                );
                if a != b {
                    assert_ne!(cmp.compare(a, b), Ordering::Equal, "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_transitivity() {
        let cmp = NaturalComparator::new(Collation::Locale("en".into()));
        let keys = [
            "", "0", "00", "000", "1", "01", "9", "10", "a", "a1", "a01", "a10", "B", "b2",
            "c", "é", "Z", "-", "_", "file 2", "file 10", "file10",
        ];
        for a in keys {
            for b in keys {
                for c in keys {
                    if cmp.compare(a, b) == Ordering::Less && cmp.compare(b, c) == Ordering::Less {
                        assert_eq!(
                            cmp.compare(a, c),
                            Ordering::Less,
                            "{a:?} < {b:?} < {c:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_locale_collation_differs_from_code_points() {
        let icu = NaturalComparator::new(Collation::Locale("en".into()));
        let raw = NaturalComparator::code_point();

        assert_eq!(
            sorted(&icu, &["c", "B", "a", "é"]),
            vec!["a", "B", "c", "é"]
        );
        assert_eq!(sorted(&raw, &["c", "B", "a", "é"]), vec!["B", "a", "c", "é"]);
        assert_eq!(icu.compare("é", "f"), Ordering::Less);
        assert_eq!(raw.compare("é", "f"), Ordering::Greater);
    }

    #[test]
    fn test_resolved_locale() {
        assert_eq!(NaturalComparator::code_point().resolved_locale(), None);
        let cmp = NaturalComparator::new(Collation::Locale("de_DE.UTF-8".into()));
        assert_eq!(cmp.resolved_locale(), Some("de-DE"));
    }
}
