//! Key decomposition into digit runs and single characters

use std::cmp::Ordering;

/// Code points of the digit zero for each supported ten-digit block.
/// Each block holds the digits 0-9 contiguously.
const DIGIT_ZEROS: [u32; 20] = [
    0x0030, // ASCII
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x07C0, // NKo
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0E50, // Thai
    0x0ED0, // Lao
    0x0F20, // Tibetan
    0x1040, // Myanmar
    0x17E0, // Khmer
    0x1810, // Mongolian
    0xFF10, // Fullwidth
];

/// Numeric value of a decimal digit, `None` for any other character
pub fn digit_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return Some(c as u32 - 0x30);
    }
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|&zero| code - zero)
}

/// Check whether a character is a decimal digit
pub fn is_digit(c: char) -> bool {
    digit_value(c).is_some()
}

/// Check whether a segment is a digit run
///
/// Segments produced by [`decompose`] are homogeneous, so the first
/// character decides.
pub fn is_digit_run(segment: &str) -> bool {
    segment.chars().next().is_some_and(is_digit)
}

/// Split a key into segments, left to right
///
/// Every maximal run of decimal digits becomes one segment; every other
/// character becomes a segment of its own. Concatenating the result gives
/// back `key`.
pub fn decompose(key: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut chars = key.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();
        if is_digit(c) {
            while let Some(&(index, next)) = chars.peek() {
                if !is_digit(next) {
                    break;
                }
                end = index + next.len_utf8();
                chars.next();
            }
        }
        segments.push(&key[start..end]);
    }

    segments
}

/// Compare two digit runs by numeric value
///
/// Values of any length are supported. Runs with equal value order the
/// longer (more zero-padded) run first, so "00" precedes "0". Runs that
/// are still tied (same value and length, different digit scripts) fall
/// back to code-point order.
pub fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let significant_a = significant_digits(a);
    let significant_b = significant_digits(b);

    significant_a
        .len()
        .cmp(&significant_b.len())
        .then_with(|| significant_a.cmp(&significant_b))
        .then_with(|| b.chars().count().cmp(&a.chars().count()))
        .then_with(|| a.cmp(b))
}

/// Digit values with leading zeros stripped
fn significant_digits(run: &str) -> Vec<u32> {
    run.chars()
        .filter_map(digit_value)
        .skip_while(|&d| d == 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_mixed_key() {
        assert_eq!(
            decompose("img10.png"),
            vec!["i", "m", "g", "10", ".", "p", "n", "g"]
        );
        assert_eq!(decompose("a1b22c333"), vec!["a", "1", "b", "22", "c", "333"]);
    }

    #[test]
    fn test_decompose_empty_and_digits_only() {
        assert!(decompose("").is_empty());
        assert_eq!(decompose("007"), vec!["007"]);
    }

    #[test]
    fn test_decompose_round_trip() {
        let keys = [
            "",
            "Chapter 10",
            "第12话 - 副本",
            "ｆｉｌｅ１２３",
            "v1.2.10-rc3",
            "١٢٣abc",
            "😀42😀",
        ];
        for key in keys {
            assert_eq!(decompose(key).concat(), key, "round trip of {key:?}");
        }
    }

    #[test]
    fn test_decompose_never_merges_digits_with_text() {
        for segment in decompose("ab12cd034ef") {
            let digits = segment.chars().filter(|&c| is_digit(c)).count();
            let total = segment.chars().count();
            assert!((digits == 0 && total == 1) || digits == total, "{segment:?}");
        }
    }

    #[test]
    fn test_digit_value_scripts() {
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('٣'), Some(3));
        assert_eq!(digit_value('５'), Some(5));
        assert_eq!(digit_value('a'), None);
        assert_eq!(digit_value('²'), None);
        assert_eq!(digit_value('Ⅻ'), None);
    }

    #[test]
    fn test_compare_digit_runs_by_value() {
        assert_eq!(compare_digit_runs("2", "10"), Ordering::Less);
        assert_eq!(compare_digit_runs("10", "9"), Ordering::Greater);
        assert_eq!(compare_digit_runs("0010", "9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_digit_runs_zero_padding() {
        assert_eq!(compare_digit_runs("00", "0"), Ordering::Less);
        assert_eq!(compare_digit_runs("0", "00"), Ordering::Greater);
        assert_eq!(compare_digit_runs("007", "7"), Ordering::Less);
        assert_eq!(compare_digit_runs("7", "7"), Ordering::Equal);
    }

    #[test]
    fn test_compare_digit_runs_huge_values() {
        let big = "123456789012345678901234567890";
        let bigger = "123456789012345678901234567891";
        assert_eq!(compare_digit_runs(big, bigger), Ordering::Less);
    }

    #[test]
    fn test_compare_digit_runs_across_scripts() {
        assert_eq!(compare_digit_runs("１２", "3"), Ordering::Greater);
        assert_ne!(compare_digit_runs("１", "1"), Ordering::Equal);
    }
}
