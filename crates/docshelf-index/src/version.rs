//! Numeric-aware version label comparison.

use std::cmp::Ordering;

/// Compare two version labels, treating digit runs as numbers.
///
/// Labels are split into alternating digit and non-digit runs; digit runs
/// compare by numeric magnitude (leading zeros ignored), everything else
/// compares lexicographically. So `"2.10"` orders after `"2.9"` and
/// `"1.10"` after `"1.2"`, where a plain string comparison would not.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut lhs = chunks(a);
    let mut rhs = chunks(b);

    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.numeric, y.numeric) {
                    (true, true) => compare_digits(x.text, y.text),
                    // Digit runs order before non-digit runs
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => x.text.cmp(y.text),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

struct Chunk<'a> {
    text: &'a str,
    numeric: bool,
}

/// Split a label into maximal digit / non-digit runs.
fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    std::iter::from_fn(move || {
        if pos >= bytes.len() {
            return None;
        }
        let start = pos;
        let numeric = bytes[pos].is_ascii_digit();
        while pos < bytes.len() && bytes[pos].is_ascii_digit() == numeric {
            pos += 1;
        }
        Some(Chunk {
            text: &s[start..pos],
            numeric,
        })
    })
}

/// Compare two digit runs as numbers of arbitrary length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');

    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_multi_digit_segments_numerically() {
        assert_eq!(compare_versions("2.10", "2.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.10"), Ordering::Less);
        assert_eq!(compare_versions("2.0", "1.10"), Ordering::Greater);
    }

    #[test]
    fn sorts_sample_labels_descending() {
        let mut labels = vec!["1.2", "1.10", "2.0"];
        labels.sort_by(|a, b| compare_versions(b, a));

        assert_eq!(labels, vec!["2.0", "1.10", "1.2"]);
    }

    #[test]
    fn handles_underscore_separated_labels() {
        assert_eq!(compare_versions("0_1_2", "0_1_1"), Ordering::Greater);
        assert_eq!(compare_versions("0_2_0", "0_10_0"), Ordering::Less);
    }

    #[test]
    fn ignores_leading_zeros() {
        assert_eq!(compare_versions("1.02", "1.2"), Ordering::Equal);
        assert_eq!(compare_versions("1.010", "1.9"), Ordering::Greater);
    }

    #[test]
    fn falls_back_to_lexicographic_for_text() {
        assert_eq!(compare_versions("1.0-beta", "1.0-alpha"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "1.0-rc1"), Ordering::Less);
    }
}
