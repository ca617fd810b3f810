// 🔤 Chaldean Letter Values - Name Number calculation
// Fixed A-Z weight table, summed across the full name and reduced

use crate::reducer::{reduce, ReduceMode};

/// Chaldean weight for each letter A..Z (index 0 = 'A')
///
/// A I J Q Y = 1, B K R = 2, C G L S = 3, D M T = 4,
/// E H N X = 5, U V W = 6, O Z = 7, F P = 8
const LETTER_VALUES: [u32; 26] = [
    1, 2, 3, 4, 5, 8, 3, 5, 1, 1, 2, 3, 4, // A-M
    5, 7, 8, 1, 2, 3, 4, 6, 6, 6, 5, 1, 7, // N-Z
];

/// Weight of a single letter (case-insensitive). Anything outside A-Z is 0.
pub fn letter_value(ch: char) -> u32 {
    let upper = ch.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        LETTER_VALUES[(upper as u8 - b'A') as usize]
    } else {
        0
    }
}

/// Unreduced letter sum of first + middle + last, concatenated with no separator
pub fn name_total(first: &str, middle: &str, last: &str) -> u32 {
    [first, middle, last]
        .iter()
        .flat_map(|part| part.chars())
        .map(letter_value)
        .sum()
}

/// Name Number: letter sum reduced with master numbers preserved
pub fn name_number(first: &str, middle: &str, last: &str) -> u32 {
    reduce(name_total(first, middle, last), ReduceMode::PreserveMaster)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_table() {
        for ch in ['A', 'I', 'J', 'Q', 'Y'] {
            assert_eq!(letter_value(ch), 1, "letter {}", ch);
        }
        for ch in ['B', 'K', 'R'] {
            assert_eq!(letter_value(ch), 2, "letter {}", ch);
        }
        for ch in ['C', 'G', 'L', 'S'] {
            assert_eq!(letter_value(ch), 3, "letter {}", ch);
        }
        for ch in ['D', 'M', 'T'] {
            assert_eq!(letter_value(ch), 4, "letter {}", ch);
        }
        for ch in ['E', 'H', 'N', 'X'] {
            assert_eq!(letter_value(ch), 5, "letter {}", ch);
        }
        for ch in ['U', 'V', 'W'] {
            assert_eq!(letter_value(ch), 6, "letter {}", ch);
        }
        for ch in ['O', 'Z'] {
            assert_eq!(letter_value(ch), 7, "letter {}", ch);
        }
        for ch in ['F', 'P'] {
            assert_eq!(letter_value(ch), 8, "letter {}", ch);
        }
    }

    #[test]
    fn test_every_letter_has_weight() {
        for ch in 'A'..='Z' {
            let v = letter_value(ch);
            assert!((1..=8).contains(&v), "{} has weight {}", ch, v);
        }
    }

    #[test]
    fn test_non_letters_ignored() {
        assert_eq!(letter_value(' '), 0);
        assert_eq!(letter_value('-'), 0);
        assert_eq!(letter_value('7'), 0);
        assert_eq!(letter_value('é'), 0);
        assert_eq!(name_total("A-n n", "", "."), name_total("ANN", "", ""));
    }

    #[test]
    fn test_empty_name_is_zero() {
        assert_eq!(name_number("", "", ""), 0);
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(name_number("A", "", ""), 1);
        assert_eq!(name_number("a", "", ""), 1);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(name_total("John", "", "Smith"), name_total("JOHN", "", "SMITH"));
    }

    #[test]
    fn test_full_name() {
        // J1 O7 H5 N5 = 18, S3 M4 I1 T4 H5 = 17
        assert_eq!(name_total("John", "", "Smith"), 35);
        assert_eq!(name_number("John", "", "Smith"), 8);
    }

    #[test]
    fn test_master_name_number() {
        // A1 N5 N5
        assert_eq!(name_total("Ann", "", ""), 11);
        assert_eq!(name_number("Ann", "", ""), 11);
    }
}
