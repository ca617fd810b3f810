// 📅 Birth Date - Typed decomposition + date-derived numbers
// Parse "YYYY-MM-DD" once, keep the original text for storage

use crate::reducer::{digit_sum, reduce, ReduceMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PARSE ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input was empty or whitespace
    Empty,

    /// Did not split into exactly three parts on '-'
    WrongShape { parts: usize },

    /// A component was not a plain non-negative integer
    NotNumeric { component: &'static str, value: String },
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Empty => write!(f, "date of birth is empty"),
            DateParseError::WrongShape { parts } => write!(
                f,
                "date of birth must be YYYY-MM-DD (found {} part{})",
                parts,
                if *parts == 1 { "" } else { "s" }
            ),
            DateParseError::NotNumeric { component, value } => {
                write!(f, "date of birth {} is not a number: {:?}", component, value)
            }
        }
    }
}

impl std::error::Error for DateParseError {}

// ============================================================================
// BIRTH DATE
// ============================================================================

/// A date of birth split into year, month and day.
///
/// The original text is kept as entered; it is what gets persisted and
/// what the digit-level numbers are computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub text: String,
}

impl BirthDate {
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(DateParseError::Empty);
        }

        let parts: Vec<&str> = text.split('-').collect();
        if parts.len() != 3 {
            return Err(DateParseError::WrongShape { parts: parts.len() });
        }

        Ok(BirthDate {
            year: parse_component("year", parts[0])?,
            month: parse_component("month", parts[1])?,
            day: parse_component("day", parts[2])?,
            text: text.to_string(),
        })
    }

    /// Every digit of the date text in order, delimiters dropped
    pub fn digits(&self) -> Vec<u32> {
        self.text.chars().filter_map(|c| c.to_digit(10)).collect()
    }
}

impl FromStr for BirthDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BirthDate::parse(s)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_component(component: &'static str, value: &str) -> Result<u32, DateParseError> {
    let not_numeric = || DateParseError::NotNumeric {
        component,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_numeric());
    }
    value.parse::<u32>().map_err(|_| not_numeric())
}

// ============================================================================
// DATE NUMBERS
// ============================================================================

/// Luck number: digit sum of the whole date
pub fn dob_number(date: &BirthDate) -> u32 {
    reduce(date.digits().iter().sum(), ReduceMode::PreserveMaster)
}

/// Moolank (birth number): the day alone
pub fn moolank(date: &BirthDate) -> u32 {
    reduce(date.day, ReduceMode::PreserveMaster)
}

/// Bhagyank: year + month + day as whole numbers
pub fn bhagyank(date: &BirthDate) -> u32 {
    let total = u64::from(date.year) + u64::from(date.month) + u64::from(date.day);
    match u32::try_from(total) {
        Ok(n) => reduce(n, ReduceMode::PreserveMaster),
        // Too wide for u32, so certainly above 22: one digit sum first
        Err(_) => reduce(digit_sum(total), ReduceMode::PreserveMaster),
    }
}

/// Destiny number. Same formula as the luck number.
pub fn destiny(date: &BirthDate) -> u32 {
    dob_number(date)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = BirthDate::parse("1990-05-15").unwrap();
        assert_eq!(date.year, 1990);
        assert_eq!(date.month, 5);
        assert_eq!(date.day, 15);
        assert_eq!(date.text, "1990-05-15");
        assert_eq!(date.to_string(), "1990-05-15");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date: BirthDate = " 2001-12-31 ".parse().unwrap();
        assert_eq!(date.text, "2001-12-31");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(BirthDate::parse(""), Err(DateParseError::Empty));
        assert_eq!(
            BirthDate::parse("1990/05/15"),
            Err(DateParseError::WrongShape { parts: 1 })
        );
        assert_eq!(
            BirthDate::parse("1990-05"),
            Err(DateParseError::WrongShape { parts: 2 })
        );
        assert!(matches!(
            BirthDate::parse("1990-MM-15"),
            Err(DateParseError::NotNumeric { component: "month", .. })
        ));
        assert!(matches!(
            BirthDate::parse("1990-+5-15"),
            Err(DateParseError::NotNumeric { component: "month", .. })
        ));
        assert!(matches!(
            BirthDate::parse("1990-05-"),
            Err(DateParseError::NotNumeric { component: "day", .. })
        ));
    }

    #[test]
    fn test_digits() {
        let date = BirthDate::parse("1990-05-15").unwrap();
        assert_eq!(date.digits(), vec![1, 9, 9, 0, 0, 5, 1, 5]);
    }

    #[test]
    fn test_date_numbers() {
        let date = BirthDate::parse("1990-05-15").unwrap();

        // 1+9+9+0+0+5+1+5 = 30 -> 3
        assert_eq!(dob_number(&date), 3);
        assert_eq!(destiny(&date), 3);

        // 15 -> 6
        assert_eq!(moolank(&date), 6);

        // 1990 + 5 + 15 = 2010 -> 3
        assert_eq!(bhagyank(&date), 3);
    }

    #[test]
    fn test_moolank_master_day() {
        let date = BirthDate::parse("1985-03-29").unwrap();
        assert_eq!(moolank(&date), 11);

        let date = BirthDate::parse("1985-03-22").unwrap();
        assert_eq!(moolank(&date), 22);
    }

    #[test]
    fn test_largest_components() {
        let date = BirthDate::parse("4294967295-01-01").unwrap();
        assert_eq!(date.year, u32::MAX);

        // 4294967297 -> 59 -> 14 -> 5
        assert_eq!(bhagyank(&date), 5);

        let date = BirthDate::parse("4294967295-4294967295-4294967295").unwrap();
        // 12884901885 -> 54 -> 9
        assert_eq!(bhagyank(&date), 9);
        // 57 -> 12 -> 3
        assert_eq!(moolank(&date), 3);

        // one past u32 is a parse error, not a wrap
        assert!(matches!(
            BirthDate::parse("4294967296-01-01"),
            Err(DateParseError::NotNumeric { component: "year", .. })
        ));
    }

    #[test]
    fn test_single_digit_day() {
        let date = BirthDate::parse("2000-01-07").unwrap();
        assert_eq!(moolank(&date), 7);
    }
}
