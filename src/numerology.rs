// 🔮 Numerology Engine - One calculation from raw form input
// Name number, four date numbers, Lo Shu grid, plus the angel number

use crate::chaldean::{name_number, name_total};
use crate::date::{bhagyank, destiny, dob_number, moolank, BirthDate, DateParseError};
use crate::loshu::{build_grid, grid_digits, LoShuGrid};
use crate::reducer::{digit_sum, reduce, ReduceMode};
use serde::{Deserialize, Serialize};

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Case-insensitive; anything that is not male/female is Other
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Angel number from the birth year and gender.
///
/// The year's digit sum is fully reduced first; male is 11 minus it,
/// female is it plus 4, other genders use it unchanged.
pub fn angel_number(year: u32, gender: Gender) -> u32 {
    let y = reduce(digit_sum(u64::from(year)), ReduceMode::Legacy) as i64;
    let raw = match gender {
        Gender::Male => 11 - y,
        Gender::Female => y + 4,
        Gender::Other => y,
    };
    reduce(raw.unsigned_abs() as u32, ReduceMode::Legacy)
}

// ============================================================================
// INPUT / RESULT
// ============================================================================

/// Raw name fragments and the parsed date of birth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyInput {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub dob: BirthDate,
}

impl NumerologyInput {
    pub fn new(first: &str, middle: Option<&str>, last: &str, dob: &str) -> Result<Self, DateParseError> {
        Ok(NumerologyInput {
            first_name: first.to_string(),
            middle_name: middle.unwrap_or_default().to_string(),
            last_name: last.to_string(),
            dob: BirthDate::parse(dob)?,
        })
    }
}

/// The five reduced numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyResult {
    pub name_number: u32,
    pub dob_number: u32,
    pub moolank: u32,
    pub bhagyank: u32,
    pub destiny: u32,
}

/// Everything one calculation produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    #[serde(flatten)]
    pub result: NumerologyResult,
    pub name_total: u32,
    pub grid: LoShuGrid,
}

/// Run every calculator over one input. Pure; no state survives the call.
pub fn calculate(input: &NumerologyInput) -> Calculation {
    let dob = &input.dob;

    let result = NumerologyResult {
        name_number: name_number(&input.first_name, &input.middle_name, &input.last_name),
        dob_number: dob_number(dob),
        moolank: moolank(dob),
        bhagyank: bhagyank(dob),
        destiny: destiny(dob),
    };

    let grid = build_grid(&grid_digits(dob, result.moolank, result.bhagyank, result.destiny));

    Calculation {
        result,
        name_total: name_total(&input.first_name, &input.middle_name, &input.last_name),
        grid,
    }
}

// ============================================================================
// TESTS
// ============================================================================
