// ✅ Form Validation - Presence checks before any calculation
// Only presence is checked; formats are the calculators' business

use crate::numerology::{Gender, NumerologyInput};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the field (camelCase)
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Join errors into one user-facing line
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// USER FORM
// ============================================================================

/// The six raw inputs as the page (or CLI) collects them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserForm {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    pub mob: String,
}

impl UserForm {
    /// Required: first name, last name, date of birth, mobile number
    pub fn validate(&self) -> ValidationResult {
        validate_required(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("dob", self.dob.as_str()),
            ("mob", self.mob.as_str()),
        ])
    }

    /// Calculator input. Call `validate` first; this only fails on a bad date.
    pub fn to_input(&self) -> Result<NumerologyInput, crate::date::DateParseError> {
        NumerologyInput::new(
            &self.first_name,
            Some(self.middle_name.as_str()),
            &self.last_name,
            &self.dob,
        )
    }

    pub fn gender(&self) -> Gender {
        Gender::from_str_loose(&self.gender)
    }
}

/// Every (field, value) pair whose value is blank becomes an error
pub fn validate_required(fields: &[(&'static str, &str)]) -> ValidationResult {
    let errors: Vec<ValidationError> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ValidationError {
            field: *field,
            message: "Required field is empty".to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> UserForm {
        UserForm {
            first_name: "Asha".to_string(),
            middle_name: String::new(),
            last_name: "Rao".to_string(),
            dob: "1990-05-15".to_string(),
            gender: "Female".to_string(),
            mob: "9876543210".to_string(),
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert!(complete_form().validate().is_ok());
    }

    #[test]
    fn test_middle_name_and_gender_optional() {
        let mut form = complete_form();
        form.gender = String::new();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported() {
        let form = UserForm {
            first_name: "  ".to_string(),
            dob: "1990-05-15".to_string(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstName", "lastName", "mob"]);
        assert_eq!(
            describe(&errors),
            "firstName: Required field is empty; lastName: Required field is empty; mob: Required field is empty"
        );
    }

    #[test]
    fn test_form_deserializes_wire_names() {
        let form: UserForm = serde_json::from_value(serde_json::json!({
            "firstName": "Asha",
            "lastName": "Rao",
            "dob": "1990-05-15",
            "mob": "1"
        }))
        .unwrap();
        assert_eq!(form.first_name, "Asha");
        assert_eq!(form.middle_name, "");
        assert!(form.validate().is_ok());
        assert_eq!(form.to_input().unwrap().dob.day, 15);
    }
}
