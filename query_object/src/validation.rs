//! Validation module
//!
//! Named value checks an operator runs before it modifies a query.

use std::fmt;

use crate::dates::parse_date;

/// Validation errors for user-supplied filter values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Non-blank values that are not recognizable dates
    InvalidDates(Vec<String>),
    /// Value does not contain a plain number once currency formatting is removed
    InvalidNumber(String),
    /// Day offset moves the date outside the supported calendar
    OffsetOutOfRange(i64),
    /// Validator name that no validator answers to
    UnknownValidator(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidDates(values) => {
                write!(f, "Invalid date value(s): {}", values.join(", "))
            }
            ValidationError::InvalidNumber(value) => {
                write!(f, "Value '{}' is not a number", value)
            }
            ValidationError::OffsetOutOfRange(days) => {
                write!(f, "Day offset {} is out of range", days)
            }
            ValidationError::UnknownValidator(name) => {
                write!(f, "Unknown validator '{}'", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Blank values mean "no input" rather than bad input
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Value checks operators can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    /// Every non-blank value must parse as a date
    Dates,
}

impl Validator {
    /// Name used when declaring the validator
    pub fn name(&self) -> &'static str {
        match self {
            Validator::Dates => "dates",
        }
    }

    /// Resolve a declared validator name
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name {
            "dates" => Ok(Validator::Dates),
            other => Err(ValidationError::UnknownValidator(other.to_string())),
        }
    }

    /// Check values, reporting every offending one
    pub fn validate(&self, values: &[&str]) -> Result<(), ValidationError> {
        match self {
            Validator::Dates => {
                let invalid: Vec<String> = values
                    .iter()
                    .filter(|value| !is_blank(value) && parse_date(value).is_none())
                    .map(|value| value.to_string())
                    .collect();

                if invalid.is_empty() {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidDates(invalid))
                }
            }
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
