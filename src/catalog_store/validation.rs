//! Validation for catalog entities.
//!
//! Field invariants are enforced when a record is constructed, before any
//! persistence call sees it. The database schema carries no equivalent
//! constraints, so this is the only gate.

use thiserror::Error;

/// Hard upper bound for every free-text field.
pub const MAX_TEXT_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' must be a positive integer, got {value}")]
    NonPositive { field: &'static str, value: i64 },
    #[error("field '{field}' must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },
    #[error("field '{field}' is required but was empty")]
    EmptyField { field: &'static str },
    #[error("field '{field}' exceeds {MAX_TEXT_LEN} characters")]
    TooLong { field: &'static str },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Identifier fields: strictly positive.
pub fn positive(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value <= 0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

/// The one non-strict identifier bound in the model (Link.musicId).
pub fn non_negative(field: &'static str, value: i64) -> ValidationResult<i64> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Required text: non-empty and within [`MAX_TEXT_LEN`].
pub fn required_text(field: &'static str, value: String) -> ValidationResult<String> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    bounded_len(field, &value)?;
    Ok(value)
}

/// Optional text: may be absent, but never over-long.
pub fn optional_text(field: &'static str, value: Option<String>) -> ValidationResult<Option<String>> {
    if let Some(text) = &value {
        bounded_len(field, text)?;
    }
    Ok(value)
}

fn bounded_len(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong { field });
    }
    Ok(())
}
