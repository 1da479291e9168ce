//! Validation errors shared by every record type.

use crate::types::email::EmailError;

/// A record failed one of its field constraints.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A string field is shorter or longer than allowed.
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        /// Offending field.
        field: &'static str,
        /// Minimum length in characters.
        min: usize,
        /// Maximum length in characters.
        max: usize,
    },

    /// An integer field is outside its inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// A numeric field must be zero or greater.
    #[error("{field} must not be negative")]
    Negative {
        /// Offending field.
        field: &'static str,
    },

    /// A field must hold an absolute URL.
    #[error("{field} must be an absolute URL")]
    InvalidUrl {
        /// Offending field.
        field: &'static str,
    },

    /// The email field is malformed.
    #[error("email: {0}")]
    Email(#[from] EmailError),
}

impl ValidationError {
    /// Name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Length { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Negative { field }
            | Self::InvalidUrl { field } => field,
            Self::Email(_) => "email",
        }
    }
}

/// Check that `value` is between `min` and `max` characters, inclusive.
///
/// Length is counted in Unicode scalar values, not bytes.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}
