//! Field checks shared by the operation groups.
//!
//! Every check runs before dispatch; a failure means no request was sent.

use crate::error::{Error, ValidationErrorKind};
use email_address::EmailAddress;

/// A trimmed, non-empty text field.
pub(crate) fn required_text(value: Option<&str>, field: &'static str) -> Result<String, Error> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::validation(ValidationErrorKind::MissingField(field)))
}

/// Optional text: blank counts as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| Error::validation(ValidationErrorKind::MissingField(field)))
}

/// A finite measurement strictly greater than zero.
pub(crate) fn positive(value: f64, field: &'static str) -> Result<f64, Error> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::validation(ValidationErrorKind::OutOfRange(field)))
    }
}

pub(crate) fn optional_positive(value: Option<f64>, field: &'static str) -> Result<Option<f64>, Error> {
    value.map(|v| positive(v, field)).transpose()
}

pub(crate) fn optional_non_negative(
    value: Option<f64>,
    field: &'static str,
) -> Result<Option<f64>, Error> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(Error::validation(ValidationErrorKind::OutOfRange(field)))
        }
        other => Ok(other),
    }
}

pub(crate) fn within(value: Option<f64>, min: f64, max: f64, field: &'static str) -> Result<Option<f64>, Error> {
    match value {
        Some(v) if !v.is_finite() || v < min || v > max => {
            Err(Error::validation(ValidationErrorKind::OutOfRange(field)))
        }
        other => Ok(other),
    }
}

/// Validate email address format using email_address crate
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}
