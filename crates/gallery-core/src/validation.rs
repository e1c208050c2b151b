//! Validation utilities.

use crate::{FieldError, GalleryError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `GalleryError` on failure.
    fn validate_request(&self) -> Result<(), GalleryError> {
        self.validate().map_err(validation_errors_to_gallery_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `GalleryError`.
#[must_use]
pub fn validation_errors_to_gallery_error(errors: ValidationErrors) -> GalleryError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    GalleryError::Validation(message)
}

/// Returns the trimmed identifier, or a validation error naming `label`.
///
/// Blank values and the literals `undefined` and `null` (sent by browser
/// clients that interpolate a missing variable into a URL) are rejected.
pub fn require_id<'a>(value: &'a str, label: &str) -> Result<&'a str, GalleryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return Err(GalleryError::validation(format!("{label} is required")));
    }
    Ok(trimmed)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
