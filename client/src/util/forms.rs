//! Glue between form inputs and the core's field-error maps.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use techsubs_api::{ApiError, FieldErrors};

/// First message recorded for `field`.
pub fn first_error(errors: &FieldErrors, field: &str) -> Option<String> {
    errors.get(field).and_then(|messages| messages.first()).cloned()
}

/// Banner text and inline field errors for a failed submission.
///
/// Validation failures keep their field map so inline errors render next to
/// the inputs; everything else only produces a banner.
pub fn submission_failure(error: &ApiError) -> (String, FieldErrors) {
    let errors = error.field_errors().cloned().unwrap_or_default();
    (error.user_message(), errors)
}

/// Trimmed input, `None` when blank.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
