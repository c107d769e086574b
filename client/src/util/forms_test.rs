use super::*;

fn errors(pairs: &[(&str, &[&str])]) -> FieldErrors {
    pairs
        .iter()
        .map(|(field, messages)| ((*field).to_owned(), messages.iter().map(|m| (*m).to_owned()).collect()))
        .collect()
}

#[test]
fn first_error_takes_first_message() {
    let map = errors(&[("email", &["The email has already been taken.", "Other"])]);
    assert_eq!(first_error(&map, "email").as_deref(), Some("The email has already been taken."));
    assert_eq!(first_error(&map, "name"), None);
}

#[test]
fn validation_failure_keeps_field_errors() {
    let err = ApiError::Validation {
        message: "The given data was invalid.".to_owned(),
        errors: errors(&[("plan", &["Plan is required"])]),
    };
    let (banner, fields) = submission_failure(&err);
    assert_eq!(banner, "The given data was invalid.");
    assert_eq!(first_error(&fields, "plan").as_deref(), Some("Plan is required"));
}

#[test]
fn server_failure_has_banner_only() {
    let err = ApiError::Server { status: 503, message: "Service Unavailable".to_owned() };
    let (banner, fields) = submission_failure(&err);
    assert!(banner.starts_with("Service Unavailable"));
    assert!(fields.is_empty());
}

#[test]
fn non_blank_trims() {
    assert_eq!(non_blank("  Netflix "), Some("Netflix".to_owned()));
    assert_eq!(non_blank("   "), None);
}
