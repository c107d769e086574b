use super::*;

#[test]
fn transient_covers_network_timeout_and_server() {
    assert!(ApiError::Transport(TransportError::Timeout(Duration::from_secs(1))).is_transient());
    assert!(ApiError::Transport(TransportError::Network("refused".into())).is_transient());
    assert!(ApiError::Server { status: 503, message: "down".into() }.is_transient());
    assert!(!ApiError::Unauthorized.is_transient());
    assert!(!ApiError::Client { status: 404, message: "missing".into() }.is_transient());
    assert!(!ApiError::Transport(TransportError::InvalidRequest("bad".into())).is_transient());
}

#[test]
fn field_errors_only_for_validation() {
    let mut errors = FieldErrors::new();
    errors.insert("email".into(), vec!["taken".into()]);
    let err = ApiError::Validation { message: "Validation failed".into(), errors: errors.clone() };
    assert_eq!(err.field_errors(), Some(&errors));
    assert_eq!(ApiError::Unauthorized.field_errors(), None);
}

#[test]
fn server_message_advises_retry() {
    let err = ApiError::Server { status: 500, message: "Boom.".into() };
    assert_eq!(err.user_message(), format!("Boom. {RETRY_HINT}"));
}

#[test]
fn transport_message_is_generic() {
    let err = ApiError::Transport(TransportError::Network("dns".into()));
    assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
}

#[test]
fn flatten_orders_by_field() {
    let mut errors = FieldErrors::new();
    errors.insert("password".into(), vec!["too short".into()]);
    errors.insert("email".into(), vec!["required".into(), "invalid".into()]);
    assert_eq!(flatten_field_errors(&errors), vec!["required", "invalid", "too short"]);
}
