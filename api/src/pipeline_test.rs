use std::time::Duration;

use serde_json::json;

use super::*;
use crate::config::RetryPolicy;
use crate::test_support::{BASE, Harness};
use crate::types::{Service, User};

fn profile_json() -> serde_json::Value {
    json!({"success": true, "data": {"id": 1, "name": "Test", "email": "test@example.com"}})
}

// =============================================================
// Request interceptor
// =============================================================

#[tokio::test]
async fn attaches_bearer_from_default_header() {
    let h = Harness::new();
    h.backend.respond(Method::Get, "/profile", 200, profile_json());
    h.api.set_auth_token(Some("abc123"));

    let user: User = h.api.get("/profile").await.unwrap();
    assert_eq!(user.name, "Test");

    let sent = h.backend.requests_to(Method::Get, "/profile");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, format!("{BASE}/profile"));
    assert_eq!(sent[0].header("authorization"), Some("Bearer abc123"));
    assert_eq!(sent[0].header("accept"), Some("application/json"));
    assert_eq!(sent[0].header("content-type"), None);
}

#[tokio::test]
async fn falls_back_to_stored_token() {
    let h = Harness::with("/dashboard", Some("stored-token"));
    h.backend.respond(Method::Get, "/profile", 200, profile_json());

    let _: User = h.api.get("/profile").await.unwrap();
    let sent = h.backend.requests();
    assert_eq!(sent[0].header("Authorization"), Some("Bearer stored-token"));
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization() {
    let h = Harness::new();
    h.backend.respond(Method::Post, "/login", 422, json!({"errors": {"email": ["Required"]}}));

    let _ = h.api.post::<_, User>("/login", &json!({"email": ""})).await;
    let sent = h.backend.requests();
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"email":""}"#));
}

// =============================================================
// 401 teardown
// =============================================================

#[tokio::test]
async fn unauthorized_on_dashboard_clears_and_redirects() {
    let h = Harness::with("/dashboard", Some("abc123"));
    h.api.set_auth_token(Some("abc123"));
    h.api.session_cell().send_modify(|session| {
        session.token = Some("abc123".into());
        session.loading = false;
    });
    h.backend.respond(Method::Get, "/subscriptions", 401, json!({"message": "Unauthenticated."}));

    let err = h.api.get::<Vec<Service>>("/subscriptions").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(h.tokens.load(), None);
    assert_eq!(h.api.auth_header(), None);
    assert_eq!(h.api.subscribe().borrow().token, None);
    assert_eq!(h.navigator.current_path(), "/login");
    assert_eq!(h.navigator.history(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn unauthorized_on_login_does_not_redirect() {
    let h = Harness::with("/login", None);
    h.backend.respond(Method::Post, "/login", 401, json!({"message": "Invalid credentials"}));

    let err = h.api.post::<_, User>("/login", &json!({})).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert!(h.navigator.history().is_empty());
    assert_eq!(h.navigator.current_path(), "/login");
}

#[tokio::test]
async fn unauthorized_on_register_does_not_redirect() {
    let h = Harness::with("/register", None);
    h.backend.respond(Method::Post, "/register", 401, json!({}));

    let _ = h.api.post::<_, User>("/register", &json!({})).await;
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn unauthorized_settles_loading() {
    let h = Harness::with("/services", Some("abc123"));
    assert!(h.api.subscribe().borrow().loading);
    h.backend.respond(Method::Get, "/services", 401, json!({}));

    let _ = h.api.get::<Vec<Service>>("/services").await;
    assert!(!h.api.subscribe().borrow().loading);
}

// =============================================================
// Status mapping
// =============================================================

#[tokio::test]
async fn validation_errors_keep_field_messages() {
    let h = Harness::new();
    h.backend.respond(
        Method::Post,
        "/services",
        422,
        json!({"message": "The name field is required.", "errors": {"name": ["The name field is required."]}}),
    );

    let err = h.api.post::<_, Service>("/services", &json!({})).await.unwrap_err();
    let ApiError::Validation { message, errors } = err else {
        panic!("expected validation error");
    };
    assert_eq!(message, "The name field is required.");
    assert_eq!(errors["name"], vec!["The name field is required."]);
}

#[tokio::test]
async fn validation_without_message_uses_default() {
    let h = Harness::new();
    h.backend.respond_raw(Method::Post, "/services", 422, "");

    let err = h.api.post::<_, Service>("/services", &json!({})).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation { message: DEFAULT_VALIDATION_MESSAGE.into(), errors: crate::FieldErrors::new() }
    );
}

#[tokio::test]
async fn client_and_server_errors_carry_status() {
    let h = Harness::new();
    h.backend.respond(Method::Get, "/services/9", 404, json!({"message": "Service not found"}));
    h.backend.respond_raw(Method::Get, "/services/stats", 503, "<html>down</html>");

    let not_found = h.api.get::<Service>("/services/9").await.unwrap_err();
    assert_eq!(not_found, ApiError::Client { status: 404, message: "Service not found".into() });

    let down = h.api.get::<Service>("/services/stats").await.unwrap_err();
    assert_eq!(down, ApiError::Server { status: 503, message: DEFAULT_SERVER_MESSAGE.into() });
    assert!(down.is_transient());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn malformed_envelope_is_decode_error() {
    let h = Harness::new();
    h.backend.respond(Method::Get, "/profile", 200, json!({"user": {"id": 1, "name": "Test"}}));

    let err = h.api.get::<User>("/profile").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unsuccessful_envelope_is_client_error() {
    let h = Harness::new();
    h.backend.respond(Method::Get, "/profile", 200, json!({"success": false, "message": "Nope", "data": null}));

    let err = h.api.get::<Option<User>>("/profile").await.unwrap_err();
    assert_eq!(err, ApiError::Client { status: 200, message: "Nope".into() });
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let h = Harness::new();
    h.backend.respond_raw(Method::Delete, "/services/3", 204, "");
    h.backend.respond(Method::Delete, "/subscriptions/4", 200, json!({"success": true, "message": "Deleted"}));

    assert_eq!(h.api.delete("/services/3").await.unwrap(), None);
    assert_eq!(h.api.delete("/subscriptions/4").await.unwrap().as_deref(), Some("Deleted"));
}

// =============================================================
// Timeout retry
// =============================================================

#[tokio::test]
async fn timeout_is_retried_once_with_longer_timeout() {
    let h = Harness::new();
    h.api.set_auth_token(Some("abc123"));
    h.backend.fail(Method::Get, "/services", TransportError::Timeout(Duration::from_secs(15)));
    h.backend.respond(Method::Get, "/services", 200, json!({"data": []}));

    let services: Vec<Service> = h.api.get("/services").await.unwrap();
    assert!(services.is_empty());

    let sent = h.backend.requests();
    let policy = RetryPolicy::default();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].timeout, h.api.config().timeout);
    assert_eq!(sent[1].timeout, policy.timeout);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer abc123"));
    assert_eq!(h.backend.sleeps(), vec![policy.delay]);
}

#[tokio::test]
async fn second_timeout_is_surfaced() {
    let h = Harness::new();
    h.backend.fail(Method::Get, "/services", TransportError::Timeout(Duration::from_secs(15)));

    let err = h.api.get::<Vec<Service>>("/services").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
    assert_eq!(h.backend.requests().len(), 2);
}

#[tokio::test]
async fn network_errors_are_not_retried() {
    let h = Harness::new();
    h.backend.fail(Method::Get, "/services", TransportError::Network("connection refused".into()));

    let err = h.api.get::<Vec<Service>>("/services").await.unwrap_err();
    assert_eq!(err, ApiError::Transport(TransportError::Network("connection refused".into())));
    assert_eq!(h.backend.requests().len(), 1);
    assert!(h.backend.sleeps().is_empty());
}

#[tokio::test]
async fn retry_can_be_disabled() {
    let backend = std::sync::Arc::new(crate::test_support::StubBackend::default());
    backend.fail(Method::Get, "/services", TransportError::Timeout(Duration::from_secs(15)));
    let api = ApiClient::new(
        crate::test_support::test_config().with_retry(None),
        backend.clone(),
        std::sync::Arc::new(crate::storage::MemoryTokenStore::new()),
        std::sync::Arc::new(crate::navigation::MemoryNavigator::default()),
    );

    assert!(api.get::<Vec<Service>>("/services").await.is_err());
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn bearer_token_prefers_header_over_storage() {
    let h = Harness::with("/", Some("stored"));
    assert_eq!(h.api.bearer_token().as_deref(), Some("stored"));
    h.api.set_auth_token(Some("fresh"));
    assert_eq!(h.api.bearer_token().as_deref(), Some("fresh"));
    assert_eq!(h.api.auth_header().as_deref(), Some("Bearer fresh"));
}
