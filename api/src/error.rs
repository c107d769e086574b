//! Error taxonomy surfaced by the request pipeline.
//!
//! ERROR HANDLING
//! ==============
//! `Unauthorized` is the one class handled globally (session teardown +
//! redirect inside the pipeline); callers still receive it so they can stop
//! whatever they were doing. Everything else is returned to the calling view
//! to render locally.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;
use std::time::Duration;

/// Field name to messages, the shape of a 422 `errors` object.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const DEFAULT_VALIDATION_MESSAGE: &str = "Validation failed";
pub const DEFAULT_CLIENT_MESSAGE: &str = "The request could not be completed.";
pub const DEFAULT_SERVER_MESSAGE: &str = "The server encountered an error.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Could not reach the server. Check your connection and try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const RETRY_HINT: &str = "Please try again in a moment.";

/// Failure below HTTP semantics: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No response within the request's timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Connection refused, DNS failure, CORS rejection, aborted fetch.
    #[error("network error: {0}")]
    Network(String),
    /// The request could not be built (bad header value, bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// HTTP 401. The pipeline has already torn the session down.
    #[error("not authenticated")]
    Unauthorized,
    /// HTTP 422 with field-keyed messages.
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },
    /// Any other 4xx.
    #[error("request rejected ({status}): {message}")]
    Client { status: u16, message: String },
    /// Any 5xx.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// A body that does not match the expected schema.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether retrying the same call later might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout(_) | TransportError::Network(_)) | Self::Server { .. })
    }

    /// Field errors for inline rendering, if this is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Message suitable for a banner in the calling view.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => NETWORK_FAILURE_MESSAGE.to_owned(),
            Self::Unauthorized => SESSION_EXPIRED_MESSAGE.to_owned(),
            Self::Validation { message, .. } | Self::Client { message, .. } => message.clone(),
            Self::Server { message, .. } => format!("{message} {RETRY_HINT}"),
            Self::Decode(_) => "The server sent a response this app does not understand.".to_owned(),
        }
    }
}

/// Flatten field errors into display lines, ordered by field name.
#[must_use]
pub fn flatten_field_errors(errors: &FieldErrors) -> Vec<String> {
    errors.values().flatten().cloned().collect()
}
