//! CLI error type and its terminal rendering.

use techsubs_api::config::ConfigError;
use techsubs_api::error::flatten_field_errors;
use techsubs_api::{ApiError, FieldErrors};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error("{message}")]
    Auth { message: String, errors: FieldErrors },
    #[error("invalid input")]
    Invalid(FieldErrors),
    #[error("not signed in")]
    NotSignedIn,
    #[error("nothing to update; pass at least one field")]
    NothingToUpdate,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no config directory found; pass --token-file")]
    NoTokenPath,
    #[error("could not write {path}: {source}")]
    Write { path: String, source: std::io::Error },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Field-level details printed under the main message.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Auth { errors, .. } | Self::Invalid(errors) => flatten_field_errors(errors),
            Self::Api(err) => err.field_errors().map(flatten_field_errors).unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}
