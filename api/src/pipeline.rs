//! Authorized request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call the app makes to the REST API goes through [`ApiClient`]. It
//! owns the process-wide session cell and the default authorization header,
//! so the one globally handled failure (401) can tear the session down no
//! matter which view issued the request.
//!
//! DESIGN
//! ======
//! A request passes through four stages:
//! 1. build: JSON headers plus `Authorization: Bearer <token>` from the
//!    default header, falling back to durable storage.
//! 2. dispatch: first attempt with the configured timeout; a timeout (and
//!    only a timeout) is retried once after a delay with a longer timeout.
//!    The retry rebuilds the request so it carries the current token.
//! 3. status: 401 tears the session down and redirects to the login view
//!    unless already on an auth screen; other failures map to [`ApiError`].
//! 4. decode: the `{success, message, data}` envelope, read strictly.
//!
//! `ApiClient` is a cheap `Arc` handle; clones share all state.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{
    ApiError, DEFAULT_CLIENT_MESSAGE, DEFAULT_SERVER_MESSAGE, DEFAULT_VALIDATION_MESSAGE, TransportError,
};
use crate::navigation::{LOGIN_PATH, Navigator, is_auth_screen};
use crate::session::Session;
use crate::storage::TokenStore;
use crate::transport::{HttpBackend, HttpRequest, HttpResponse, Method};
use crate::types::{Envelope, ErrorBody, MessageBody};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ApiConfig,
    backend: Arc<dyn HttpBackend>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    /// Default `Authorization` value, e.g. `Bearer abc123`.
    auth_header: RwLock<Option<String>>,
    session: watch::Sender<Session>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("authorized", &self.inner.auth_header.read().is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// The session starts in the loading state until
    /// [`crate::SessionStore::initialize`] settles it.
    #[must_use]
    pub fn new(
        config: ApiConfig,
        backend: Arc<dyn HttpBackend>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                backend,
                tokens,
                navigator,
                auth_header: RwLock::new(None),
                session: watch::Sender::new(Session::pending()),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Receiver that observes every session change, including 401 teardowns.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.session.subscribe()
    }

    /// Set or clear the default authorization header.
    pub fn set_auth_token(&self, token: Option<&str>) {
        *self.inner.auth_header.write() = token.map(|token| format!("{BEARER_PREFIX}{token}"));
    }

    #[must_use]
    pub fn auth_header(&self) -> Option<String> {
        self.inner.auth_header.read().clone()
    }

    /// Token attached to the next request: the default header first, then
    /// durable storage.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        let from_header = self
            .inner
            .auth_header
            .read()
            .as_deref()
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::to_owned);
        from_header.or_else(|| self.inner.tokens.load())
    }

    pub(crate) fn session_cell(&self) -> &watch::Sender<Session> {
        &self.inner.session
    }

    pub(crate) fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    /// `GET path`, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.fetch(Method::Get, path, None).await?;
        decode_data(&response)
    }

    /// `POST path` with a JSON body, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.fetch(Method::Post, path, Some(encode(body)?)).await?;
        decode_data(&response)
    }

    /// `PUT path` with a JSON body, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.fetch(Method::Put, path, Some(encode(body)?)).await?;
        decode_data(&response)
    }

    /// `PATCH path` with a JSON body, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.fetch(Method::Patch, path, Some(encode(body)?)).await?;
        decode_data(&response)
    }

    /// Bodiless `PATCH path` (state transitions like `/cancel`), returning `data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.fetch(Method::Patch, path, None).await?;
        decode_data(&response)
    }

    /// `DELETE path`, returning the server's message if it sent one.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn delete(&self, path: &str) -> Result<Option<String>, ApiError> {
        let response = self.fetch(Method::Delete, path, None).await?;
        decode_message(&response)
    }

    /// Bodiless `POST path` answered with a message only.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn post_empty(&self, path: &str) -> Result<Option<String>, ApiError> {
        let response = self.fetch(Method::Post, path, None).await?;
        decode_message(&response)
    }

    /// `PUT path` with a JSON body, answered with a message only.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 401 has already torn the session down.
    pub async fn put_message<B>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.fetch(Method::Put, path, Some(encode(body)?)).await?;
        decode_message(&response)
    }

    async fn fetch(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse, ApiError> {
        let url = self.inner.config.url(path);
        let response = self.dispatch(method, &url, body).await?;
        self.check_status(response)
    }

    async fn dispatch(&self, method: Method, url: &str, body: Option<String>) -> Result<HttpResponse, TransportError> {
        let first = self.build_request(method, url, body.clone(), self.inner.config.timeout);
        match self.inner.backend.execute(first).await {
            Err(TransportError::Timeout(after)) => {
                let Some(retry) = self.inner.config.retry else {
                    return Err(TransportError::Timeout(after));
                };
                debug!(%method, url, ?after, delay = ?retry.delay, "request timed out; retrying once");
                self.inner.backend.sleep(retry.delay).await;
                let second = self.build_request(method, url, body, retry.timeout);
                self.inner.backend.execute(second).await
            }
            outcome => outcome,
        }
    }

    fn build_request(&self, method: Method, url: &str, body: Option<String>, timeout: Duration) -> HttpRequest {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = self.bearer_token() {
            headers.push(("Authorization".to_owned(), format!("{BEARER_PREFIX}{token}")));
        }
        HttpRequest {
            method,
            url: url.to_owned(),
            headers,
            body,
            timeout,
        }
    }

    fn check_status(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        if status == 401 {
            self.teardown_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        let body = serde_json::from_str::<ErrorBody>(&response.body).unwrap_or_default();
        let message = body.message.clone().filter(|message| !message.trim().is_empty());
        Err(match status {
            422 => ApiError::Validation {
                message: message.unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.to_owned()),
                errors: body.field_errors(),
            },
            500.. => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_owned()),
            },
            _ => ApiError::Client {
                status,
                message: message.unwrap_or_else(|| DEFAULT_CLIENT_MESSAGE.to_owned()),
            },
        })
    }

    /// Global reaction to a 401 from any request.
    fn teardown_unauthorized(&self) {
        if let Err(err) = self.inner.tokens.clear() {
            warn!(%err, "failed to clear stored token after 401");
        }
        self.set_auth_token(None);
        self.inner.session.send_modify(Session::clear);

        let current = self.inner.navigator.current_path();
        if is_auth_screen(&current) {
            debug!(path = %current, "401 on auth screen; not redirecting");
        } else {
            warn!(path = %current, "session rejected by server; redirecting to login");
            self.inner.navigator.navigate(LOGIN_PATH);
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|err| TransportError::InvalidRequest(err.to_string()).into())
}

fn decode_data<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Client {
            status: response.status,
            message: envelope.message.unwrap_or_else(|| DEFAULT_CLIENT_MESSAGE.to_owned()),
        });
    }
    Ok(envelope.data)
}

fn decode_message(response: &HttpResponse) -> Result<Option<String>, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<MessageBody>(&response.body)
        .map(|body| body.message)
        .map_err(|err| ApiError::Decode(err.to_string()))
}
