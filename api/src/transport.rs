//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! The pipeline builds fully-formed [`HttpRequest`] values (headers, JSON
//! body, timeout) and hands them to an [`HttpBackend`]. Backends only move
//! bytes; they never interpret status codes. Futures are `?Send` because the
//! browser backend's fetch futures are not `Send`.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire.
#[async_trait(?Send)]
pub trait HttpBackend: Send + Sync {
    /// Send `request`, giving up after `request.timeout` with
    /// [`TransportError::Timeout`].
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Suspend for `duration` on the backend's runtime.
    async fn sleep(&self, duration: Duration);
}
