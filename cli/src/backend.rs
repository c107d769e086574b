//! reqwest transport for the core pipeline.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::time::Duration;

use async_trait::async_trait;
use techsubs_api::TransportError;
use techsubs_api::transport::{HttpBackend, HttpRequest, HttpResponse, Method};

use crate::error::CliError;

pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Returns [`CliError::Http`] when the TLS backend fails to initialize.
    pub fn new() -> Result<Self, CliError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("techsubs-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport_error(err: &reqwest::Error, method: Method, url: &str, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(format!("{method} {url} failed: {err}"))
    }
}

#[async_trait(?Send)]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest { method, url, headers, body, timeout } = request;
        let mut builder = self.client.request(reqwest_method(method), &url).timeout(timeout);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&e, method, &url, timeout))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&e, method, &url, timeout))?;
        tracing::debug!(%method, %url, status, "response received");
        Ok(HttpResponse { status, body })
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
