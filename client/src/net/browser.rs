//! Browser implementations of the core's platform seams.
//!
//! Client-side (csr): `fetch` via `gloo-net`, `localStorage`, and the
//! History API. Native builds get inert stand-ins so the crate compiles and
//! view helpers can be unit tested without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures map onto the core's `TransportError` / `StorageError`; nothing
//! here panics, since a missing `window` must degrade to "signed out", not
//! crash the app.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::time::Duration;

use async_trait::async_trait;
use techsubs_api::TransportError;
use techsubs_api::navigation::{LANDING_PATH, Navigator};
use techsubs_api::storage::{StorageError, TokenStore};
#[cfg(feature = "csr")]
use techsubs_api::storage::TOKEN_KEY;
use techsubs_api::transport::{HttpBackend, HttpRequest, HttpResponse};
#[cfg(any(test, feature = "csr"))]
use techsubs_api::transport::Method;

#[cfg(any(test, feature = "csr"))]
fn timeout_error(timeout: Duration) -> TransportError {
    TransportError::Timeout(timeout)
}

#[cfg(any(test, feature = "csr"))]
fn fetch_failed(method: Method, url: &str, detail: &str) -> TransportError {
    TransportError::Network(format!("{method} {url} failed: {detail}"))
}

/// `fetch`-backed transport with a timer race for timeouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooBackend;

#[async_trait(?Send)]
impl HttpBackend for GlooBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::{Method as GlooMethod, RequestBuilder};

            let HttpRequest { method, url, headers, body, timeout } = request;
            let gloo_method = match method {
                Method::Get => GlooMethod::GET,
                Method::Post => GlooMethod::POST,
                Method::Put => GlooMethod::PUT,
                Method::Patch => GlooMethod::PATCH,
                Method::Delete => GlooMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&url).method(gloo_method);
            for (name, value) in &headers {
                builder = builder.header(name, value);
            }
            let built = match body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

            let send = async {
                let response = built
                    .send()
                    .await
                    .map_err(|e| fetch_failed(method, &url, &e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| fetch_failed(method, &url, &e.to_string()))?;
                Ok(HttpResponse { status, body })
            };
            let timer = gloo_timers::future::sleep(timeout);

            match select(Box::pin(send), Box::pin(timer)).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(timeout_error(timeout)),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError::Network(format!(
                "{} {}: not available outside the browser",
                request.method, request.url
            )))
        }
    }

    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = duration;
        }
    }
}

/// Bearer token kept in `localStorage` under `auth_token`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_owned()))
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()
                .ok()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.trim().is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(TOKEN_KEY, token)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(StorageError::Unavailable("not running in a browser".to_owned()))
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(TOKEN_KEY)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}

/// Navigation through the History API, announced with a `popstate` event so
/// the router picks up the new location without a reload.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| LANDING_PATH.to_owned())
        }
        #[cfg(not(feature = "csr"))]
        {
            LANDING_PATH.to_owned()
        }
    }

    fn navigate(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let pushed = window
                .history()
                .and_then(|history| history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)));
            if pushed.is_err() {
                leptos::logging::warn!("history push failed; reloading at {path}");
                let _ = window.location().set_href(path);
                return;
            }
            if let Ok(event) = web_sys::PopStateEvent::new("popstate") {
                let _ = window.dispatch_event(&event);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}
