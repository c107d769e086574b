//! Scripted collaborators for pipeline and session tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::navigation::MemoryNavigator;
use crate::pipeline::ApiClient;
use crate::session::SessionStore;
use crate::storage::MemoryTokenStore;
use crate::transport::{HttpBackend, HttpRequest, HttpResponse, Method};

pub(crate) const BASE: &str = "http://api.test/api/v1";

type Reply = Result<HttpResponse, TransportError>;

/// Backend answering from per-route queues.
///
/// Each `(method, path)` pops replies in order; the last reply sticks.
/// Unscripted routes answer 404. Routes marked with [`StubBackend::hang`]
/// never answer.
#[derive(Default)]
pub(crate) struct StubBackend {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    hanging: Mutex<HashSet<(Method, String)>>,
    requests: Mutex<Vec<HttpRequest>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl StubBackend {
    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub(crate) fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.push(method, path, Err(error));
    }

    pub(crate) fn hang(&self, method: Method, path: &str) {
        self.hanging.lock().insert((method, path.to_owned()));
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        let url = format!("{BASE}{path}");
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.url == url)
            .collect()
    }

    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait(?Send)]
impl HttpBackend for StubBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.url.strip_prefix(BASE).unwrap_or(&request.url).to_owned();
        let key = (request.method, path);
        self.requests.lock().push(request);

        let hangs = self.hanging.lock().contains(&key);
        if hangs {
            return std::future::pending::<Reply>().await;
        }

        let mut routes = self.routes.lock();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"No stub for this route"}"#.to_owned(),
            }),
        }
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}

pub(crate) struct Harness {
    pub backend: Arc<StubBackend>,
    pub tokens: Arc<MemoryTokenStore>,
    pub navigator: Arc<MemoryNavigator>,
    pub api: ApiClient,
}

impl Harness {
    /// Fresh app at `/` with nothing stored.
    pub(crate) fn new() -> Self {
        Self::with(crate::navigation::LANDING_PATH, None)
    }

    pub(crate) fn with(path: &str, stored_token: Option<&str>) -> Self {
        let backend = Arc::new(StubBackend::default());
        let tokens = Arc::new(stored_token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token));
        let navigator = Arc::new(MemoryNavigator::at(path));
        let api = ApiClient::new(test_config(), backend.clone(), tokens.clone(), navigator.clone());
        Self { backend, tokens, navigator, api }
    }

    pub(crate) fn store(&self) -> SessionStore {
        SessionStore::new(self.api.clone())
    }
}

pub(crate) fn test_config() -> ApiConfig {
    ApiConfig::new(BASE).unwrap()
}
