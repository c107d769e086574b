//! Client core for the TechSubs subscription tracker.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser app (`techsubs-client`) and the terminal client
//! (`techsubs-cli`) both talk to the remote REST API through this crate. It
//! owns the authorized request pipeline, the process-wide session, route
//! guard decisions, and the presentation-independent helpers (billing cycles,
//! reports, form validation, formatting) that the views share.
//!
//! ARCHITECTURE
//! ============
//! Platform concerns sit behind three seams so the core stays natively
//! testable: [`transport::HttpBackend`] (gloo-net in the browser, reqwest in
//! the CLI), [`storage::TokenStore`] (`localStorage` or a file) and
//! [`navigation::Navigator`] (`window.location` or a terminal hint).
//!
//! Dependency order, leaves first: `pipeline` -> `session` -> `guard`.

pub mod billing;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod format;
pub mod guard;
pub mod navigation;
pub mod pipeline;
pub mod reports;
pub mod resources;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ApiConfig, RetryPolicy};
pub use error::{ApiError, FieldErrors, TransportError};
pub use guard::{GuardDecision, GuardState, Route, RouteGuard, UnknownRoutePolicy};
pub use pipeline::ApiClient;
pub use session::{AuthOutcome, Session, SessionStore};
