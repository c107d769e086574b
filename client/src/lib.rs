//! # techsubs-client
//!
//! Leptos + WASM single-page app for the TechSubs subscription tracker.
//!
//! SYSTEM CONTEXT
//! ==============
//! A thin presentation layer over the TechSubs REST API. Session handling,
//! request authorization and route decisions live in `techsubs-api`; this
//! crate supplies the browser adapters for that core (fetch, `localStorage`,
//! history) and renders the views.
//!
//! Browser-only code is gated behind the `csr` feature. Without it the crate
//! still builds natively with inert adapters so view helpers stay testable.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
