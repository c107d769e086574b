//! API configuration for the browser build.
//!
//! There is no process environment in WASM, so the base URL is baked in at
//! compile time from `TECHSUBS_API_BASE_URL`. Timeouts and retry keep their
//! defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use techsubs_api::ApiConfig;
use techsubs_api::config::ENV_BASE_URL;

const COMPILED_BASE_URL: Option<&str> = option_env!("TECHSUBS_API_BASE_URL");

/// Configuration for this build, falling back to defaults when the compiled
/// base URL is malformed.
pub fn api_config() -> ApiConfig {
    config_for(COMPILED_BASE_URL)
}

fn config_for(base_url: Option<&str>) -> ApiConfig {
    let lookup = |key: &str| if key == ENV_BASE_URL { base_url.map(str::to_owned) } else { None };
    match ApiConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::warn!("ignoring compiled API base URL: {e}");
            ApiConfig::default()
        }
    }
}
