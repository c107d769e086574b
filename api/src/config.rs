//! API client configuration.
//!
//! Settings come from the environment (CLI) or compile-time constants
//! (browser build) and are validated once at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 3;
pub const DEFAULT_RETRY_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "TECHSUBS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TECHSUBS_API_TIMEOUT_SECS";
pub const ENV_RETRY: &str = "TECHSUBS_API_RETRY";
pub const ENV_RETRY_DELAY_SECS: &str = "TECHSUBS_API_RETRY_DELAY_SECS";
pub const ENV_RETRY_TIMEOUT_SECS: &str = "TECHSUBS_API_RETRY_TIMEOUT_SECS";

/// Error returned when a configuration value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is not an absolute `http(s)` URL.
    #[error("invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),
    /// A numeric setting did not parse or was zero.
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    /// A boolean switch held something other than on/off.
    #[error("invalid value for {var}: {value:?} (expected on/off)")]
    InvalidSwitch { var: &'static str, value: String },
}

/// One delayed retry with a longer timeout, applied only to timed-out requests.
///
/// Covers a backend that is still waking up: the first attempt times out, the
/// pipeline waits `delay`, then tries once more allowing `timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            timeout: Duration::from_secs(DEFAULT_RETRY_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute base URL without a trailing slash, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    /// Timeout for the first attempt of every request.
    pub timeout: Duration,
    /// Timeout retry policy; `None` disables the retry.
    pub retry: Option<RetryPolicy>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: Some(RetryPolicy::default()),
        }
    }
}

impl ApiConfig {
    /// Default settings against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute `http(s)` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `TECHSUBS_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `TECHSUBS_API_TIMEOUT_SECS`: default 15
    /// - `TECHSUBS_API_RETRY`: `on` (default) or `off`
    /// - `TECHSUBS_API_RETRY_DELAY_SECS`: default 3
    /// - `TECHSUBS_API_RETRY_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error when any present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (environment, compile-time
    /// constants, test fixtures).
    ///
    /// # Errors
    ///
    /// Returns an error when any present value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(ENV_BASE_URL) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let timeout = parse_secs(ENV_TIMEOUT_SECS, lookup(ENV_TIMEOUT_SECS), DEFAULT_TIMEOUT_SECS)?;
        let retry_enabled = parse_switch(ENV_RETRY, lookup(ENV_RETRY))?;
        let retry = if retry_enabled {
            Some(RetryPolicy {
                delay: parse_secs(ENV_RETRY_DELAY_SECS, lookup(ENV_RETRY_DELAY_SECS), DEFAULT_RETRY_DELAY_SECS)?,
                timeout: parse_secs(
                    ENV_RETRY_TIMEOUT_SECS,
                    lookup(ENV_RETRY_TIMEOUT_SECS),
                    DEFAULT_RETRY_TIMEOUT_SECS,
                )?,
            })
        } else {
            None
        };
        Ok(Self { base_url, timeout, retry })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: Option<RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// Absolute URL for an API path such as `/services/3`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') && !rest.contains(char::is_whitespace) => {
            Ok(trimmed.to_owned())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

fn parse_switch(var: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidSwitch { var, value: raw }),
    }
}
