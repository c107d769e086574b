use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults_when_unset() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.timeout, Duration::from_secs(15));
    assert_eq!(cfg.retry, Some(RetryPolicy::default()));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[
        (ENV_BASE_URL, "https://api.example.test/v2/"),
        (ENV_TIMEOUT_SECS, "20"),
        (ENV_RETRY_DELAY_SECS, "5"),
        (ENV_RETRY_TIMEOUT_SECS, "45"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://api.example.test/v2");
    assert_eq!(cfg.timeout, Duration::from_secs(20));
    assert_eq!(
        cfg.retry,
        Some(RetryPolicy { delay: Duration::from_secs(5), timeout: Duration::from_secs(45) })
    );
}

#[test]
fn from_lookup_can_disable_retry() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[(ENV_RETRY, "off")])).unwrap();
    assert_eq!(cfg.retry, None);
}

#[test]
fn from_lookup_rejects_bad_numbers() {
    let err = ApiConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: ENV_TIMEOUT_SECS, value: "soon".to_owned() });

    let err = ApiConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}

#[test]
fn from_lookup_rejects_bad_switch() {
    let err = ApiConfig::from_lookup(lookup_from(&[(ENV_RETRY, "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSwitch { var: ENV_RETRY, .. }));
}

#[test]
fn new_rejects_relative_or_empty_urls() {
    assert!(ApiConfig::new("/api/v1").is_err());
    assert!(ApiConfig::new("ftp://host").is_err());
    assert!(ApiConfig::new("http://").is_err());
    assert!(ApiConfig::new("http://host name").is_err());
    assert!(ApiConfig::new("http://localhost:8000/api/v1").is_ok());
}

#[test]
fn url_joins_paths_without_double_slashes() {
    let cfg = ApiConfig::new("http://localhost:8000/api/v1/").unwrap();
    assert_eq!(cfg.url("/services"), "http://localhost:8000/api/v1/services");
    assert_eq!(cfg.url("profile"), "http://localhost:8000/api/v1/profile");
}
