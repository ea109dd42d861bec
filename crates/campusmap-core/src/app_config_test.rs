use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("CAMPUSMAP_SEARCH_URL", "https://api.example.com/v1/search/local.json");
    m.insert("CAMPUSMAP_GEOCODE_URL", "https://api.example.com/map-geocode/v2/geocode");
    m.insert("CAMPUSMAP_CLIENT_ID", "test-id");
    m.insert("CAMPUSMAP_CLIENT_SECRET", "test-secret");
    m
}

#[test]
fn build_app_config_with_required_vars_uses_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.search_page_size, 10);
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.retry_backoff_base_secs, 1);
    assert!(config.user_agent.starts_with("campusmap/"));
}

#[test]
fn build_app_config_reports_every_missing_var() {
    let map: HashMap<&str, &str> = HashMap::new();
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    let ConfigError::MissingVars(listed) = err else {
        panic!("expected MissingVars, got something else");
    };
    for var in [
        "CAMPUSMAP_SEARCH_URL",
        "CAMPUSMAP_GEOCODE_URL",
        "CAMPUSMAP_CLIENT_ID",
        "CAMPUSMAP_CLIENT_SECRET",
    ] {
        assert!(listed.contains(var), "{var} should be listed in: {listed}");
    }
}

#[test]
fn build_app_config_accepts_numeric_overrides() {
    let mut map = full_env();
    map.insert("CAMPUSMAP_REQUEST_TIMEOUT_SECS", "30");
    map.insert("CAMPUSMAP_SEARCH_PAGE_SIZE", "25");
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.search_page_size, 25);
}

#[test]
fn build_app_config_rejects_bad_numeric_value() {
    let mut map = full_env();
    map.insert("CAMPUSMAP_MAX_RETRIES", "lots");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CAMPUSMAP_MAX_RETRIES"),
        "expected InvalidValue for CAMPUSMAP_MAX_RETRIES, got: {err:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    let debug = format!("{config:?}");
    assert!(!debug.contains("test-id"));
    assert!(!debug.contains("test-secret"));
    assert!(debug.contains("[redacted]"));
}
