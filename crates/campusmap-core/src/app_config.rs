//! Environment-driven application configuration.

use std::env::VarError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing env vars: {0}")]
    MissingVars(String),

    #[error("invalid value for {key}: \"{value}\"")]
    InvalidValue { key: String, value: String },
}

/// Runtime configuration for the place-search pipeline.
///
/// Built from environment variables via [`AppConfig::from_env`]. Provider
/// credentials are redacted from the `Debug` output.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the keyword place-search endpoint.
    pub search_base_url: String,
    /// Base URL of the address geocoding endpoint.
    pub geocode_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Keyword-search page size (`display` parameter).
    pub search_page_size: u32,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("search_base_url", &self.search_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("client_id", &"[redacted]")
            .field("client_secret", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_page_size", &self.search_page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}

impl AppConfig {
    /// Builds config from process environment variables.
    ///
    /// Required: `CAMPUSMAP_SEARCH_URL`, `CAMPUSMAP_GEOCODE_URL`,
    /// `CAMPUSMAP_CLIENT_ID`, `CAMPUSMAP_CLIENT_SECRET`. The rest have
    /// defaults suitable for interactive use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVars`] listing every absent required
    /// variable, or [`ConfigError::InvalidValue`] when a numeric override
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        build_app_config(|key: &str| std::env::var(key))
    }
}

/// Builds an [`AppConfig`] from an injectable env lookup, so tests can supply
/// a map instead of mutating the process environment.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let get = |key: &str| -> Option<String> { lookup(key).ok() };

    let search_base_url = get("CAMPUSMAP_SEARCH_URL");
    let geocode_base_url = get("CAMPUSMAP_GEOCODE_URL");
    let client_id = get("CAMPUSMAP_CLIENT_ID");
    let client_secret = get("CAMPUSMAP_CLIENT_SECRET");

    let mut missing = Vec::new();
    if search_base_url.is_none() {
        missing.push("CAMPUSMAP_SEARCH_URL");
    }
    if geocode_base_url.is_none() {
        missing.push("CAMPUSMAP_GEOCODE_URL");
    }
    if client_id.is_none() {
        missing.push("CAMPUSMAP_CLIENT_ID");
    }
    if client_secret.is_none() {
        missing.push("CAMPUSMAP_CLIENT_SECRET");
    }
    if !missing.is_empty() {
        return Err(ConfigError::MissingVars(missing.join(", ")));
    }

    Ok(AppConfig {
        search_base_url: search_base_url.unwrap_or_default(),
        geocode_base_url: geocode_base_url.unwrap_or_default(),
        client_id: client_id.unwrap_or_default(),
        client_secret: client_secret.unwrap_or_default(),
        request_timeout_secs: parse_or(&lookup, "CAMPUSMAP_REQUEST_TIMEOUT_SECS", 10)?,
        user_agent: get("CAMPUSMAP_USER_AGENT")
            .unwrap_or_else(|| "campusmap/0.1 (place-search)".to_string()),
        search_page_size: parse_or(&lookup, "CAMPUSMAP_SEARCH_PAGE_SIZE", 10)?,
        max_retries: parse_or(&lookup, "CAMPUSMAP_MAX_RETRIES", 2)?,
        retry_backoff_base_secs: parse_or(&lookup, "CAMPUSMAP_RETRY_BACKOFF_BASE_SECS", 1)?,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "app_config_test.rs"]
mod tests;
