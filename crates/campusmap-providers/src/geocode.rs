//! HTTP client for the address-geocoding provider.

use std::time::Duration;

use reqwest::{Client, Url};

use campusmap_core::AppConfig;

use crate::error::ProviderError;
use crate::provider::{Geocode, GeocodedAddress};
use crate::retry::retry_with_backoff;
use crate::types::GeocodeResponse;

/// Client for a geocoder-shaped endpoint: one address string in, zero or
/// more coordinate matches out.
///
/// The provider envelope carries a `status` field; `"ERROR"` with a parsed
/// body is treated as zero matches rather than a transport failure, since
/// the provider was reachable and answered.
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl GeocodeClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] if `base_url` does not
    /// parse, or [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`GeocodeClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.geocode_base_url,
            &config.client_id,
            &config.client_secret,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("query", address);
        url
    }

    async fn fetch_response(&self, address: &str) -> Result<GeocodeResponse, ProviderError> {
        let url = self.build_url(address);
        let max_retries = self.max_retries;
        let backoff_base_secs = self.backoff_base_secs;

        retry_with_backoff(max_retries, backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header("X-Client-Id", &self.client_id)
                    .header("X-Client-Secret", &self.client_secret)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ProviderError::RateLimited {
                        host: url.host_str().unwrap_or("unknown").to_owned(),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ProviderError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<GeocodeResponse>(&body).map_err(|e| {
                    ProviderError::Deserialize {
                        context: format!("geocode response for \"{address}\""),
                        source: e,
                    }
                })
            }
        })
        .await
    }
}

impl Geocode for GeocodeClient {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodedAddress>, ProviderError> {
        let parsed = self.fetch_response(address).await?;

        if parsed.status != "OK" {
            tracing::warn!(
                address,
                status = %parsed.status,
                "geocoder answered with non-OK status, treating as zero matches"
            );
            return Ok(Vec::new());
        }

        tracing::debug!(address, matches = parsed.items.len(), "geocode completed");
        Ok(parsed
            .items
            .into_iter()
            .map(|item| GeocodedAddress {
                formatted_address: item.formatted_address,
                road_address: item.road_address,
                position: campusmap_core::LatLng::new(item.point.lat, item.point.lng),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "geocode_test.rs"]
mod tests;
