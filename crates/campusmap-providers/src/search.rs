//! HTTP client for the keyword place-search provider.

use std::time::Duration;

use reqwest::{Client, Url};

use campusmap_core::AppConfig;

use crate::error::ProviderError;
use crate::provider::{Candidate, PlaceSearch};
use crate::retry::retry_with_backoff;
use crate::types::{LocalSearchItem, LocalSearchResponse};

/// Client for a Naver-local-search-shaped keyword endpoint.
///
/// Sends `query`, `display`, and `start` as query parameters and the
/// credentials as `X-Client-Id` / `X-Client-Secret` headers. Transient
/// failures (network errors, 429) are retried with exponential backoff.
pub struct LocalSearchClient {
    client: Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl LocalSearchClient {
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
    /// Propagates any error from [`LocalSearchClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.search_base_url,
            &config.client_id,
            &config.client_secret,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, page_size: u32, page_offset: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("display", &page_size.to_string())
            .append_pair("start", &page_offset.to_string());
        url
    }

    async fn fetch_items(
        &self,
        query: &str,
        page_size: u32,
        page_offset: u32,
    ) -> Result<Vec<LocalSearchItem>, ProviderError> {
        let url = self.build_url(query, page_size, page_offset);
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
                let parsed = serde_json::from_str::<LocalSearchResponse>(&body).map_err(|e| {
                    ProviderError::Deserialize {
                        context: format!("local search response for \"{query}\""),
                        source: e,
                    }
                })?;

                Ok(parsed.items)
            }
        })
        .await
    }
}

/// Picks the geocodable address off a search hit: lot-number address first,
/// road address as fallback, empty when the hit has neither.
fn candidate_from_item(item: LocalSearchItem) -> Candidate {
    let address = if item.address.is_empty() {
        item.road_address
    } else {
        item.address
    };
    Candidate {
        name: item.title,
        address,
        phone: item.telephone,
        category: item.category,
    }
}

impl PlaceSearch for LocalSearchClient {
    async fn search(
        &self,
        query: &str,
        page_size: u32,
        page_offset: u32,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let items = self.fetch_items(query, page_size, page_offset).await?;
        tracing::debug!(query, hits = items.len(), "keyword search completed");
        Ok(items.into_iter().map(candidate_from_item).collect())
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
