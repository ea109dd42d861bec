//! Query normalization and the keyword-first / geocode-fallback search flow.

use std::time::Duration;

use campusmap_core::Place;
use campusmap_providers::{Candidate, Geocode, PlaceSearch};

use crate::resolver::{places_from_addresses, resolve};
use crate::session::SearchSession;

/// Geographic scoping applied to free-text queries.
///
/// When the query does not already mention one of the recognized locality
/// tokens, the qualifier is appended so provider results stay anchored to
/// the campus area.
#[derive(Debug, Clone)]
pub struct LocalityScope {
    tokens: Vec<String>,
    qualifier: String,
}

impl LocalityScope {
    #[must_use]
    pub fn new<I, S>(tokens: I, qualifier: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            qualifier: qualifier.to_owned(),
        }
    }

    /// Returns the query scoped to the locality.
    #[must_use]
    pub fn scope(&self, query: &str) -> String {
        if self.tokens.iter().any(|token| query.contains(token.as_str())) {
            query.to_owned()
        } else {
            format!("{query} {}", self.qualifier)
        }
    }
}

impl Default for LocalityScope {
    /// The campus default: Chuncheon / Gangwon / Hallym, qualified with
    /// "춘천시 한림대".
    fn default() -> Self {
        Self::new(["춘천", "강원", "한림대"], "춘천시 한림대")
    }
}

/// Owns one search's provider flow.
///
/// Step 1 asks the keyword provider; any returned candidates go through the
/// per-candidate resolver. Step 2, reached when step 1 yields nothing or
/// fails, geocodes the normalized query directly as a single address-like
/// candidate. The session ends in `Error` only when neither step could
/// reach a provider.
pub struct SearchOrchestrator<S, G> {
    keyword: S,
    geocoder: G,
    scope: LocalityScope,
    page_size: u32,
    page_offset: u32,
    /// Optional upper bound on the resolver join, guarding against a
    /// provider that never answers. `None` waits indefinitely.
    resolve_wait_cap: Option<Duration>,
}

impl<S, G> SearchOrchestrator<S, G>
where
    S: PlaceSearch + Sync,
    G: Geocode + Sync,
{
    pub fn new(keyword: S, geocoder: G) -> Self {
        Self {
            keyword,
            geocoder,
            scope: LocalityScope::default(),
            page_size: 10,
            page_offset: 1,
            resolve_wait_cap: None,
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: LocalityScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_resolve_wait_cap(mut self, cap: Duration) -> Self {
        self.resolve_wait_cap = Some(cap);
        self
    }

    /// Trims the query and applies locality scoping.
    ///
    /// Returns `None` for an empty or whitespace-only query, which is a
    /// no-op at the session level: no session is created and no provider
    /// is called.
    #[must_use]
    pub fn normalize_query(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(self.scope.scope(trimmed))
    }

    /// Runs one full search for a raw query.
    ///
    /// Returns `None` without touching any provider when the query
    /// normalizes to nothing; otherwise the returned session is terminal
    /// (`Done` or `Error`).
    pub async fn search(&self, raw: &str) -> Option<SearchSession> {
        let query = self.normalize_query(raw)?;
        Some(self.run(query).await)
    }

    /// Runs the provider flow for an already-normalized query.
    pub async fn run(&self, query: String) -> SearchSession {
        let keyword_reachable = match self
            .keyword
            .search(&query, self.page_size, self.page_offset)
            .await
        {
            Ok(candidates) if !candidates.is_empty() => {
                tracing::debug!(
                    query = %query,
                    candidates = candidates.len(),
                    "keyword search hit, resolving candidates"
                );
                let places = self.resolve_capped(&candidates).await;
                return SearchSession::done(query, places);
            }
            Ok(_) => {
                tracing::debug!(query = %query, "keyword search returned no hits, falling back to geocoder");
                true
            }
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "keyword search failed, falling back to geocoder");
                false
            }
        };

        match self.geocoder.geocode(&query).await {
            Ok(matches) => {
                tracing::debug!(query = %query, matches = matches.len(), "fallback geocode completed");
                SearchSession::done(query, places_from_addresses(&matches))
            }
            Err(err) if keyword_reachable => {
                // One provider did answer (with zero hits), so this is a
                // no-results session, not a dead one.
                tracing::warn!(query = %query, error = %err, "fallback geocode failed after empty keyword result");
                SearchSession::done(query, Vec::new())
            }
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "no provider reachable");
                SearchSession::failed(query)
            }
        }
    }

    async fn resolve_capped(&self, candidates: &[Candidate]) -> Vec<Place> {
        match self.resolve_wait_cap {
            Some(cap) => match tokio::time::timeout(cap, resolve(&self.geocoder, candidates)).await
            {
                Ok(places) => places,
                Err(_) => {
                    tracing::warn!(
                        cap_secs = cap.as_secs(),
                        "candidate resolution exceeded wait cap, returning no places"
                    );
                    Vec::new()
                }
            },
            None => resolve(&self.geocoder, candidates).await,
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
