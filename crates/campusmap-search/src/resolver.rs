//! Per-candidate geocode fan-out and join.
//!
//! This is the system's core concurrency pattern: N independent lookups,
//! one per keyword-search candidate, joined into a single place list. The
//! join finalizes only once every lookup has settled; completion order never
//! leaks into the output, which stays in candidate-submission order.

use futures::future;

use campusmap_core::{derive_rating, strip_html, LatLng, Place};
use campusmap_providers::{Candidate, Geocode, GeocodedAddress};

/// Resolves candidates into places by geocoding each candidate's address
/// concurrently.
///
/// A candidate whose lookup fails, returns zero matches, or carries no
/// address is dropped from the output without aborting the other lookups.
/// With no candidates the function resolves immediately to an empty list.
/// The returned list length is therefore at most `candidates.len()`, and
/// each place's `id` is its index in the output.
pub async fn resolve<G>(geocoder: &G, candidates: &[Candidate]) -> Vec<Place>
where
    G: Geocode + Sync,
{
    if candidates.is_empty() {
        return Vec::new();
    }

    let lookups = candidates.iter().map(|candidate| async move {
        if candidate.address.is_empty() {
            tracing::debug!(name = %candidate.name, "candidate has no geocodable address, dropping");
            return None;
        }
        match geocoder.geocode(&candidate.address).await {
            Ok(matches) => {
                // First match wins; zero matches drops the candidate.
                matches.first().map(|hit| (candidate, hit.position))
            }
            Err(err) => {
                tracing::warn!(
                    address = %candidate.address,
                    error = %err,
                    "geocode lookup failed, dropping candidate"
                );
                None
            }
        }
    });

    // join_all polls every lookup to completion and yields results in the
    // order the futures were submitted, which gives both halves of the join
    // contract: finalize only after all N settle, output in candidate order.
    let settled = future::join_all(lookups).await;

    let places: Vec<Place> = settled
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(id, (candidate, position))| build_place(id, candidate, position))
        .collect();

    tracing::debug!(
        submitted = candidates.len(),
        resolved = places.len(),
        "candidate resolution joined"
    );
    places
}

fn build_place(id: usize, candidate: &Candidate, position: LatLng) -> Place {
    let name = strip_html(&candidate.name);
    let address = strip_html(&candidate.address);
    let rating = derive_rating(&name, &address);
    Place {
        id,
        name,
        address,
        phone: candidate.phone.clone(),
        category: candidate.category.clone(),
        rating,
        position,
    }
}

/// Builds places straight from geocoder matches, for the fallback path where
/// the raw query itself was geocoded. Name and address both come from the
/// geocoder; phone and category are unknown.
pub(crate) fn places_from_addresses(matches: &[GeocodedAddress]) -> Vec<Place> {
    matches
        .iter()
        .enumerate()
        .map(|(id, hit)| {
            let name = strip_html(&hit.formatted_address);
            let address = if hit.road_address.is_empty() {
                strip_html(&hit.formatted_address)
            } else {
                strip_html(&hit.road_address)
            };
            let rating = derive_rating(&name, &address);
            Place {
                id,
                name,
                address,
                phone: String::new(),
                category: String::new(),
                rating,
                position: hit.position,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
