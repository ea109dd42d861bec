//! Capability traits consumed by the async search core.
//!
//! Components are handed these capabilities explicitly after client
//! construction; nothing in the pipeline reaches for ambient/global provider
//! state.

use std::future::Future;

use campusmap_core::LatLng;

use crate::error::ProviderError;

/// An unresolved keyword-search hit awaiting geocoding.
///
/// `name` is kept as the provider sent it (possibly with highlight markup);
/// display cleanup happens when the resolved [`campusmap_core::Place`] is
/// built. `address` is the geocodable string: the provider's lot-number
/// address when present, otherwise the road address, otherwise empty. A
/// candidate with an empty address still counts toward the resolver's join
/// total and is dropped during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub category: String,
}

/// One address resolved to coordinates by a geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub formatted_address: String,
    /// Road-name variant of the address; empty when the provider has none.
    pub road_address: String,
    pub position: LatLng,
}

/// Keyword place-search capability: free-text query to candidate list.
pub trait PlaceSearch {
    /// Runs one keyword search.
    ///
    /// A reachable provider with no hits resolves to `Ok` with an empty
    /// list; `Err` means the provider could not deliver a usable response.
    fn search(
        &self,
        query: &str,
        page_size: u32,
        page_offset: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>, ProviderError>> + Send;
}

/// Address-geocoding capability: one address text to coordinate matches.
pub trait Geocode {
    /// Geocodes a single address. Called independently per candidate, no
    /// batching.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<GeocodedAddress>, ProviderError>> + Send;
}
