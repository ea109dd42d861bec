//! Provider capabilities for the campusmap search pipeline.
//!
//! Defines the [`PlaceSearch`] (keyword → candidates) and [`Geocode`]
//! (address → coordinates) capability traits, plus reqwest-backed clients
//! for providers with a Naver-local-search-shaped and geocoder-shaped JSON
//! surface. The async search core depends only on the traits, so tests and
//! alternative vendors can supply their own implementations.

pub mod error;
pub mod geocode;
pub mod provider;
pub mod search;
pub mod types;

mod retry;

pub use error::ProviderError;
pub use geocode::GeocodeClient;
pub use provider::{Candidate, Geocode, GeocodedAddress, PlaceSearch};
pub use search::LocalSearchClient;
