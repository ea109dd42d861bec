//! Wire types for the two provider JSON surfaces.

use serde::Deserialize;

/// Response envelope of the keyword place-search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSearchResponse {
    #[serde(default)]
    pub items: Vec<LocalSearchItem>,
}

/// One keyword-search hit. `title` and `address` may carry `<b>` highlight
/// markup around the matched term.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSearchItem {
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, rename = "roadAddress")]
    pub road_address: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub category: String,
}

/// Response envelope of the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// `"OK"` or `"ERROR"`.
    pub status: String,
    #[serde(default)]
    pub items: Vec<GeocodeItem>,
}

/// One geocoded address.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeItem {
    #[serde(default, rename = "formattedAddress")]
    pub formatted_address: String,
    #[serde(default, rename = "roadAddress")]
    pub road_address: String,
    pub point: GeocodePoint,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeocodePoint {
    pub lat: f64,
    pub lng: f64,
}
