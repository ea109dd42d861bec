//! The resolved place model and deterministic rating derivation.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if `other` lies within `epsilon` degrees on both axes.
    ///
    /// Used to match a list-side selection back to the marker created for the
    /// same place, where the coordinates went through one geocode round-trip.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() < epsilon && (self.lng - other.lng).abs() < epsilon
    }
}

/// A resolved, displayable location.
///
/// Every `Place` carries a geocoded `position`; candidates whose address
/// could not be geocoded are dropped upstream, never represented with a
/// placeholder position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable identifier within one search session (sequence index).
    pub id: usize,
    /// Display name, HTML-stripped.
    pub name: String,
    /// Display address, HTML-stripped.
    pub address: String,
    /// Contact number; empty when the provider did not supply one.
    pub phone: String,
    /// Free-text category tag; empty when unknown.
    pub category: String,
    /// Display rating in `[3.0, 5.0)` with one-decimal granularity.
    pub rating: f64,
    pub position: LatLng,
}

/// Derives a deterministic display rating from a place's identity.
///
/// SHA-256 over `name || 0x1f || address`, folded into the `[3.0, 5.0)`
/// range at one-decimal granularity. The same name/address pair always
/// yields the same rating, so rating-ordered views are reproducible.
#[must_use]
pub fn derive_rating(name: &str, address: &str) -> f64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0x1f]);
    hasher.update(address.as_bytes());
    let digest = hasher.finalize();

    // Fold the first two digest bytes into one of the twenty 0.1 steps
    // between 3.0 and 4.9 inclusive.
    let bucket = u64::from(u16::from_be_bytes([digest[0], digest[1]])) % 20;
    #[allow(clippy::cast_precision_loss)]
    let rating = 3.0 + bucket as f64 / 10.0;
    rating
}

#[cfg(test)]
#[path = "place_test.rs"]
mod tests;
