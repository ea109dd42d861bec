//! Live marker state for the current search session.
//!
//! The [`MarkerBoard`] is the only owner of marker handles and of the
//! "which info panel is open" flag. The board is replaced wholesale on each
//! new session; nothing mutates the marker set from outside.

use campusmap_core::{LatLng, Place};

/// Tolerance for matching a list-side selection to a marker, in degrees.
/// Coordinates went through one geocode round-trip, so exact equality is
/// too strict.
pub const POSITION_EPSILON: f64 = 1e-4;

/// Zoom level requested when a place is focused from the list.
const FOCUS_ZOOM: u8 = 16;

/// Initial map anchor before any search: the Hallym University campus in
/// Chuncheon.
pub const CAMPUS_CENTER: LatLng = LatLng {
    lat: 37.88607,
    lng: 127.73856,
};

/// Initial zoom level paired with [`CAMPUS_CENTER`].
pub const CAMPUS_ZOOM: u8 = 15;

/// Rectangular region covering a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn around(position: LatLng) -> Self {
        Self {
            south: position.lat,
            west: position.lng,
            north: position.lat,
            east: position.lng,
        }
    }

    fn extend(&mut self, position: LatLng) {
        self.south = self.south.min(position.lat);
        self.west = self.west.min(position.lng);
        self.north = self.north.max(position.lat);
        self.east = self.east.max(position.lng);
    }

    #[must_use]
    pub fn contains(&self, position: LatLng) -> bool {
        (self.south..=self.north).contains(&position.lat)
            && (self.west..=self.east).contains(&position.lng)
    }
}

/// The binding between one resolved place and its on-map marker plus info
/// panel. Handles live exactly as long as the session that created them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    place: Place,
    panel_open: bool,
}

impl MarkerHandle {
    fn new(place: Place) -> Self {
        Self {
            place,
            panel_open: false,
        }
    }

    #[must_use]
    pub fn place(&self) -> &Place {
        &self.place
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }
}

/// Requested map focus after a selection: center plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub center: LatLng,
    pub zoom: u8,
}

/// Exclusively owns the live marker set for the current session.
///
/// Invariants:
/// - at most one handle has an open info panel at any time;
/// - `replace` destroys every previous handle (panels closed) before any
///   new handle exists;
/// - the viewport is recomputed only for a non-empty place list, so an
///   empty result never recenters the map.
#[derive(Debug, Clone, Default)]
pub struct MarkerBoard {
    markers: Vec<MarkerHandle>,
    viewport: Option<Bounds>,
    /// Bumped every time the viewport is recomputed; hosts poll this as the
    /// "viewport changed" signal.
    viewport_generation: u64,
    focus: Option<Focus>,
}

impl MarkerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole marker set with markers for `places`.
    ///
    /// Old handles are destroyed first, then the new set is created and the
    /// viewport recomputed to cover every new position. With an empty
    /// `places` the board ends up empty and the viewport stays as it was.
    pub fn replace(&mut self, places: &[Place]) {
        self.clear();

        let mut bounds: Option<Bounds> = None;
        for place in places {
            match &mut bounds {
                Some(b) => b.extend(place.position),
                None => bounds = Some(Bounds::around(place.position)),
            }
            self.markers.push(MarkerHandle::new(place.clone()));
        }

        if let Some(bounds) = bounds {
            self.viewport = Some(bounds);
            self.viewport_generation += 1;
        }
    }

    /// Destroys every handle, closing any open panel. The viewport is left
    /// untouched.
    pub fn clear(&mut self) {
        for marker in &mut self.markers {
            marker.panel_open = false;
        }
        self.markers.clear();
        self.focus = None;
    }

    /// Selects the marker at `index`: every other panel is closed, then
    /// this one is opened, and the map focus moves to its place.
    ///
    /// Both steps run synchronously under one `&mut` borrow, so there is no
    /// observable state with two panels open. Returns `false` for an
    /// out-of-range index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.markers.len() {
            return false;
        }
        for marker in &mut self.markers {
            marker.panel_open = false;
        }
        self.markers[index].panel_open = true;
        self.focus = Some(Focus {
            center: self.markers[index].place.position,
            zoom: FOCUS_ZOOM,
        });
        true
    }

    /// Selects the marker created for `place`, matched by position within
    /// [`POSITION_EPSILON`] rather than by identity, and behaves exactly
    /// like a direct marker click. Returns `false` when no marker matches.
    pub fn select_place(&mut self, place: &Place) -> bool {
        match self
            .markers
            .iter()
            .position(|m| m.place.position.approx_eq(&place.position, POSITION_EPSILON))
        {
            Some(index) => self.select(index),
            None => false,
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    /// Index of the marker whose info panel is open, if any.
    #[must_use]
    pub fn open_panel(&self) -> Option<usize> {
        self.markers.iter().position(MarkerHandle::is_panel_open)
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    #[must_use]
    pub const fn viewport_generation(&self) -> u64 {
        self.viewport_generation
    }

    #[must_use]
    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// The focus a host should render: the current selection, or the campus
    /// anchor when nothing has been selected yet.
    #[must_use]
    pub fn focus_or_campus(&self) -> Focus {
        self.focus.unwrap_or(Focus {
            center: CAMPUS_CENTER,
            zoom: CAMPUS_ZOOM,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
#[path = "markers_test.rs"]
mod tests;
