//! One query's lifecycle from submission to a terminal state.

use campusmap_core::Place;

/// Session state. `Error` is reserved for total provider unreachability; a
/// reachable provider with zero usable results terminates as `Done` with an
/// empty place list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Searching,
    Done,
    Error,
}

/// A search session: normalized query, lifecycle status, and the resolved
/// places in provider-returned order (not rating order).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub query: String,
    pub status: SessionStatus,
    pub places: Vec<Place>,
}

impl SearchSession {
    /// The state before any search has been submitted.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            query: String::new(),
            status: SessionStatus::Idle,
            places: Vec::new(),
        }
    }

    #[must_use]
    pub fn searching(query: String) -> Self {
        Self {
            query,
            status: SessionStatus::Searching,
            places: Vec::new(),
        }
    }

    #[must_use]
    pub fn done(query: String, places: Vec<Place>) -> Self {
        Self {
            query,
            status: SessionStatus::Done,
            places,
        }
    }

    /// Terminal state for a query during which no provider could be reached.
    #[must_use]
    pub fn failed(query: String) -> Self {
        Self {
            query,
            status: SessionStatus::Error,
            places: Vec::new(),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::idle()
    }
}
