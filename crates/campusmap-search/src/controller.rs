//! Host-facing controller tying the orchestrator to the marker board.
//!
//! Owns the single mutable shared state of the pipeline (current session
//! plus marker board) behind one lock, and enforces the supersession rule:
//! a new search invalidates the previous one, and results of a superseded
//! search are discarded when they eventually arrive.

use std::sync::{Mutex, MutexGuard, PoisonError};

use campusmap_core::{view, Category, Place, SortOrder};
use campusmap_providers::{Geocode, PlaceSearch};

use crate::markers::{Bounds, Focus, MarkerBoard, MarkerHandle};
use crate::orchestrator::SearchOrchestrator;
use crate::session::SearchSession;

struct HostState {
    /// Bumped at every submission; a finished search only applies its
    /// results when the epoch is still the one it started with.
    epoch: u64,
    session: SearchSession,
    board: MarkerBoard,
}

/// The host UI's handle onto the search pipeline.
///
/// All state access goes through short lock-held sections; the lock is
/// never held across a provider await, so concurrent submissions interleave
/// and the epoch check decides which one's results survive.
pub struct MapController<S, G> {
    orchestrator: SearchOrchestrator<S, G>,
    state: Mutex<HostState>,
}

impl<S, G> MapController<S, G>
where
    S: PlaceSearch + Sync,
    G: Geocode + Sync,
{
    #[must_use]
    pub fn new(orchestrator: SearchOrchestrator<S, G>) -> Self {
        Self {
            orchestrator,
            state: Mutex::new(HostState {
                epoch: 0,
                session: SearchSession::idle(),
                board: MarkerBoard::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submits a search query.
    ///
    /// An empty or whitespace-only query is ignored without creating a
    /// session. Otherwise the previous session is superseded: its markers
    /// are cleared before any provider call goes out, and if it is still in
    /// flight its eventual results will be dropped. When this search
    /// finishes un-superseded, its places become the current session and
    /// the marker set is rebuilt for them.
    pub async fn submit(&self, raw: &str) {
        let Some(query) = self.orchestrator.normalize_query(raw) else {
            tracing::debug!("blank query ignored");
            return;
        };

        let epoch = {
            let mut state = self.state();
            state.epoch += 1;
            // Stale markers must be gone before the new session's provider
            // calls are issued.
            state.board.clear();
            state.session = SearchSession::searching(query.clone());
            state.epoch
        };

        let session = self.orchestrator.run(query).await;

        let mut state = self.state();
        if state.epoch != epoch {
            tracing::debug!(query = %session.query, "search superseded, discarding its results");
            return;
        }
        state.board.replace(&session.places);
        state.session = session;
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> SearchSession {
        self.state().session.clone()
    }

    /// Snapshot of the live marker handles.
    #[must_use]
    pub fn markers(&self) -> Vec<MarkerHandle> {
        self.state().board.markers().to_vec()
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Bounds> {
        self.state().board.viewport()
    }

    #[must_use]
    pub fn viewport_generation(&self) -> u64 {
        self.state().board.viewport_generation()
    }

    #[must_use]
    pub fn focus(&self) -> Option<Focus> {
        self.state().board.focus()
    }

    /// Index of the open info panel, if any.
    #[must_use]
    pub fn open_panel(&self) -> Option<usize> {
        self.state().board.open_panel()
    }

    /// Marker click: closes every other panel, opens this one.
    pub fn select_marker(&self, index: usize) -> bool {
        self.state().board.select(index)
    }

    /// List-side selection: resolves to the marker created for this place
    /// (matched by position) and behaves like a direct marker click.
    pub fn select_place(&self, place: &Place) -> bool {
        self.state().board.select_place(place)
    }

    /// The displayed list for the current session under a category filter
    /// and sort order. Pure with respect to the session's places.
    #[must_use]
    pub fn view(&self, category: Category, order: SortOrder) -> Vec<Place> {
        view(&self.state().session.places, category, order)
    }
}
