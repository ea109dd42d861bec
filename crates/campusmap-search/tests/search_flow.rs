//! End-to-end tests for the search pipeline behind `MapController`.
//!
//! Providers are in-process mocks implementing the capability traits; the
//! supersession test gates the first search's geocode lookups on a
//! `Notify` so a second search can land while the first is still in
//! flight.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Notify;

use campusmap_core::{Category, LatLng, Place, SortOrder};
use campusmap_providers::{Candidate, Geocode, GeocodedAddress, PlaceSearch, ProviderError};
use campusmap_search::{MapController, SearchOrchestrator, SessionStatus};

// ---------------------------------------------------------------------------
// Mock providers
// ---------------------------------------------------------------------------

/// Keyword provider scripted by query substring; unmatched queries get an
/// empty hit list.
#[derive(Default)]
struct ScriptedSearch {
    scripts: Vec<(String, Vec<Candidate>)>,
    down: bool,
}

impl ScriptedSearch {
    fn on(mut self, query_contains: &str, candidates: Vec<Candidate>) -> Self {
        self.scripts.push((query_contains.to_owned(), candidates));
        self
    }

    fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }
}

impl PlaceSearch for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        _page_size: u32,
        _page_offset: u32,
    ) -> Result<Vec<Candidate>, ProviderError> {
        if self.down {
            return Err(ProviderError::UnexpectedStatus {
                status: 503,
                url: "mock://search".to_owned(),
            });
        }
        Ok(self
            .scripts
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, candidates)| candidates.clone())
            .unwrap_or_default())
    }
}

/// Table geocoder; addresses listed in `gated` wait on the notify handle
/// before answering.
#[derive(Default)]
struct TableGeocoder {
    table: HashMap<String, LatLng>,
    gated: Vec<String>,
    gate: Option<Arc<Notify>>,
    down: bool,
}

impl TableGeocoder {
    fn with(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.table.insert(address.to_owned(), LatLng::new(lat, lng));
        self
    }

    fn gated(mut self, address: &str, gate: Arc<Notify>) -> Self {
        self.gated.push(address.to_owned());
        self.gate = Some(gate);
        self
    }

    fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }
}

impl Geocode for TableGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodedAddress>, ProviderError> {
        if self.down {
            return Err(ProviderError::UnexpectedStatus {
                status: 503,
                url: "mock://geocode".to_owned(),
            });
        }
        if self.gated.iter().any(|a| a == address) {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }
        Ok(self
            .table
            .get(address)
            .map(|position| {
                vec![GeocodedAddress {
                    formatted_address: address.to_owned(),
                    road_address: String::new(),
                    position: *position,
                }]
            })
            .unwrap_or_default())
    }
}

fn candidate(name: &str, address: &str, category: &str) -> Candidate {
    Candidate {
        name: name.to_owned(),
        address: address.to_owned(),
        phone: String::new(),
        category: category.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn keyword_search_builds_places_markers_and_viewport() {
    let keyword = ScriptedSearch::default().on(
        "카페",
        vec![
            candidate("<b>카페</b> 모리", "옥천동 1", "카페,디저트"),
            candidate("스타벅스 한림대점", "한림대학길 1", "카페"),
        ],
    );
    let geocoder = TableGeocoder::default()
        .with("옥천동 1", 37.8800, 127.7300)
        .with("한림대학길 1", 37.8861, 127.7386);
    let controller = MapController::new(SearchOrchestrator::new(keyword, geocoder));

    controller.submit("카페").await;

    let session = controller.session();
    assert_eq!(session.status, SessionStatus::Done);
    assert_eq!(session.places.len(), 2);
    assert_eq!(session.places[0].name, "카페 모리");

    let markers = controller.markers();
    assert_eq!(markers.len(), 2);

    let viewport = controller.viewport().expect("viewport should cover the result");
    assert!(viewport.contains(session.places[0].position));
    assert!(viewport.contains(session.places[1].position));
}

#[tokio::test]
async fn empty_keyword_result_falls_back_to_geocoder() {
    let keyword = ScriptedSearch::default();
    let geocoder = TableGeocoder::default().with("효자동 12-3 춘천시 한림대", 37.87, 127.72);
    let controller = MapController::new(SearchOrchestrator::new(keyword, geocoder));

    controller.submit("효자동 12-3").await;

    let session = controller.session();
    assert_eq!(session.status, SessionStatus::Done);
    assert_eq!(session.places.len(), 1);
    assert_eq!(controller.markers().len(), 1);
}

#[tokio::test]
async fn unreachable_providers_leave_an_error_session_and_no_markers() {
    let controller = MapController::new(SearchOrchestrator::new(
        ScriptedSearch::down(),
        TableGeocoder::down(),
    ));

    controller.submit("카페").await;

    let session = controller.session();
    assert_eq!(session.status, SessionStatus::Error);
    assert!(session.places.is_empty());
    assert!(controller.markers().is_empty());
    assert!(controller.viewport().is_none(), "no viewport was ever computed");
}

#[tokio::test]
async fn blank_submission_is_a_no_op() {
    let controller = MapController::new(SearchOrchestrator::new(
        ScriptedSearch::default(),
        TableGeocoder::default(),
    ));

    controller.submit("   ").await;

    assert_eq!(controller.session().status, SessionStatus::Idle);
    assert!(controller.markers().is_empty());
}

#[tokio::test]
async fn category_filter_applies_to_the_current_session() {
    let keyword = ScriptedSearch::default().on(
        "카페",
        vec![
            candidate("GS25", "주소1", "편의점"),
            candidate("스타벅스", "주소2", "스타벅스 카페"),
        ],
    );
    let geocoder = TableGeocoder::default()
        .with("주소1", 37.1, 127.1)
        .with("주소2", 37.2, 127.2);
    let controller = MapController::new(SearchOrchestrator::new(keyword, geocoder));

    controller.submit("카페").await;

    let shown = controller.view(Category::Cafe, SortOrder::Descending);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].name, "스타벅스");
}

#[tokio::test]
async fn list_selection_opens_the_matching_marker_panel() {
    let keyword = ScriptedSearch::default().on(
        "카페",
        vec![
            candidate("카페 모리", "주소1", "카페"),
            candidate("스타벅스", "주소2", "카페"),
        ],
    );
    let geocoder = TableGeocoder::default()
        .with("주소1", 37.1, 127.1)
        .with("주소2", 37.2, 127.2);
    let controller = MapController::new(SearchOrchestrator::new(keyword, geocoder));

    controller.submit("카페").await;

    // Open marker 0 directly, then select place 1 from the list view; the
    // panel must move without any two-open intermediate state.
    assert!(controller.select_marker(0));
    assert_eq!(controller.open_panel(), Some(0));

    let from_list: Place = controller.session().places[1].clone();
    assert!(controller.select_place(&from_list));
    assert_eq!(controller.open_panel(), Some(1));

    let open_count = controller
        .markers()
        .iter()
        .filter(|m| m.is_panel_open())
        .count();
    assert_eq!(open_count, 1);

    let focus = controller.focus().expect("selection sets focus");
    assert!(focus.center.approx_eq(&from_list.position, 1e-9));
}

// ---------------------------------------------------------------------------
// Supersession
// ---------------------------------------------------------------------------

#[tokio::test]
async fn superseded_search_never_contributes_places_or_markers() {
    let gate = Arc::new(Notify::new());

    let keyword = ScriptedSearch::default()
        .on("카페", vec![candidate("느린카페", "느린주소", "카페")])
        .on("식당", vec![candidate("빠른식당", "빠른주소", "식당")]);
    let geocoder = TableGeocoder::default()
        .with("느린주소", 37.1, 127.1)
        .gated("느린주소", Arc::clone(&gate))
        .with("빠른주소", 37.2, 127.2);

    let controller = Arc::new(MapController::new(SearchOrchestrator::new(keyword, geocoder)));

    // Search A parks inside its geocode lookup.
    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit("카페").await }
    });
    while controller.session().status != SessionStatus::Searching {
        tokio::task::yield_now().await;
    }
    assert!(controller.session().query.starts_with("카페"));

    // Search B supersedes A and completes.
    controller.submit("식당").await;
    let session = controller.session();
    assert_eq!(session.status, SessionStatus::Done);
    assert_eq!(session.places[0].name, "빠른식당");

    // Release A; its late results must be discarded.
    gate.notify_one();
    first.await.expect("search A task should finish");

    let session = controller.session();
    assert!(session.query.starts_with("식당"));
    assert_eq!(session.places.len(), 1);
    assert_eq!(session.places[0].name, "빠른식당");

    let markers = controller.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].place().name, "빠른식당");
}
