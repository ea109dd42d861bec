//! Async search core for campusmap.
//!
//! Resolves free-text location queries into a ranked, de-duplicated place
//! list and keeps marker state consistent across searches:
//!
//! - [`SearchOrchestrator`] owns one query's lifecycle: normalizes the text,
//!   asks the keyword provider first, and falls back to direct geocoding.
//! - [`resolver::resolve`] fans out one geocode lookup per candidate and
//!   joins only after every lookup has settled, in submission order.
//! - [`MarkerBoard`] exclusively owns the live marker set and the single
//!   open info panel.
//! - [`MapController`] ties the pieces together for a host UI and enforces
//!   that a new search supersedes an in-flight one.

pub mod controller;
pub mod markers;
pub mod orchestrator;
pub mod resolver;
pub mod session;

pub use controller::MapController;
pub use markers::{
    Bounds, Focus, MarkerBoard, MarkerHandle, CAMPUS_CENTER, CAMPUS_ZOOM, POSITION_EPSILON,
};
pub use orchestrator::{LocalityScope, SearchOrchestrator};
pub use resolver::resolve;
pub use session::{SearchSession, SessionStatus};
