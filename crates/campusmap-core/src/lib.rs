//! Shared domain types for the campusmap place-search core.
//!
//! Holds the [`Place`] model, deterministic rating derivation, provider-text
//! cleanup, the pure category filter / rating sort engine, and the env-based
//! application config. This crate is synchronous and has no HTTP or runtime
//! dependencies; the async search pipeline lives in `campusmap-search`.

pub mod app_config;
pub mod place;
pub mod text;
pub mod view;

pub use app_config::{AppConfig, ConfigError};
pub use place::{derive_rating, LatLng, Place};
pub use text::strip_html;
pub use view::{view, Category, SortOrder};
