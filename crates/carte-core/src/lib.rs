// crates/carte-core/src/lib.rs

//! # carte-core
//!
//! Turns a delimiter-separated roster of interns into a map of cities:
//!
//! 1. [`loader`] reads the data file (local, gzip or HTTP) and parses it into
//!    [`Row`]s.
//! 2. [`aggregate`] groups rows by lowercase city name into [`City`] records.
//! 3. [`projector`] places one marker per plottable city on a [`MapWidget`].
//! 4. [`search`] answers free-text queries over city names and residents.
//!
//! [`MapSession`] ties the pieces together and reacts to [`UiEvent`]s.

pub mod aggregate;
pub mod common;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod projector;
pub mod search;
pub mod session;
pub mod text;
pub mod traits;

pub mod prelude;

// Re-exports
pub use crate::error::{CarteError, Result};
pub use aggregate::{aggregate_rows, AggregateReport};
pub use common::CityStats;
pub use config::{CarteConfig, ColumnNames, MarkerIcon};
pub use loader::DataSource;
pub use model::{City, CityId, LatLng, Resident, Row};
pub use search::{SearchIndex, Suggestion, SuggestionKind};
pub use session::{MapSession, UiEvent};
pub use traits::{MapWidget, NameMatch, SearchSurface};
