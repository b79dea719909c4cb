//! carte-core prelude: bring common types and traits into scope for demos
//! and front-ends.

#![allow(unused_imports)]

pub use crate::aggregate::{aggregate_rows, AggregateReport};
pub use crate::common::CityStats;
pub use crate::config::{CarteConfig, ColumnNames, MarkerIcon};
pub use crate::error::{CarteError, Result};
pub use crate::loader::{load_rows, load_rows_or_report, parse_bytes, parse_rows, DataSource};
pub use crate::model::{City, CityId, LatLng, Resident, Row};
pub use crate::projector::{popup_html, project, Projection};
pub use crate::search::{SearchIndex, Suggestion, SuggestionKind};
pub use crate::session::{MapSession, UiEvent};
pub use crate::traits::{MapWidget, NameMatch, SearchSurface};
