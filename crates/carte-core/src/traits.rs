// crates/carte-core/src/traits.rs
use crate::config::MarkerIcon;
use crate::model::{CityId, LatLng};
use crate::search::Suggestion;
use crate::text::fold_key;

/// The external map widget (Leaflet in the browser, a console stub in the
/// CLI, a recorder in tests).
///
/// The session never renders anything itself; it only asks the widget to.
/// Click handlers follow a message-passing model: the widget remembers which
/// city a marker belongs to and the front-end later feeds a
/// [`UiEvent::MarkerClicked`](crate::UiEvent::MarkerClicked) back into the
/// session.
pub trait MapWidget {
    /// Opaque handle to a placed marker.
    type Marker: Clone;

    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    fn add_marker(&mut self, at: LatLng, icon: Option<&MarkerIcon>) -> Self::Marker;
    fn bind_popup(&mut self, marker: &Self::Marker, html: &str);
    fn open_popup(&mut self, marker: &Self::Marker);
    fn marker_position(&self, marker: &Self::Marker) -> LatLng;
    fn on_marker_click(&mut self, marker: &Self::Marker, city: CityId);
}

/// The DOM side of the page: search field, suggestion list, side menu and a
/// place to show notices.
pub trait SearchSurface {
    /// Replaces the displayed suggestions. An empty slice clears the list.
    fn show_suggestions(&mut self, suggestions: &[Suggestion]);
    fn set_query_text(&mut self, text: &str);
    /// Called after a selection; narrow layouts close the menu, wide ones may
    /// leave it open. Returns whether the menu is closed afterwards.
    fn collapse_menu(&mut self) -> bool;
    fn notify(&mut self, message: &str);
}

/// Name-based matching helpers for types that expose a display name.
///
/// # Examples
/// ```rust
/// use carte_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Orléans").is_named("orleans"));
/// ```
pub trait NameMatch {
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive equality.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }
}
