//! Terminal stand-ins for the map widget and the page.
//!
//! [`ConsoleMap`] keeps markers in memory and records every action as a
//! line of text; [`ConsoleSurface`] records what the page would show.

use carte_core::prelude::*;

#[derive(Debug, Clone)]
pub struct ConsoleMarker {
    pub position: LatLng,
    pub popup: String,
    pub city: Option<CityId>,
}

#[derive(Debug, Default)]
pub struct ConsoleMap {
    markers: Vec<ConsoleMarker>,
    actions: Vec<String>,
}

impl ConsoleMap {
    pub fn markers(&self) -> &[ConsoleMarker] {
        &self.markers
    }

    /// Actions recorded since the last call.
    pub fn take_actions(&mut self) -> Vec<String> {
        std::mem::take(&mut self.actions)
    }
}

impl MapWidget for ConsoleMap {
    type Marker = usize;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.actions.push(format!(
            "view -> ({:.4}, {:.4}) zoom {zoom}",
            center.lat, center.lng
        ));
    }

    fn add_tile_layer(&mut self, url_template: &str, _attribution: &str) {
        self.actions.push(format!("tiles -> {url_template}"));
    }

    fn add_marker(&mut self, at: LatLng, _icon: Option<&MarkerIcon>) -> usize {
        self.markers.push(ConsoleMarker {
            position: at,
            popup: String::new(),
            city: None,
        });
        self.markers.len() - 1
    }

    fn bind_popup(&mut self, marker: &usize, html: &str) {
        if let Some(m) = self.markers.get_mut(*marker) {
            m.popup = html.to_string();
        }
    }

    fn open_popup(&mut self, marker: &usize) {
        self.actions.push(format!("popup -> marker #{marker}"));
    }

    fn marker_position(&self, marker: &usize) -> LatLng {
        self.markers[*marker].position
    }

    fn on_marker_click(&mut self, marker: &usize, city: CityId) {
        if let Some(m) = self.markers.get_mut(*marker) {
            m.city = Some(city);
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleSurface {
    pub suggestions: Vec<Suggestion>,
    pub query_text: String,
    pub menu_collapsed: bool,
    pub notices: Vec<String>,
}

impl SearchSurface for ConsoleSurface {
    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        self.suggestions = suggestions.to_vec();
    }

    fn set_query_text(&mut self, text: &str) {
        self.query_text = text.to_string();
    }

    fn collapse_menu(&mut self) -> bool {
        self.menu_collapsed = true;
        true
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "Ville_Nettoyee,Latitude,Longitude,Prenom,Nom,Entreprise,Date_Fin\n\
                        Paris,48.85,2.35,Alice,Martin,Parity,\n\
                        Lyon,45.76,4.83,Jean,Dupont,Acme,\n";

    fn session() -> (MapSession<ConsoleMap>, ConsoleSurface) {
        let mut session = MapSession::new(CarteConfig::default(), ConsoleMap::default());
        let mut surface = ConsoleSurface::default();
        session
            .load(&DataSource::Text(DATA.into()), &mut surface)
            .unwrap();
        (session, surface)
    }

    #[test]
    fn markers_carry_popup_and_city() {
        let (session, _) = session();
        let markers = session.widget().markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].city, Some(1));
        assert!(markers[1].popup.contains("Jean Dupont (Acme)"));
    }

    #[test]
    fn selection_is_recorded() {
        let (mut session, mut surface) = session();
        session.widget_mut().take_actions();

        session
            .dispatch(UiEvent::QueryChanged("lyon".into()), &mut surface)
            .unwrap();
        session
            .dispatch(UiEvent::SuggestionSelected(0), &mut surface)
            .unwrap();

        let actions = session.widget_mut().take_actions();
        assert_eq!(actions, ["popup -> marker #1", "view -> (45.7600, 4.8300) zoom 10"]);
        assert_eq!(surface.query_text, "Lyon");
        assert!(surface.menu_collapsed);
        assert!(surface.suggestions.is_empty());
    }
}
