#![allow(dead_code)]

use carte_core::prelude::*;

/// Everything a test map was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    SetView(LatLng, u8),
    TileLayer(String),
    AddMarker(LatLng),
    BindPopup(usize, String),
    OpenPopup(usize),
    OnClick(usize, CityId),
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
    positions: Vec<LatLng>,
}

impl RecordingMap {
    pub fn last_view(&self) -> Option<(LatLng, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            MapCall::SetView(at, zoom) => Some((*at, *zoom)),
            _ => None,
        })
    }

    pub fn opened(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapCall::OpenPopup(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn popup_of(&self, marker: usize) -> Option<&str> {
        self.calls.iter().find_map(|c| match c {
            MapCall::BindPopup(m, html) if *m == marker => Some(html.as_str()),
            _ => None,
        })
    }

    pub fn marker_count(&self) -> usize {
        self.positions.len()
    }
}

impl MapWidget for RecordingMap {
    type Marker = usize;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.calls.push(MapCall::SetView(center, zoom));
    }

    fn add_tile_layer(&mut self, url_template: &str, _attribution: &str) {
        self.calls.push(MapCall::TileLayer(url_template.to_string()));
    }

    fn add_marker(&mut self, at: LatLng, _icon: Option<&MarkerIcon>) -> usize {
        self.calls.push(MapCall::AddMarker(at));
        self.positions.push(at);
        self.positions.len() - 1
    }

    fn bind_popup(&mut self, marker: &usize, html: &str) {
        self.calls.push(MapCall::BindPopup(*marker, html.to_string()));
    }

    fn open_popup(&mut self, marker: &usize) {
        self.calls.push(MapCall::OpenPopup(*marker));
    }

    fn marker_position(&self, marker: &usize) -> LatLng {
        self.positions[*marker]
    }

    fn on_marker_click(&mut self, marker: &usize, city: CityId) {
        self.calls.push(MapCall::OnClick(*marker, city));
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub shown: Vec<Suggestion>,
    pub refreshes: usize,
    pub query_text: Option<String>,
    pub collapsed: usize,
    /// Mimics a wide layout where the menu stays open after a selection.
    pub keeps_menu_open: bool,
    pub notices: Vec<String>,
}

impl SearchSurface for RecordingSurface {
    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        self.shown = suggestions.to_vec();
        self.refreshes += 1;
    }

    fn set_query_text(&mut self, text: &str) {
        self.query_text = Some(text.to_string());
    }

    fn collapse_menu(&mut self) -> bool {
        self.collapsed += 1;
        !self.keeps_menu_open
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

pub const HEADER: &str = "Ville_Nettoyee,Latitude,Longitude,Prenom,Nom,Entreprise,Date_Fin";

pub fn csv(lines: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text
}

pub fn session_from(lines: &[&str]) -> MapSession<RecordingMap> {
    let mut session = MapSession::new(CarteConfig::default(), RecordingMap::default());
    let mut surface = RecordingSurface::default();
    session
        .load(&DataSource::Text(csv(lines)), &mut surface)
        .unwrap();
    assert!(surface.notices.is_empty());
    session
}
