//! Basic usage example for carte-rs
//!
//! This example demonstrates how to:
//! - Load the bundled intern roster
//! - Inspect the aggregated cities
//! - Search the way the page's search box does
//! - Select a suggestion and see what the map is asked to do

use carte_rs::prelude::*;

/// A map that just prints what it is told.
#[derive(Default)]
struct PrintMap {
    positions: Vec<LatLng>,
}

impl MapWidget for PrintMap {
    type Marker = usize;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        println!("  [map] view ({:.3}, {:.3}) zoom {zoom}", center.lat, center.lng);
    }

    fn add_tile_layer(&mut self, url_template: &str, _attribution: &str) {
        println!("  [map] tiles {url_template}");
    }

    fn add_marker(&mut self, at: LatLng, _icon: Option<&MarkerIcon>) -> usize {
        self.positions.push(at);
        self.positions.len() - 1
    }

    fn bind_popup(&mut self, _marker: &usize, _html: &str) {}

    fn open_popup(&mut self, marker: &usize) {
        println!("  [map] open popup of marker #{marker}");
    }

    fn marker_position(&self, marker: &usize) -> LatLng {
        self.positions[*marker]
    }

    fn on_marker_click(&mut self, _marker: &usize, _city: CityId) {}
}

#[derive(Default)]
struct PrintSurface;

impl SearchSurface for PrintSurface {
    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        for (n, s) in suggestions.iter().enumerate() {
            println!("  [{n}] {}", s.label);
        }
    }

    fn set_query_text(&mut self, text: &str) {
        println!("  [page] search field = {text}");
    }

    fn collapse_menu(&mut self) -> bool {
        println!("  [page] menu collapsed");
        true
    }

    fn notify(&mut self, message: &str) {
        eprintln!("  [page] {message}");
    }
}

fn main() -> Result<()> {
    println!("=== carte-rs Basic Usage Example ===\n");

    let config = CarteConfig::default();
    let source = DataSource::default_for(&config);
    let mut surface = PrintSurface;

    println!("--- Example 1: Create the map and load {} ---", source.describe());
    let mut session = MapSession::new(config, PrintMap::default());
    let report = session.load(&source, &mut surface)?;
    println!(
        "✓ {} rows -> {} cities ({} unplottable)\n",
        report.rows, report.cities, report.unplottable
    );

    println!("--- Example 2: Cities and their residents ---");
    for city in session.cities() {
        println!("{} ({} resident(s))", city.name(), city.residents().len());
        for r in city.residents() {
            println!("  - {}", r.display);
        }
    }
    println!();

    println!("--- Example 3: Search 'par' ---");
    session.dispatch(UiEvent::QueryChanged("par".into()), &mut surface)?;
    println!();

    println!("--- Example 4: Select the first suggestion ---");
    if !session.suggestions().is_empty() {
        session.dispatch(UiEvent::SuggestionSelected(0), &mut surface)?;
    }

    Ok(())
}
