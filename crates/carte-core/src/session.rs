// crates/carte-core/src/session.rs
use crate::aggregate::{aggregate_rows, AggregateReport};
use crate::common::CityStats;
use crate::config::CarteConfig;
use crate::error::{CarteError, Result};
use crate::loader::{load_rows_or_report, DataSource};
use crate::model::{City, CityId, Row};
use crate::projector::project;
use crate::search::{SearchIndex, Suggestion};
use crate::text::lower_key;
use crate::traits::{MapWidget, NameMatch, SearchSurface};
use tracing::debug;

/// Everything the page can tell the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search field now holds this text.
    QueryChanged(String),
    /// The n-th entry of the current suggestion list was picked.
    SuggestionSelected(usize),
    MarkerClicked(CityId),
    MenuToggled,
}

/// The one object that owns the map: widget handle, cities, marker handles
/// and search index. Built once at startup; read-only once populated.
pub struct MapSession<W: MapWidget> {
    config: CarteConfig,
    widget: W,
    cities: Vec<City>,
    /// Indexed by `CityId`; `None` for unplottable cities.
    markers: Vec<Option<W::Marker>>,
    index: SearchIndex,
    suggestions: Vec<Suggestion>,
    report: AggregateReport,
    populated: bool,
    menu_open: bool,
}

impl<W: MapWidget> MapSession<W> {
    /// Sets the initial view and the tile layer on `widget`.
    pub fn new(config: CarteConfig, mut widget: W) -> Self {
        widget.set_view(config.initial_center, config.initial_zoom);
        widget.add_tile_layer(&config.tile_url, &config.tile_attribution);
        let index = SearchIndex::build(&[], std::iter::empty(), config.min_query_len, config.fold_accents);
        Self {
            config,
            widget,
            cities: Vec::new(),
            markers: Vec::new(),
            index,
            suggestions: Vec::new(),
            report: AggregateReport::default(),
            populated: false,
            menu_open: false,
        }
    }

    /// Loads rows from `source` and populates the map. Load failures are
    /// reported through `surface` and leave an empty map.
    pub fn load<S: SearchSurface + ?Sized>(
        &mut self,
        source: &DataSource,
        surface: &mut S,
    ) -> Result<AggregateReport> {
        let rows = load_rows_or_report(source, &self.config, surface);
        self.populate(&rows)
    }

    /// Aggregates `rows`, places the markers and builds the search index.
    ///
    /// A session is populated once; a second call is an error.
    pub fn populate(&mut self, rows: &[Row]) -> Result<AggregateReport> {
        if self.populated {
            return Err(CarteError::InvalidData(
                "map session is already populated".into(),
            ));
        }
        self.populated = true;

        let (cities, report) = aggregate_rows(rows, &self.config.columns);
        let projection = project(&mut self.widget, &cities, self.config.marker_icon.as_ref());

        self.index = SearchIndex::build(
            &cities,
            projection.placed_ids(),
            self.config.min_query_len,
            self.config.fold_accents,
        );
        self.markers = vec![None; cities.len()];
        for placed in projection.placed {
            self.markers[placed.city] = Some(placed.marker);
        }
        self.cities = cities;
        self.report = report;
        Ok(report)
    }

    /// Handles one UI event to completion.
    pub fn dispatch<S: SearchSurface + ?Sized>(
        &mut self,
        event: UiEvent,
        surface: &mut S,
    ) -> Result<()> {
        match event {
            UiEvent::QueryChanged(text) => {
                self.update_suggestions(&text, surface);
                Ok(())
            }
            UiEvent::SuggestionSelected(n) => self.select_suggestion(n, surface),
            UiEvent::MarkerClicked(city) => self.focus_city(city),
            UiEvent::MenuToggled => {
                self.menu_open = !self.menu_open;
                Ok(())
            }
        }
    }

    /// Replaces the suggestion list with the matches for `text`.
    pub fn update_suggestions<S: SearchSurface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        self.suggestions = self.index.query(text);
        debug!(query = text, hits = self.suggestions.len(), "suggestions updated");
        surface.show_suggestions(&self.suggestions);
    }

    /// Opens the picked city's popup, zooms onto it, echoes its name into
    /// the search field, clears the list and collapses the menu.
    pub fn select_suggestion<S: SearchSurface + ?Sized>(
        &mut self,
        n: usize,
        surface: &mut S,
    ) -> Result<()> {
        let city = self
            .suggestions
            .get(n)
            .map(|s| s.city)
            .ok_or(CarteError::UnknownSuggestion(n))?;
        self.focus_city(city)?;

        surface.set_query_text(&self.cities[city].name);
        self.suggestions.clear();
        surface.show_suggestions(&[]);
        if surface.collapse_menu() {
            self.menu_open = false;
        }
        Ok(())
    }

    /// Opens the city's popup and centers the view on its marker.
    pub fn focus_city(&mut self, city: CityId) -> Result<()> {
        let marker = self
            .markers
            .get(city)
            .and_then(Option::as_ref)
            .ok_or(CarteError::UnknownCity(city))?;

        self.widget.open_popup(marker);
        let at = self.widget.marker_position(marker);
        self.widget.set_view(at, self.config.selection_zoom);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &CarteConfig {
        &self.config
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    /// Looks a city up by name: exact lowercase key first, then
    /// accent-insensitive.
    pub fn find_city(&self, name: &str) -> Option<(CityId, &City)> {
        let key = lower_key(name.trim());
        self.cities
            .iter()
            .enumerate()
            .find(|(_, c)| c.key == key)
            .or_else(|| self.cities.iter().enumerate().find(|(_, c)| c.is_named(name.trim())))
    }

    pub fn marker(&self, city: CityId) -> Option<&W::Marker> {
        self.markers.get(city).and_then(Option::as_ref)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Aligns the menu flag with a page whose state changed outside the
    /// session (initial markup, a CSS breakpoint).
    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    pub fn report(&self) -> AggregateReport {
        self.report
    }

    pub fn stats(&self) -> CityStats {
        let markers = self.markers.iter().filter(|m| m.is_some()).count();
        CityStats {
            cities: self.cities.len(),
            residents: self.cities.iter().map(|c| c.residents.len()).sum(),
            markers,
            unplottable: self.cities.len() - markers,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn into_widget(self) -> W {
        self.widget
    }
}
