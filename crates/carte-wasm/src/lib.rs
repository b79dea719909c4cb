//! carte-wasm — WebAssembly bindings for carte-core
//!
//! Drives a Leaflet map from Rust: the page loads Leaflet (global `L`), this
//! module owns the [`MapSession`] and talks to the map and the DOM.
//!
//! What it provides
//! ----------------
//! - `init_map(container_id, config_json?)` creates the map, the tile layer
//!   and wires the `#search` input and the `#suggestions` list.
//! - `load_csv_text(text)` populates the map from the fetched CSV text.
//! - `report_load_failure(message)` shows the load notice and leaves an
//!   empty map.
//! - `on_search_input`, `select_suggestion`, `marker_clicked`,
//!   `toggle_menu`, `get_stats`, `get_suggestions` for manual wiring.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { init_map, load_csv_text, report_load_failure } from 'carte-wasm';
//!
//! async function main() {
//!   await init();
//!   init_map('map');
//!   try {
//!     const response = await fetch('data_carte_3A_2026.csv');
//!     if (!response.ok) throw new Error(`HTTP ${response.status}`);
//!     console.log(load_csv_text(await response.text()));
//!   } catch (e) {
//!     report_load_failure(String(e));
//!   }
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - The module keeps one session per page in a `thread_local`; wasm runs
//!   on a single thread.
//! - Marker clicks and suggestion clicks come back through closures that
//!   call the exported functions, so the session is never borrowed twice.
use std::cell::RefCell;
use std::result::Result;

use carte_core::loader::LOAD_FAILURE_NOTICE;
use carte_core::prelude::*;
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

const SEARCH_ID: &str = "search";
const SUGGESTIONS_ID: &str = "suggestions";
const MENU_ID: &str = "menu";
const MENU_OPEN_CLASS: &str = "open";
/// Below this viewport width the side menu overlays the map.
const NARROW_VIEWPORT_PX: f64 = 768.0;

/* --------------------------------------------------------------------------
   Leaflet bindings
-------------------------------------------------------------------------- */

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn leaflet_map(container_id: &str) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: u8);

    #[derive(Debug, Clone)]
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &Object) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &LeafletMap);

    #[derive(Debug, Clone)]
    pub type LeafletMarker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(at: &Array, options: &Object) -> LeafletMarker;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn leaflet_icon(options: &Object) -> JsValue;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &LeafletMarker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &LeafletMarker, html: &str);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletMarker);

    #[wasm_bindgen(method, js_name = getLatLng)]
    fn get_lat_lng(this: &LeafletMarker) -> JsValue;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMarker, event: &str, handler: &Function);
}

fn lat_lng_array(at: LatLng) -> Array {
    Array::of2(&JsValue::from_f64(at.lat), &JsValue::from_f64(at.lng))
}

fn set_prop(target: &Object, key: &str, value: &JsValue) {
    // Reflect::set only fails on frozen objects; ours are fresh.
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

fn icon_options(icon: &MarkerIcon) -> Object {
    let pair = |a: f64, b: f64| JsValue::from(Array::of2(&a.into(), &b.into()));
    let opts = Object::new();
    set_prop(&opts, "iconUrl", &JsValue::from_str(&icon.url));
    set_prop(&opts, "iconSize", &pair(icon.size[0].into(), icon.size[1].into()));
    set_prop(&opts, "iconAnchor", &pair(icon.anchor[0].into(), icon.anchor[1].into()));
    set_prop(
        &opts,
        "popupAnchor",
        &pair(icon.popup_anchor[0].into(), icon.popup_anchor[1].into()),
    );
    opts
}

/// [`MapWidget`] backed by a Leaflet map.
pub struct LeafletWidget {
    map: LeafletMap,
}

impl LeafletWidget {
    pub fn new(container_id: &str) -> Self {
        Self {
            map: leaflet_map(container_id),
        }
    }
}

impl MapWidget for LeafletWidget {
    type Marker = LeafletMarker;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map.set_view(&lat_lng_array(center), zoom);
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        let opts = Object::new();
        set_prop(&opts, "attribution", &JsValue::from_str(attribution));
        tile_layer(url_template, &opts).add_layer_to(&self.map);
    }

    fn add_marker(&mut self, at: LatLng, icon: Option<&MarkerIcon>) -> LeafletMarker {
        let opts = Object::new();
        if let Some(icon) = icon {
            set_prop(&opts, "icon", &leaflet_icon(&icon_options(icon)));
        }
        let marker = leaflet_marker(&lat_lng_array(at), &opts);
        marker.add_marker_to(&self.map);
        marker
    }

    fn bind_popup(&mut self, marker: &LeafletMarker, html: &str) {
        marker.bind_popup(html);
    }

    fn open_popup(&mut self, marker: &LeafletMarker) {
        marker.open_popup();
    }

    fn marker_position(&self, marker: &LeafletMarker) -> LatLng {
        let at = marker.get_lat_lng();
        let coord = |key: &str| {
            Reflect::get(&at, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default()
        };
        LatLng::new(coord("lat"), coord("lng"))
    }

    fn on_marker_click(&mut self, marker: &LeafletMarker, city: CityId) {
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = marker_clicked(city) {
                web_sys::console::error_1(&e);
            }
        });
        marker.on("click", handler.as_ref().unchecked_ref());
        // Markers live as long as the page.
        handler.forget();
    }
}

/* --------------------------------------------------------------------------
   DOM surface
-------------------------------------------------------------------------- */

/// [`SearchSurface`] over the page's `#search`, `#suggestions` and `#menu`.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn menu_is_open(&self) -> bool {
        self.element(MENU_ID)
            .is_some_and(|menu| menu.class_list().contains(MENU_OPEN_CLASS))
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl SearchSurface for DomSurface {
    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        let Some(list) = self.element(SUGGESTIONS_ID) else {
            return;
        };
        list.set_inner_html("");
        for (n, s) in suggestions.iter().enumerate() {
            let Ok(li) = self.document.create_element("li") else {
                continue;
            };
            li.set_text_content(Some(&s.label));
            let _ = li.set_attribute("data-index", &n.to_string());
            let _ = list.append_child(&li);
        }
    }

    fn set_query_text(&mut self, text: &str) {
        if let Some(input) = self
            .element(SEARCH_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(text);
        }
    }

    fn collapse_menu(&mut self) -> bool {
        let narrow = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .is_some_and(|w| w < NARROW_VIEWPORT_PX);
        if narrow {
            if let Some(menu) = self.element(MENU_ID) {
                let _ = menu.class_list().remove_1(MENU_OPEN_CLASS);
            }
        }
        !self.menu_is_open()
    }

    fn notify(&mut self, message: &str) {
        web_sys::console::error_1(&message.into());
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/* --------------------------------------------------------------------------
   Session
-------------------------------------------------------------------------- */

thread_local! {
    static SESSION: RefCell<Option<MapSession<LeafletWidget>>> = const { RefCell::new(None) };
}

fn with_session<R>(
    f: impl FnOnce(&mut MapSession<LeafletWidget>, &mut DomSurface) -> Result<R, JsValue>,
) -> Result<R, JsValue> {
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("map not initialized, call init_map first"))?;
        let mut surface =
            DomSurface::current().ok_or_else(|| JsValue::from_str("no document available"))?;
        f(session, &mut surface)
    })
}

fn js_err(e: CarteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing carte WASM module...".into());
}

/// Creates the map in `container_id` and wires the search box.
///
/// `config_json` may override any [`CarteConfig`] field.
#[wasm_bindgen]
pub fn init_map(container_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = config_or_default(config_json)?;
    let mut session = MapSession::new(config, LeafletWidget::new(container_id));
    let surface = DomSurface::current();
    if let Some(surface) = &surface {
        session.set_menu_open(surface.menu_is_open());
    }
    SESSION.with(|cell| *cell.borrow_mut() = Some(session));

    if let Some(surface) = surface {
        wire_dom(&surface.document)?;
    }
    Ok(())
}

fn wire_dom(document: &Document) -> Result<(), JsValue> {
    if let Some(input) = document.get_element_by_id(SEARCH_ID) {
        let on_input = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            if let Err(e) = on_search_input(&value) {
                web_sys::console::error_1(&e);
            }
        });
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    if let Some(list) = document.get_element_by_id(SUGGESTIONS_ID) {
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("li").ok().flatten())
                .and_then(|li| li.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(n) = index {
                if let Err(e) = select_suggestion(n) {
                    web_sys::console::error_1(&e);
                }
            }
        });
        list.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Populates the map from CSV text. Returns the aggregation report.
#[wasm_bindgen]
pub fn load_csv_text(text: &str) -> Result<JsValue, JsValue> {
    let report = with_session(|session, surface| {
        session
            .load(&DataSource::Text(text.to_string()), surface)
            .map_err(js_err)
    })?;
    web_sys::console::log_1(
        &format!(
            "✓ Loaded {} cities, {} residents",
            report.cities, report.residents
        )
        .into(),
    );
    Ok(to_value(&report)?)
}

/// The fetch failed: log it, tell the user, keep an empty map.
#[wasm_bindgen]
pub fn report_load_failure(message: &str) -> Result<(), JsValue> {
    web_sys::console::error_1(&format!("CSV load failed: {message}").into());
    with_session(|session, surface| {
        surface.notify(LOAD_FAILURE_NOTICE);
        session.populate(&[]).map(|_| ()).map_err(js_err)
    })
}

/* --------------------------------------------------------------------------
   Events
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn on_search_input(text: &str) -> Result<(), JsValue> {
    with_session(|session, surface| {
        session
            .dispatch(UiEvent::QueryChanged(text.to_string()), surface)
            .map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn select_suggestion(index: usize) -> Result<(), JsValue> {
    with_session(|session, surface| {
        session
            .dispatch(UiEvent::SuggestionSelected(index), surface)
            .map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn marker_clicked(city_id: usize) -> Result<(), JsValue> {
    with_session(|session, surface| {
        session
            .dispatch(UiEvent::MarkerClicked(city_id), surface)
            .map_err(js_err)
    })
}

/// Flips the side menu and returns whether it is now open.
///
/// The `open` class on `#menu` is authoritative: the session flag is
/// re-read from it before toggling.
#[wasm_bindgen]
pub fn toggle_menu() -> Result<bool, JsValue> {
    with_session(|session, surface| {
        session.set_menu_open(surface.menu_is_open());
        session
            .dispatch(UiEvent::MenuToggled, surface)
            .map_err(js_err)?;
        let open = session.menu_open();
        if let Some(menu) = surface.element(MENU_ID) {
            menu.class_list().toggle_with_force(MENU_OPEN_CLASS, open)?;
        }
        Ok(open)
    })
}

/* --------------------------------------------------------------------------
   Queries
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct SuggestionView<'a> {
    index: usize,
    city: CityId,
    label: &'a str,
}

#[wasm_bindgen]
pub fn get_suggestions() -> Result<JsValue, JsValue> {
    with_session(|session, _| {
        let items: Vec<_> = session
            .suggestions()
            .iter()
            .enumerate()
            .map(|(index, s)| SuggestionView {
                index,
                city: s.city,
                label: &s.label,
            })
            .collect();
        Ok(to_value(&items)?)
    })
}

#[wasm_bindgen]
pub fn get_stats() -> Result<JsValue, JsValue> {
    with_session(|session, _| Ok(to_value(&session.stats())?))
}

/* --------------------------------------------------------------------------
   Pure helpers (no map, no DOM)
-------------------------------------------------------------------------- */

fn config_or_default(config_json: Option<String>) -> Result<CarteConfig, JsValue> {
    match config_json {
        Some(json) => CarteConfig::from_json_str(&json).map_err(js_err),
        None => Ok(CarteConfig::default()),
    }
}

/// Number of rows the parser accepts from `text`, using the same optional
/// configuration JSON as [`init_map`].
#[wasm_bindgen]
pub fn count_rows(text: &str, config_json: Option<String>) -> Result<usize, JsValue> {
    let config = config_or_default(config_json)?;
    let delimiter = config.delimiter_byte().map_err(js_err)?;
    Ok(parse_rows(text, delimiter).len())
}

/// Labels of the suggestions `query` would produce for `text`, without a map.
#[wasm_bindgen]
pub fn suggestion_labels(
    text: &str,
    query: &str,
    config_json: Option<String>,
) -> Result<Vec<String>, JsValue> {
    let config = config_or_default(config_json)?;
    let rows = parse_rows(text, config.delimiter_byte().map_err(js_err)?);
    let (cities, _) = aggregate_rows(&rows, &config.columns);
    let plottable = cities
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_plottable())
        .map(|(id, _)| id);
    Ok(
        SearchIndex::build(&cities, plottable, config.min_query_len, config.fold_accents)
            .query(query)
            .into_iter()
            .map(|s| s.label)
            .collect(),
    )
}
