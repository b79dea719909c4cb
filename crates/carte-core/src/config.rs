// crates/carte-core/src/config.rs
use crate::error::{CarteError, Result};
use crate::model::LatLng;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_FILENAME: &str = "data_carte_3A_2026.csv";
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Column names expected in the header row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub end_date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            city: "Ville_Nettoyee".into(),
            latitude: "Latitude".into(),
            longitude: "Longitude".into(),
            first_name: "Prenom".into(),
            last_name: "Nom".into(),
            company: "Entreprise".into(),
            end_date: "Date_Fin".into(),
        }
    }
}

/// Custom marker geometry, in pixels. Mirrors what map widgets take for an
/// icon: image URL, size and anchor points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

/// Runtime configuration. Every field has a default, so a JSON file only
/// needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarteConfig {
    pub data_file: String,
    pub delimiter: char,
    pub columns: ColumnNames,
    pub initial_center: LatLng,
    pub initial_zoom: u8,
    pub selection_zoom: u8,
    /// Queries shorter than this (after trimming) produce no suggestions.
    pub min_query_len: usize,
    /// Match queries accent-insensitively. Grouping is never folded.
    pub fold_accents: bool,
    pub tile_url: String,
    pub tile_attribution: String,
    pub marker_icon: Option<MarkerIcon>,
}

impl Default for CarteConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILENAME.into(),
            delimiter: ',',
            columns: ColumnNames::default(),
            // Centre of metropolitan France
            initial_center: LatLng::new(46.603354, 1.888334),
            initial_zoom: 6,
            selection_zoom: 10,
            min_query_len: 3,
            fold_accents: false,
            tile_url: OSM_TILE_URL.into(),
            tile_attribution: OSM_ATTRIBUTION.into(),
            marker_icon: None,
        }
    }
}

impl CarteConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CarteError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// The CSV reader works on single bytes.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && *b != b'\n' && *b != b'\r')
            .ok_or_else(|| {
                CarteError::InvalidData(format!(
                    "delimiter {:?} must be a single ASCII character",
                    self.delimiter
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.min_query_len == 0 {
            return Err(CarteError::InvalidData(
                "min_query_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
