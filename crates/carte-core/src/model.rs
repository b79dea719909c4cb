// crates/carte-core/src/model.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of a city in the aggregated sequence (first-occurrence order).
pub type CityId = usize;

/// One accepted data line: column name -> trimmed value.
///
/// Backed by an ordered map so that two parses of the same text compare
/// equal field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later values win when a header is repeated.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, or `""` when the column is absent.
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A point on the map, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses a pair of coordinates.
    ///
    /// Returns `None` unless both values are finite numbers inside their
    /// range. `None` is the "unplottable" marker used throughout the crate.
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = parse_coord(lat, 90.0)?;
        let lng = parse_coord(lng, 180.0)?;
        Some(Self { lat, lng })
    }
}

fn parse_coord(s: &str, bound: f64) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= bound)
}

/// An intern stationed in a city.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub full_name: String,
    pub company: String,
    /// Empty when the row carries no end date.
    pub end_date: String,
    /// Precomputed popup/suggestion text.
    pub display: String,
}

impl Resident {
    pub fn new(first_name: &str, last_name: &str, company: &str, end_date: &str) -> Self {
        let full_name = format!("{} {}", first_name.trim(), last_name.trim())
            .trim()
            .to_string();
        let company = company.trim().to_string();
        let end_date = end_date.trim().to_string();
        let display = if end_date.is_empty() {
            format!("{full_name} ({company})")
        } else {
            format!("{full_name} ({company} jusqu'au {end_date})")
        };
        Self {
            full_name,
            company,
            end_date,
            display,
        }
    }

    pub fn has_end_date(&self) -> bool {
        !self.end_date.is_empty()
    }
}

/// A city with every resident found for it in the data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Lowercase grouping key.
    pub key: String,
    /// Display name, as spelled on its first row.
    pub name: String,
    /// `None` when the coordinates could not be parsed.
    pub position: Option<LatLng>,
    pub residents: Vec<Resident>,
}

impl City {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_plottable(&self) -> bool {
        self.position.is_some()
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }
}
