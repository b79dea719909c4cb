// crates/carte-core/src/aggregate.rs
use crate::config::ColumnNames;
use crate::model::{City, LatLng, Resident, Row};
use crate::text::lower_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// Counts gathered while grouping rows into cities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub rows: usize,
    pub cities: usize,
    pub residents: usize,
    pub unplottable: usize,
}

/// **Rows -> Cities.**
///
/// Groups rows by the lowercase city name. The first row seen for a key
/// fixes the display name and coordinates; every row, first or not, adds
/// one resident. Cities come out in first-occurrence order.
///
/// Bad coordinates never abort the pass: the city is kept with
/// `position: None`.
pub fn aggregate_rows(rows: &[Row], columns: &ColumnNames) -> (Vec<City>, AggregateReport) {
    let mut cities: Vec<City> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let name = row.field(&columns.city);
        let key = lower_key(name);

        let idx = match by_key.get(&key) {
            Some(&idx) => idx,
            None => {
                let lat = row.field(&columns.latitude);
                let lng = row.field(&columns.longitude);
                let position = LatLng::parse(lat, lng);
                if position.is_none() {
                    warn!(city = name, lat, lng, "unparseable coordinates, city will not be plotted");
                }
                cities.push(City {
                    key: key.clone(),
                    name: name.to_string(),
                    position,
                    residents: Vec::new(),
                });
                by_key.insert(key, cities.len() - 1);
                cities.len() - 1
            }
        };

        cities[idx].residents.push(Resident::new(
            row.field(&columns.first_name),
            row.field(&columns.last_name),
            row.field(&columns.company),
            row.field(&columns.end_date),
        ));
    }

    let report = AggregateReport {
        rows: rows.len(),
        cities: cities.len(),
        residents: cities.iter().map(|c| c.residents.len()).sum(),
        unplottable: cities.iter().filter(|c| !c.is_plottable()).count(),
    };
    info!(
        cities = report.cities,
        residents = report.residents,
        unplottable = report.unplottable,
        "cities aggregated"
    );

    (cities, report)
}
