// crates/carte-core/src/projector.rs
use crate::config::MarkerIcon;
use crate::model::{City, CityId};
use crate::text::escape_html;
use crate::traits::MapWidget;
use tracing::{info, warn};

/// Popup line shown when a city has nobody listed.
pub const NO_RESIDENTS: &str = "Aucun résident listé";

/// A city that got a marker.
#[derive(Debug, Clone)]
pub struct PlacedMarker<M> {
    pub city: CityId,
    pub marker: M,
}

/// Result of projecting cities onto a map widget.
#[derive(Debug, Clone)]
pub struct Projection<M> {
    pub placed: Vec<PlacedMarker<M>>,
    /// Cities skipped for lack of valid coordinates.
    pub unplottable: Vec<CityId>,
}

impl<M> Projection<M> {
    pub fn placed_ids(&self) -> impl Iterator<Item = CityId> + '_ {
        self.placed.iter().map(|p| p.city)
    }
}

/// Popup HTML for a city: bold name, then one resident per line.
pub fn popup_html(city: &City) -> String {
    let body = if city.residents.is_empty() {
        NO_RESIDENTS.to_string()
    } else {
        city.residents
            .iter()
            .map(|r| escape_html(&r.display))
            .collect::<Vec<_>>()
            .join(",<br>")
    };
    format!(
        "<b>{}</b><br>En stage ici : <br> {}",
        escape_html(&city.name),
        body
    )
}

/// Places one marker per plottable city, binds its popup and registers the
/// click. Cities without coordinates are skipped and listed in the result.
pub fn project<W: MapWidget + ?Sized>(
    widget: &mut W,
    cities: &[City],
    icon: Option<&MarkerIcon>,
) -> Projection<W::Marker> {
    let mut placed = Vec::with_capacity(cities.len());
    let mut unplottable = Vec::new();

    for (id, city) in cities.iter().enumerate() {
        let Some(at) = city.position else {
            warn!(city = %city.name, "no valid coordinates, marker skipped");
            unplottable.push(id);
            continue;
        };

        let marker = widget.add_marker(at, icon);
        widget.bind_popup(&marker, &popup_html(city));
        widget.on_marker_click(&marker, id);
        placed.push(PlacedMarker { city: id, marker });
    }

    info!(
        markers = placed.len(),
        skipped = unplottable.len(),
        "city markers added"
    );
    Projection {
        placed,
        unplottable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatLng, Resident};

    fn city(name: &str, position: Option<LatLng>, residents: Vec<Resident>) -> City {
        City {
            key: name.to_lowercase(),
            name: name.into(),
            position,
            residents,
        }
    }

    #[test]
    fn popup_lists_residents() {
        let c = city(
            "Paris",
            None,
            vec![
                Resident::new("Alice", "Martin", "Parity", ""),
                Resident::new("Bob", "Durand", "Acme", "31/08/2026"),
            ],
        );
        assert_eq!(
            popup_html(&c),
            "<b>Paris</b><br>En stage ici : <br> Alice Martin (Parity),<br>Bob Durand (Acme jusqu&#39;au 31/08/2026)"
        );
    }

    #[test]
    fn popup_placeholder_when_empty() {
        let c = city("Brest", None, Vec::new());
        assert!(popup_html(&c).ends_with(NO_RESIDENTS));
    }

    #[test]
    fn popup_escapes_markup() {
        let c = city(
            "<script>",
            None,
            vec![Resident::new("A", "B", "R&D <x>", "")],
        );
        let html = popup_html(&c);
        assert!(html.starts_with("<b>&lt;script&gt;</b>"));
        assert!(html.contains("R&amp;D &lt;x&gt;"));
    }
}
