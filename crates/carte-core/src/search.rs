// crates/carte-core/src/search.rs
use crate::model::{City, CityId};
use crate::text::search_key;
use serde::{Deserialize, Serialize};

/// What a suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    City,
    /// Index into the city's resident list.
    Resident(usize),
}

/// One selectable line in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub city: CityId,
    pub kind: SuggestionKind,
    pub label: String,
}

#[derive(Debug, Clone)]
enum EntryKind {
    City {
        name_key: String,
    },
    Resident {
        index: usize,
        name_key: String,
        company_key: String,
    },
}

#[derive(Debug, Clone)]
struct SearchEntry {
    city: CityId,
    kind: EntryKind,
    label: String,
}

impl SearchEntry {
    fn matches(&self, q: &str) -> bool {
        match &self.kind {
            EntryKind::City { name_key } => name_key.contains(q),
            EntryKind::Resident {
                name_key,
                company_key,
                ..
            } => name_key.contains(q) || company_key.contains(q),
        }
    }

    fn to_suggestion(&self) -> Suggestion {
        let kind = match self.kind {
            EntryKind::City { .. } => SuggestionKind::City,
            EntryKind::Resident { index, .. } => SuggestionKind::Resident(index),
        };
        Suggestion {
            city: self.city,
            kind,
            label: self.label.clone(),
        }
    }
}

/// Flat list of searchable entries: each indexed city followed by its
/// residents. Built once after load and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    min_query_len: usize,
    fold_accents: bool,
}

impl SearchIndex {
    /// Indexes the cities named by `ids`, in that order.
    pub fn build(
        cities: &[City],
        ids: impl IntoIterator<Item = CityId>,
        min_query_len: usize,
        fold_accents: bool,
    ) -> Self {
        let mut entries = Vec::new();

        for id in ids {
            let Some(city) = cities.get(id) else {
                continue;
            };
            entries.push(SearchEntry {
                city: id,
                kind: EntryKind::City {
                    name_key: search_key(&city.name, fold_accents),
                },
                label: city.name.clone(),
            });
            for (index, resident) in city.residents.iter().enumerate() {
                entries.push(SearchEntry {
                    city: id,
                    kind: EntryKind::Resident {
                        index,
                        name_key: search_key(&resident.full_name, fold_accents),
                        company_key: search_key(&resident.company, fold_accents),
                    },
                    label: format!("{} ({})", resident.display, city.name),
                });
            }
        }

        Self {
            entries,
            min_query_len,
            fold_accents,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Substring search over city names, resident names and companies.
    ///
    /// Returns nothing for queries shorter than the minimum length (counted
    /// in characters, after trimming). Results keep index order: a city
    /// comes before its residents, cities in load order. No ranking.
    pub fn query(&self, query: &str) -> Vec<Suggestion> {
        let q = search_key(query.trim(), self.fold_accents);
        if q.chars().count() < self.min_query_len {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|e| e.matches(&q))
            .map(SearchEntry::to_suggestion)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatLng, Resident};

    fn city(name: &str, residents: &[(&str, &str, &str)]) -> City {
        City {
            key: name.to_lowercase(),
            name: name.into(),
            position: Some(LatLng::new(45.0, 2.0)),
            residents: residents
                .iter()
                .map(|(f, l, c)| Resident::new(f, l, c, ""))
                .collect(),
        }
    }

    fn index(cities: &[City]) -> SearchIndex {
        SearchIndex::build(cities, 0..cities.len(), 3, false)
    }

    #[test]
    fn city_and_company_match() {
        let cities = vec![city("Paris", &[("Alice", "Martin", "Parity")])];
        let hits = index(&cities).query("par");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].kind, SuggestionKind::City);
        assert_eq!(hits[0].label, "Paris");
        assert_eq!(hits[1].kind, SuggestionKind::Resident(0));
        assert_eq!(hits[1].label, "Alice Martin (Parity) (Paris)");
    }

    #[test]
    fn short_query_returns_nothing() {
        let cities = vec![city("Paris", &[("Alice", "Martin", "Parity")])];
        let idx = index(&cities);
        assert!(idx.query("pa").is_empty());
        assert!(idx.query("  pa  ").is_empty());
        assert!(idx.query("").is_empty());
    }

    #[test]
    fn query_is_case_insensitive_and_trimmed() {
        let cities = vec![city("Paris", &[])];
        assert_eq!(index(&cities).query("  PARIS ").len(), 1);
    }

    #[test]
    fn resident_name_match_without_city_match() {
        let cities = vec![
            city("Lyon", &[("Jean", "Dupont", "Acme")]),
            city("Nantes", &[("Marie", "Dupond", "Globex"), ("Paul", "Roux", "Initech")]),
        ];
        let hits = index(&cities).query("dupon");
        let labels: Vec<_> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Jean Dupont (Acme) (Lyon)", "Marie Dupond (Globex) (Nantes)"]
        );
        assert_eq!(hits[1].city, 1);
    }

    #[test]
    fn only_listed_cities_are_indexed() {
        let cities = vec![city("Paris", &[]), city("Pariso", &[])];
        let idx = SearchIndex::build(&cities, [1], 3, false);
        let hits = idx.query("par");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, 1);
    }

    #[test]
    fn accent_folding_is_opt_in() {
        let cities = vec![city("Orléans", &[])];
        assert!(index(&cities).query("orleans").is_empty());
        assert_eq!(index(&cities).query("orléans").len(), 1);

        let folded = SearchIndex::build(&cities, [0], 3, true);
        assert_eq!(folded.query("orleans").len(), 1);
        assert_eq!(folded.query("ORLÉANS").len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        let cities = vec![city("Paris", &[("Alice", "Martin", "Parity")])];
        assert!(index(&cities).query("zzz").is_empty());
    }
}
