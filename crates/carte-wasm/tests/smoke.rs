use wasm_bindgen_test::*;

// Only the helpers that need neither Leaflet nor the DOM are exercised here.
use carte_wasm::{count_rows, suggestion_labels};

const DATA: &str = "Ville_Nettoyee,Latitude,Longitude,Prenom,Nom,Entreprise,Date_Fin\n\
                    Paris,48.85,2.35,Alice,Martin,Parity,\n\
                    Atlantis,n/a,n/a,Nemo,Capitaine,Nautilus,\n\
                    Lyon,45.76,4.83,Jean,Dupont,Acme,extra,fields\n";

#[wasm_bindgen_test]
fn counts_accepted_rows() {
    assert_eq!(count_rows(DATA, None).unwrap(), 2);
}

#[wasm_bindgen_test]
fn suggests_city_then_resident() {
    let labels = suggestion_labels(DATA, "par", None).unwrap();
    assert_eq!(labels, ["Paris", "Alice Martin (Parity) (Paris)"]);
}

#[wasm_bindgen_test]
fn unplottable_city_is_not_suggested() {
    assert!(suggestion_labels(DATA, "atlantis", None).unwrap().is_empty());
    assert!(suggestion_labels(DATA, "pa", None).unwrap().is_empty());
}

#[wasm_bindgen_test]
fn helpers_follow_config() {
    let data = DATA.replace(',', ";");
    let config = Some(r#"{"delimiter": ";", "min_query_len": 2}"#.to_string());
    assert_eq!(count_rows(&data, config.clone()).unwrap(), 2);
    assert_eq!(
        suggestion_labels(&data, "pa", config).unwrap(),
        ["Paris", "Alice Martin (Parity) (Paris)"]
    );
}
