//! Error handling example for carte-rs
//!
//! This example demonstrates how load failures, malformed lines and bad
//! coordinates are absorbed instead of aborting.

use carte_rs::prelude::*;

#[derive(Default)]
struct Notices(Vec<String>);

impl SearchSurface for Notices {
    fn show_suggestions(&mut self, _suggestions: &[Suggestion]) {}
    fn set_query_text(&mut self, _text: &str) {}
    fn collapse_menu(&mut self) -> bool {
        true
    }
    fn notify(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}

fn main() -> Result<()> {
    println!("=== carte-rs Error Handling Example ===\n");
    let config = CarteConfig::default();

    // Example 1: A missing file
    println!("--- Example 1: Loading a file that does not exist ---");
    let missing = DataSource::File("does/not/exist.csv".into());
    match load_rows(&missing, &config) {
        Ok(rows) => println!("✓ {} rows", rows.len()),
        Err(e) => println!("✗ {e}"),
    }
    let mut notices = Notices::default();
    let rows = load_rows_or_report(&missing, &config, &mut notices);
    println!("  at the load boundary: {} rows, notices {:?}", rows.len(), notices.0);
    println!();

    // Example 2: Malformed and short lines
    println!("--- Example 2: Malformed lines ---");
    let text = "Ville_Nettoyee,Latitude,Longitude,Prenom,Nom,Entreprise,Date_Fin\n\
                Lyon,45.76,4.83,Jean,Dupont,Acme,,one,too,many\n\
                Lille,50.63,3.06,Lucas,Simon,Nord Logistique\n";
    let rows = parse_rows(text, config.delimiter_byte()?);
    println!("  {} row(s) kept", rows.len());
    for row in &rows {
        println!("  - {} / end date {:?}", row.field("Ville_Nettoyee"), row.field("Date_Fin"));
    }
    println!();

    // Example 3: Coordinates that do not parse
    println!("--- Example 3: Unplottable city ---");
    let text = "Ville_Nettoyee,Latitude,Longitude,Prenom,Nom,Entreprise,Date_Fin\n\
                Atlantis,??,??,Nemo,Capitaine,Nautilus,\n";
    let (cities, report) = aggregate_rows(&parse_rows(text, b','), &config.columns);
    for city in &cities {
        match city.position {
            Some(at) => println!("  {} at ({}, {})", city.name, at.lat, at.lng),
            None => println!("  {} kept but not plotted", city.name),
        }
    }
    println!("  unplottable: {}", report.unplottable);

    Ok(())
}
