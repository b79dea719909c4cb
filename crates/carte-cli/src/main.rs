//! carte — Command-line interface for carte-core
//!
//! Loads the intern roster, groups it by city and lets you inspect the
//! result the way the map page would show it.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ carte stats
//!
//! - List cities, or only those without usable coordinates
//!   $ carte cities
//!   $ carte cities --unplottable
//!
//! - Search like the page's search box (3 characters minimum)
//!   $ carte search par
//!   $ carte search globex --select 0
//!
//! - Show a city's popup
//!   $ carte popup lyon
//!
//! Data source
//! -----------
//!
//! By default the CLI reads `data_carte_3A_2026.csv` bundled with
//! `carte-core`. Use `--input <path|url>` for another file (`.csv.gz` is
//! decompressed on the fly) and `--config <file.json>` to override column
//! names, delimiter or zoom levels.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use carte_cli::console::{ConsoleMap, ConsoleSurface};
use carte_core::prelude::*;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => CarteConfig::from_json_path(path)
            .with_context(|| format!("reading configuration {path}"))?,
        None => CarteConfig::default(),
    };
    if let Some(d) = args.delimiter {
        config.delimiter = d;
        config.delimiter_byte()?;
    }

    let source = match &args.input {
        Some(arg) => DataSource::from_arg(arg),
        None => DataSource::default_for(&config),
    };

    debug!(source = %source.describe(), "loading data");
    let mut surface = ConsoleSurface::default();
    let mut session = MapSession::new(config, ConsoleMap::default());
    session.load(&source, &mut surface)?;
    session.widget_mut().take_actions();

    match args.command {
        Commands::Stats => {
            let stats = session.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Map statistics:");
                println!("  Cities: {}", stats.cities);
                println!("  Residents: {}", stats.residents);
                println!("  Markers: {}", stats.markers);
                println!("  Unplottable: {}", stats.unplottable);
            }
        }

        Commands::Cities { unplottable } => {
            let cities: Vec<&City> = session
                .cities()
                .iter()
                .filter(|c| !unplottable || !c.is_plottable())
                .collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&cities)?);
            } else {
                for c in cities {
                    match c.position {
                        Some(at) => println!(
                            "{} ({:.4}, {:.4}) - {} resident(s)",
                            c.name,
                            at.lat,
                            at.lng,
                            c.residents.len()
                        ),
                        None => println!(
                            "{} (unplottable) - {} resident(s)",
                            c.name,
                            c.residents.len()
                        ),
                    }
                }
            }
        }

        Commands::Search { query, select } => {
            session.dispatch(UiEvent::QueryChanged(query.clone()), &mut surface)?;
            let suggestions = surface.suggestions.clone();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                let min = session.config().min_query_len;
                if query.trim().chars().count() < min {
                    println!("Query too short (minimum {min} characters)");
                } else {
                    println!("No matches for: {query}");
                }
            } else {
                for (n, s) in suggestions.iter().enumerate() {
                    println!("[{n}] {}", s.label);
                }
            }

            if let Some(n) = select {
                session
                    .dispatch(UiEvent::SuggestionSelected(n), &mut surface)
                    .with_context(|| format!("selecting suggestion {n}"))?;
                for action in session.widget_mut().take_actions() {
                    println!("{action}");
                }
                println!("search field -> {}", surface.query_text);
            }
        }

        Commands::Popup { city } => match session.find_city(&city) {
            Some((id, c)) => match session.marker(id) {
                Some(&m) => println!("{}", session.widget().markers()[m].popup),
                None => {
                    println!("{}", carte_core::projector::popup_html(c));
                    eprintln!("note: {} has no marker (invalid coordinates)", c.name);
                }
            },
            None => eprintln!("No city found for: {city}"),
        },

        Commands::Markers => {
            let markers = session.widget().markers();
            if args.json {
                let items: Vec<_> = markers
                    .iter()
                    .filter_map(|m| {
                        let city = session.city(m.city?)?;
                        Some(serde_json::json!({
                            "city": city.name,
                            "lat": m.position.lat,
                            "lng": m.position.lng,
                            "residents": city.residents.len(),
                        }))
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for (n, m) in markers.iter().enumerate() {
                    let name = m
                        .city
                        .and_then(|id| session.city(id))
                        .map(|c| c.name.as_str())
                        .unwrap_or("?");
                    println!(
                        "#{n} {name} @ ({:.4}, {:.4})",
                        m.position.lat, m.position.lng
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
