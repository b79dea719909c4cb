use clap::{Parser, Subcommand};

/// CLI arguments for carte-cli
#[derive(Debug, Parser)]
#[command(
    name = "carte",
    version,
    about = "CLI for loading, inspecting and searching the intern city map"
)]
pub struct CliArgs {
    /// Data file path or http(s) URL (default: the bundled data_carte_3A_2026.csv)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// JSON configuration file (columns, delimiter, zoom levels, ...)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Field delimiter, overrides the configuration
    #[arg(short = 'd', long = "delimiter", global = true)]
    pub delimiter: Option<char>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// More logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded map
    Stats,

    /// List all cities with their resident count
    Cities {
        /// Only list cities that could not be placed on the map
        #[arg(long)]
        unplottable: bool,
    },

    /// Run a search as the page's search box would
    Search {
        /// Free-text query (city, name or company)
        query: String,

        /// Also select the n-th suggestion and show the map actions it triggers
        #[arg(long)]
        select: Option<usize>,
    },

    /// Print the popup content of a city
    Popup {
        /// City name (case-insensitive)
        city: String,
    },

    /// List placed markers
    Markers,
}
