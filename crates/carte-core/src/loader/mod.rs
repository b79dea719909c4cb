// crates/carte-core/src/loader/mod.rs

//! # Data Loader
//!
//! The load boundary. Handles the physical layer (file, gzip, HTTP) and
//! hands the text to the CSV parser. [`load_rows_or_report`] is where every
//! load failure ends: it is logged, shown to the user, and turned into an
//! empty row set.

use crate::config::{CarteConfig, DEFAULT_DATA_FILENAME};
use crate::error::Result;
use crate::model::Row;
use crate::traits::SearchSurface;
use std::path::PathBuf;
use tracing::{error, info};

pub mod common_io;
#[cfg(feature = "fetch")]
mod fetch;
mod parse;

pub use parse::{parse_bytes, parse_rows};

/// Notice shown to the user when the data file cannot be loaded.
pub const LOAD_FAILURE_NOTICE: &str = "Impossible de charger le fichier CSV.";

/// Where the data file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
    /// Text already in memory (e.g. fetched by the browser).
    Text(String),
}

impl DataSource {
    /// `http://` and `https://` arguments become URLs, anything else a path.
    pub fn from_arg(arg: &str) -> Self {
        let lower = arg.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(arg.trim().to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// The configured data file inside [`default_data_dir`].
    pub fn default_for(config: &CarteConfig) -> Self {
        Self::File(default_data_dir().join(&config.data_file))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
            Self::Text(t) => format!("<{} bytes of text>", t.len()),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::File(default_data_dir().join(DEFAULT_DATA_FILENAME))
    }
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Reads the raw bytes of a source.
pub fn read_source(source: &DataSource) -> Result<Vec<u8>> {
    match source {
        DataSource::File(path) => common_io::read_bytes(path),
        DataSource::Text(text) => Ok(text.as_bytes().to_vec()),
        #[cfg(feature = "fetch")]
        DataSource::Url(url) => fetch::fetch_bytes(url),
        #[cfg(not(feature = "fetch"))]
        DataSource::Url(url) => Err(crate::error::CarteError::Fetch(format!(
            "{url}: built without the 'fetch' feature"
        ))),
    }
}

/// Reads and parses a source. Errors only when the bytes cannot be obtained;
/// undecodable lines are dropped by the parser.
pub fn load_rows(source: &DataSource, config: &CarteConfig) -> Result<Vec<Row>> {
    let delimiter = config.delimiter_byte()?;
    let bytes = read_source(source)?;
    info!(source = %source.describe(), bytes = bytes.len(), "CSV loaded");
    Ok(parse_bytes(&bytes, delimiter))
}

/// Like [`load_rows`], but never fails: errors are logged, reported through
/// `surface.notify` and replaced by an empty row set.
pub fn load_rows_or_report<S: SearchSurface + ?Sized>(
    source: &DataSource,
    config: &CarteConfig,
    surface: &mut S,
) -> Vec<Row> {
    match load_rows(source, config) {
        Ok(rows) => rows,
        Err(e) => {
            error!(source = %source.describe(), "load failed: {e}");
            surface.notify(LOAD_FAILURE_NOTICE);
            Vec::new()
        }
    }
}
