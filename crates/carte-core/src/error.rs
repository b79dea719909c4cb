// crates/carte-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by carte-core.
///
/// Only the load boundary and explicit lookups produce these. Malformed rows
/// and unplottable coordinates are logged and skipped, never returned.
#[derive(Debug, Error)]
pub enum CarteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no suggestion at position {0}")]
    UnknownSuggestion(usize),

    #[error("no city with id {0}")]
    UnknownCity(usize),
}

pub type Result<T> = std::result::Result<T, CarteError>;
