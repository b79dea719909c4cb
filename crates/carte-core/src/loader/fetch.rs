// crates/carte-core/src/loader/fetch.rs
#![cfg(feature = "fetch")]

use crate::error::{CarteError, Result};

/// Downloads the data file. Any non-success status counts as a failure.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| CarteError::Fetch(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CarteError::Fetch(format!("{url}: HTTP {status}")));
    }

    response
        .bytes()
        .map(|body| body.to_vec())
        .map_err(|e| CarteError::Fetch(format!("{url}: {e}")))
}
