//! carte-rs: umbrella crate re-exporting `carte-core` for the demos.

pub use carte_core::*;
