//! carte-cli
//! =========
//!
//! Command-line interface for the `carte-core` intern map.
//!
//! This crate primarily provides a binary (`carte`). The library target
//! holds the console implementations of the map widget and the search
//! surface so they can be tested and reused.
//!
//! Basic usage:
//!
//! ```text
//! carte --help
//! carte stats
//! carte search par
//! carte search globex --select 0
//! carte popup lyon
//! carte --input https://example.org/data.csv markers
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod console;
