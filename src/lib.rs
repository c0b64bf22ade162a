//! Spreadsheet ingestion, search and export pipeline behind the Rusty Sheet viewer.
//!
//! The GUI in `main.rs` is one caller; everything in [`data`] is plain
//! synchronous functions over an immutable [`data::Table`].

pub mod data;
