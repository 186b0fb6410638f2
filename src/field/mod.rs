//! Field module - Structured field paths and the errors attributed to them.
//!
//! Validation failures name the field they were found at, e.g.
//! `metadata.labels[app]`, so callers can point users at the offending input.

mod errors;
mod path;

pub use errors::*;
pub use path::*;
