//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that drives scanning, remote
//! lookups and the worker pool, plus helpers to load it from disk.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;
