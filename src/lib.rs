//! Resolve album metadata for a music library and write it into the files.
//!
//! Metadata comes from an album search service or, failing that, from the
//! file's own path. A per-album `name_to_use.json` sidecar supplies the
//! composer and album artist and always has the last word.

pub mod config;
pub mod error;
pub mod library;
pub mod overrides;
pub mod remote;
pub mod resolve;
pub mod runtime;
pub mod tags;
