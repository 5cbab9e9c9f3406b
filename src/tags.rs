//! Tag writing for the supported containers.
//!
//! Public API:
//! - [`write`] persists a resolved record into a file, leaving absent fields untouched.
//! - [`FormatHandler`] describes where each container keeps composer and album artist.

mod format;
mod write;

pub use format::FormatHandler;
pub use write::{apply_record, write};

#[cfg(test)]
mod tests;
