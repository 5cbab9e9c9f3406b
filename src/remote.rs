//! Album metadata lookups against the remote search service.

mod client;
mod types;

pub use client::{AlbumSource, RemoteClient};
pub use types::{AlbumSearchResponse, RemoteAlbumResult};
