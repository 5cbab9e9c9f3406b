//! Audio file discovery and the per-file data model.

mod model;
mod scan;

pub use model::{ContainerFormat, FileTask, MetadataRecord, album_dir_name};
pub use scan::{collect_roots, scan_all};
