use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::library::{MetadataRecord, album_dir_name};

/// "03 - ", "7-", "12 -" at the very start of a file stem.
static TRACK_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\s*-\s*").expect("valid track prefix regex"));

/// Remove one leading track-number prefix. Leaves the input alone when
/// nothing would remain.
pub fn strip_track_prefix(stem: &str) -> &str {
    match TRACK_PREFIX.find(stem) {
        Some(m) if m.end() < stem.len() => &stem[m.end()..],
        _ => stem,
    }
}

/// Lowest-confidence metadata, derived from the path alone.
///
/// `album` is the parent directory name and `title` the file stem without a
/// track-number prefix. Everything else stays absent.
pub fn derive(path: &Path) -> MetadataRecord {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .map(|stem| strip_track_prefix(&stem).trim().to_string())
        .filter(|t| !t.is_empty());

    MetadataRecord {
        album: album_dir_name(path),
        title,
        ..MetadataRecord::default()
    }
}
