use std::path::Path;

use tracing::{debug, error};

use crate::library::{FileTask, MetadataRecord, album_dir_name};
use crate::overrides::{OverrideRecord, OverrideStore};
use crate::remote::{RemoteAlbumResult, RemoteClient};

use super::heuristic;

/// Which source seeded a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Seed {
    Remote,
    Filename,
}

/// Builds one authoritative [`MetadataRecord`] per file.
///
/// Precedence: remote album match, else filename heuristic; a directory
/// override is then applied on top in every case.
pub struct Resolver<'a> {
    remote: &'a RemoteClient,
    overrides: &'a OverrideStore,
}

impl<'a> Resolver<'a> {
    pub fn new(remote: &'a RemoteClient, overrides: &'a OverrideStore) -> Self {
        Self { remote, overrides }
    }

    /// Resolve a bare path, looking its override up in the store.
    pub fn resolve(&self, path: &Path) -> MetadataRecord {
        let override_record = album_dir_name(path).and_then(|key| self.overrides.resolve(&key));
        self.resolve_with(path, override_record).0
    }

    /// Resolve a task whose override was attached when it was built.
    pub fn resolve_task(&self, task: &FileTask) -> (MetadataRecord, Seed) {
        self.resolve_with(&task.path, task.override_record.as_ref())
    }

    fn resolve_with(
        &self,
        path: &Path,
        override_record: Option<&OverrideRecord>,
    ) -> (MetadataRecord, Seed) {
        let album_name = album_dir_name(path);

        let remote = album_name
            .as_deref()
            .and_then(|album| self.lookup(album, path));

        let (mut record, seed) = match remote {
            Some(found) => (seed_from_remote(found, album_name), Seed::Remote),
            None => (heuristic::derive(path), Seed::Filename),
        };

        if let Some(o) = override_record {
            apply_override(&mut record, o);
        }

        debug!(
            path = %path.display(),
            seed = ?seed,
            fields = ?record.present_fields(),
            "metadata resolved"
        );
        (record, seed)
    }

    /// Remote failures degrade to "no match"; they never fail resolution.
    fn lookup(&self, album: &str, path: &Path) -> Option<RemoteAlbumResult> {
        match self.remote.search_album(album) {
            Ok(found) => found,
            Err(e) => {
                error!(
                    album = %album,
                    path = %path.display(),
                    error = %e,
                    "album search failed; falling back to filename"
                );
                None
            }
        }
    }
}

fn seed_from_remote(found: RemoteAlbumResult, dir_album: Option<String>) -> MetadataRecord {
    MetadataRecord {
        artist: found.artist,
        album: found.album.or(dir_album),
        title: found.title,
        genre: found.genre,
        year: found.year,
        ..MetadataRecord::default()
    }
}

/// The override name replaces composer and album artist unconditionally.
fn apply_override(record: &mut MetadataRecord, o: &OverrideRecord) {
    record.composer = Some(o.name.clone());
    record.album_artist = Some(o.name.clone());
}
