//! Directory-scoped name overrides.
//!
//! An album directory may carry a small JSON sidecar (`name_to_use.json` by
//! default) holding the display name to use as both composer and album
//! artist for every file in that directory:
//!
//! ```json
//! { "name": "Imogen Heap" }
//! ```
//!
//! The store is built once before any worker starts and is read-only after.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::OverrideError;

/// One corrected display name, keyed by album directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRecord {
    pub scope_key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct Sidecar {
    name: String,
}

/// Parse one sidecar file and return its `name`.
pub fn parse_sidecar(path: &Path) -> Result<String, OverrideError> {
    let raw = fs::read_to_string(path).map_err(|source| OverrideError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sidecar: Sidecar = serde_json::from_str(&raw).map_err(|source| OverrideError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let name = sidecar.name.trim();
    if name.is_empty() {
        return Err(OverrideError::EmptyName {
            path: path.to_path_buf(),
        });
    }
    Ok(name.to_string())
}

#[derive(Debug, Default)]
pub struct OverrideStore {
    records: HashMap<String, OverrideRecord>,
}

impl OverrideStore {
    /// Collect every sidecar named `file_name` under `root`.
    ///
    /// Malformed sidecars are logged and skipped. When two directories share a
    /// name, the first one in sorted traversal order wins.
    pub fn load(root: &Path, file_name: &str) -> Self {
        let mut store = Self::default();
        store.load_root(root, file_name);
        store
    }

    /// Same as [`OverrideStore::load`] over several roots, earlier roots first.
    pub fn load_all(roots: &[PathBuf], file_name: &str) -> Self {
        let mut store = Self::default();
        for root in roots {
            store.load_root(root, file_name);
        }
        info!(overrides = store.records.len(), "loaded name overrides");
        store
    }

    fn load_root(&mut self, root: &Path, file_name: &str) {
        let sidecars = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && e.file_name() == file_name);

        for entry in sidecars {
            let path = entry.path();
            let Some(scope_key) = path
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };

            let name = match parse_sidecar(path) {
                Ok(name) => name,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping malformed override sidecar"
                    );
                    continue;
                }
            };

            self.insert(OverrideRecord { scope_key, name }, path);
        }
    }

    fn insert(&mut self, record: OverrideRecord, source: &Path) {
        match self.records.entry(record.scope_key.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().name != record.name {
                    warn!(
                        scope = %record.scope_key,
                        kept = %existing.get().name,
                        ignored = %record.name,
                        path = %source.display(),
                        "conflicting override for directory name; keeping the first"
                    );
                }
            }
            Entry::Vacant(slot) => {
                debug!(scope = %record.scope_key, name = %record.name, "override loaded");
                slot.insert(record);
            }
        }
    }

    /// Exact, case-sensitive lookup by album directory name.
    pub fn resolve(&self, scope_key: &str) -> Option<&OverrideRecord> {
        self.records.get(scope_key)
    }
}
