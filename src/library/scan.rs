use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ScanSettings;

fn normalized_extensions(settings: &ScanSettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_audio_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read a directory list file: one path per line, blank lines and `#` comments skipped.
pub fn read_directories_file(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Decide which directories to scan.
///
/// Roots given on the command line replace the configured ones entirely.
/// Entries that are not directories are dropped with a warning.
pub fn collect_roots(settings: &ScanSettings, cli_roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if !cli_roots.is_empty() {
        candidates.extend(cli_roots.iter().cloned());
    } else {
        candidates.extend(settings.directories.iter().cloned());
        if let Some(list) = &settings.directories_file {
            match read_directories_file(list) {
                Ok(dirs) => candidates.extend(dirs),
                Err(e) => warn!(path = %list.display(), error = %e, "cannot read directories file"),
            }
        }
    }

    let mut seen = BTreeSet::new();
    candidates
        .into_iter()
        .filter(|dir| {
            if !dir.is_dir() {
                warn!(path = %dir.display(), "skipping scan root: not a directory");
                return false;
            }
            seen.insert(dir.clone())
        })
        .collect()
}

/// Walk `dir` and return every audio file it contains, sorted by path.
pub fn scan(dir: &Path, settings: &ScanSettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_audio_extension(p, &exts))
        .collect();

    files.sort();
    files
}

/// Scan every root, dropping paths already seen under an earlier root.
pub fn scan_all(roots: &[PathBuf], settings: &ScanSettings) -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();
    for root in roots {
        for path in scan(root, settings) {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    files
}
