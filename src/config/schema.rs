use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/roon-tagger/config.toml` or
/// `~/.config/roon-tagger/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ROON_TAGGER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanSettings,
    pub overrides: OverrideSettings,
    pub remote: RemoteSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Directories to scan for audio files.
    pub directories: Vec<PathBuf>,
    /// Optional file listing one directory per line (`#` starts a comment).
    pub directories_file: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            directories_file: None,
            extensions: vec!["mp3".into(), "flac".into(), "m4a".into(), "wav".into()],
            follow_links: true,
            include_hidden: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverrideSettings {
    /// Name of the per-album sidecar file carrying a corrected display name.
    pub file_name: String,
}

impl Default for OverrideSettings {
    fn default() -> Self {
        Self {
            file_name: "name_to_use.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// When false, album lookups short-circuit to "no match" without any request.
    pub enabled: bool,
    pub base_url: String,
    pub api_key: String,
    /// Extra attempts after the first failed one.
    pub max_retries: u32,
    /// Fixed delay between attempts (milliseconds).
    pub retry_delay_ms: u64,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://www.theaudiodb.com/api/v1/json".to_string(),
            api_key: "2".to_string(),
            max_retries: 3,
            retry_delay_ms: 2000,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of worker threads processing files.
    pub workers: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info", "debug").
    pub level: String,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
