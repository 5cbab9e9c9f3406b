use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load_from` reads an optional config file and then applies
/// environment variables (prefix `ROON_TAGGER__`) on top, falling back to
/// struct defaults.
impl Settings {
    /// Load settings using an explicit config file path (if any).
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ROON_TAGGER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.pipeline.workers == 0 {
            return Err("pipeline.workers must be >= 1".to_string());
        }
        if self.remote.enabled && self.remote.base_url.trim().is_empty() {
            return Err(
                "remote.base_url must be set when remote.enabled = true".to_string(),
            );
        }
        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(
                "scan.extensions must name at least one extension".to_string(),
            );
        }
        if self.overrides.file_name.trim().is_empty() {
            return Err("overrides.file_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ROON_TAGGER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ROON_TAGGER_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/roon-tagger/config.toml`
/// or `~/.config/roon-tagger/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("roon-tagger").join("config.toml"))
}
