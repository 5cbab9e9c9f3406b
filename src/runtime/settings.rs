use std::path::Path;

use crate::config::{self, Settings};

/// Load settings for a run.
///
/// Logging is not up yet, so problems go straight to stderr. A broken or
/// invalid config never stops the run; defaults take its place.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let loaded = match config_path {
        Some(path) => Settings::load_from(Some(path)),
        None => Settings::load_from(config::resolve_config_path().as_deref()),
    };

    match loaded {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("roon-tagger: invalid config, using defaults: {msg}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            eprintln!("roon-tagger: failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}
