use std::path::PathBuf;

use anyhow::{Context, bail};
use tracing::{info, warn};

use crate::library::{collect_roots, scan_all};
use crate::overrides::OverrideStore;
use crate::remote::RemoteClient;

mod logging;
mod pipeline;
mod report;
mod settings;

pub use pipeline::Pipeline;
pub use report::{FileFailure, RunReport};
pub use settings::load_settings;

/// Command-line knobs layered over the loaded settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replaces the configured scan directories when non-empty.
    pub roots: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub workers: Option<usize>,
    /// Skip album lookups entirely.
    pub offline: bool,
}

/// Load settings, start logging, then scan, resolve and tag every file.
///
/// Per-file problems land in the returned report. An `Err` means the run
/// never got going.
pub fn run(options: &RunOptions) -> anyhow::Result<RunReport> {
    let mut settings = load_settings(options.config.as_deref());
    if let Some(workers) = options.workers {
        settings.pipeline.workers = workers;
    }
    if options.offline {
        settings.remote.enabled = false;
    }

    logging::init(&settings.logging).context("initializing logging")?;
    logging::install_panic_hook();

    let roots = collect_roots(&settings.scan, &options.roots);
    if roots.is_empty() {
        bail!("no directories to scan; pass them as arguments or set scan.directories");
    }
    info!(roots = roots.len(), "scanning");

    let overrides = OverrideStore::load_all(&roots, &settings.overrides.file_name);

    let remote = RemoteClient::from_settings(&settings.remote).context("building HTTP client")?;
    if !remote.is_enabled() {
        warn!("album lookups disabled; metadata comes from file names and overrides only");
    }

    let files = scan_all(&roots, &settings.scan);
    if files.is_empty() {
        warn!("no audio files found");
    }

    let report = Pipeline::new(&remote, &overrides, settings.pipeline.workers)
        .run(&files)
        .context("starting worker pool")?;
    report.log_summary();
    Ok(report)
}
