use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level`. Output goes to `logging.file` when
/// set (parent directories are created), otherwise to stderr.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match &settings.file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
        None => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}

/// Report panics as log events instead of the default stderr message.
///
/// The pipeline catches per-file panics and reports them as failures; this
/// keeps the panic message itself in the same log stream.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        error!(
            thread = thread.name().unwrap_or("<unnamed>"),
            "panic: {info}"
        );
    }));
}
