use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::library::FileTask;
use crate::overrides::OverrideStore;
use crate::remote::RemoteClient;
use crate::resolve::{Resolver, Seed};
use crate::tags;

use super::report::RunReport;

/// Resolve and tag a list of files on a fixed-size worker pool.
///
/// Each file runs start to finish on one worker. The override store and
/// remote client are shared read-only.
pub struct Pipeline<'a> {
    resolver: Resolver<'a>,
    overrides: &'a OverrideStore,
    workers: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(remote: &'a RemoteClient, overrides: &'a OverrideStore, workers: usize) -> Self {
        Self {
            resolver: Resolver::new(remote, overrides),
            overrides,
            workers: workers.max(1),
        }
    }

    pub fn run(&self, files: &[PathBuf]) -> Result<RunReport, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("tagger-{i}"))
            .build()?;

        info!(
            files = files.len(),
            workers = self.workers,
            "processing files"
        );

        let outcomes: Vec<(&PathBuf, Result<Seed, PipelineError>)> = pool.install(|| {
            files
                .par_iter()
                .map(|path| (path, self.process_guarded(path)))
                .collect()
        });

        let mut report = RunReport::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(_) => report.record_success(),
                Err(e) => report.record_failure(path.clone(), &e),
            }
        }
        Ok(report)
    }

    /// Per-file boundary: nothing that happens to one file escapes it.
    ///
    /// Panic messages go through the hook installed by `logging::install_panic_hook`.
    fn process_guarded(&self, path: &Path) -> Result<Seed, PipelineError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.process_file(path)))
            .unwrap_or_else(|_| {
                Err(PipelineError::Panicked {
                    path: path.to_path_buf(),
                })
            });

        match &outcome {
            Ok(seed) => info!(path = %path.display(), seed = ?seed, "tagged"),
            Err(e) => error!(path = %path.display(), kind = e.kind(), error = %e, "file failed"),
        }
        outcome
    }

    fn process_file(&self, path: &Path) -> Result<Seed, PipelineError> {
        let task = FileTask::build(path, self.overrides)?;
        let (record, seed) = self.resolver.resolve_task(&task);
        tags::write(&task, &record)?;
        Ok(seed)
    }
}
