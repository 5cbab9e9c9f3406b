use std::path::PathBuf;

use tracing::{error, info};

use crate::error::PipelineError;

/// One file that did not make it through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: &'static str,
    pub message: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files resolved and written successfully.
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<FileFailure>,
}

impl RunReport {
    pub fn record_success(&mut self) {
        self.processed += 1;
    }

    pub fn record_failure(&mut self, path: PathBuf, err: &PipelineError) {
        self.failed += 1;
        self.errors.push(FileFailure {
            path,
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.processed + self.failed
    }

    pub fn log_summary(&self) {
        for failure in &self.errors {
            error!(
                path = %failure.path.display(),
                kind = failure.kind,
                "failed: {}",
                failure.message
            );
        }
        info!(
            total = self.total(),
            processed = self.processed,
            failed = self.failed,
            "run complete"
        );
    }
}
