//! Error types for the tagging pipeline.
//!
//! Every error here is recoverable at the per-file level; the orchestrator
//! turns them into report entries instead of aborting the run.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed or unreadable override sidecar.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has an empty \"name\" field", .path.display())]
    EmptyName { path: PathBuf },
}

/// Album lookup failure (after retries, or terminal).
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {status} from album search")]
    Status { status: u16 },

    #[error("failed to decode album search response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Transport(_) => true,
            RemoteError::Status { status } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
            RemoteError::Decode(_) => false,
        }
    }
}

/// Failure to persist tags into a container.
#[derive(Debug, Error)]
pub enum TagWriteError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{} cannot hold a {tag} tag", .path.display())]
    TagUnavailable { path: PathBuf, tag: &'static str },

    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}

/// Anything that can fail one file's trip through the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported container format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Write(#[from] TagWriteError),

    #[error("processing {} panicked", .path.display())]
    Panicked { path: PathBuf },
}

impl PipelineError {
    /// Short, stable label used in the run report.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Io { .. } => "io",
            PipelineError::UnsupportedFormat(_) => "unsupported-format",
            PipelineError::Write(_) => "write",
            PipelineError::Panicked { .. } => "panic",
        }
    }
}
