//! Error kinds for a run and for individual jobs.
//!
//! Two layers, matched by variant rather than by message:
//!
//! - [`OptimizeError`] aborts the whole run before any job starts: the codec
//!   backend is unusable, a directory cannot be read or created, or the
//!   configuration is invalid. The binary exits non-zero.
//! - [`JobError`] is caught at the per-job boundary and recorded as a failed
//!   [`JobResult`](crate::summary::JobResult). Remaining jobs still run.

use crate::config::ConfigError;
use crate::imaging::BackendError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("{codec} codec backend unavailable: {reason}")]
    DependencyUnavailable { codec: &'static str, reason: String },
    #[error("Directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Cannot read {}: {source}", path.display())]
    Probe { path: PathBuf, source: BackendError },
    #[error("Cannot re-encode {}: {source}", path.display())]
    Encode { path: PathBuf, source: BackendError },
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl JobError {
    /// Stable tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Probe { .. } => "probe",
            JobError::Encode { .. } => "encode",
            JobError::Write { .. } => "write",
        }
    }

    /// The file the failing stage was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            JobError::Probe { path, .. }
            | JobError::Encode { path, .. }
            | JobError::Write { path, .. } => path,
        }
    }
}
