//! Input discovery.
//!
//! Lists the direct children of the input directory (no recursion), makes
//! sure the output directory exists, and turns every entry whose name ends
//! with a configured extension into an [`ImageJob`].
//!
//! ```text
//! images/                  # input_dir
//! ├── a.jpg                → job: images/a.jpg → images/optimized/a.jpg
//! ├── b.PNG                → job
//! ├── c.Jpg                skipped (casing not configured)
//! ├── notes.txt            skipped
//! └── optimized/           # output_dir, created on demand
//! ```
//!
//! Jobs keep directory-listing order; nothing is sorted.

use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One file to optimize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub file_name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Jobs discovered by [`scan`].
#[derive(Debug, Default)]
pub struct ScanResult {
    pub jobs: Vec<ImageJob>,
    /// Whether the output directory had to be created.
    pub created_output_dir: bool,
}

fn directory_unavailable(path: &Path, source: io::Error) -> OptimizeError {
    OptimizeError::DirectoryUnavailable {
        path: path.to_path_buf(),
        source,
    }
}

/// List entry names directly under `dir`, in listing order.
///
/// Names that are not valid UTF-8 cannot match an extension and are dropped.
pub fn list_input(dir: &Path) -> Result<Vec<String>, OptimizeError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| directory_unavailable(dir, e))? {
        let entry = entry.map_err(|e| directory_unavailable(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }
    Ok(names)
}

/// Create `dir` (and parents) unless it already exists.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_output_dir(dir: &Path) -> Result<bool, OptimizeError> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| directory_unavailable(dir, e))?;
    Ok(true)
}

/// Case-sensitive exact suffix match against the configured extensions.
pub fn matches_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_ref()))
}

/// Discover the jobs for a run.
///
/// The input directory is read before the output directory is created, so a
/// missing input never leaves a stray output tree behind.
pub fn scan(config: &OptimizerConfig) -> Result<ScanResult, OptimizeError> {
    let names = list_input(&config.input_dir)?;
    let created_output_dir = ensure_output_dir(&config.output_dir)?;

    let jobs: Vec<ImageJob> = names
        .into_iter()
        .filter(|name| matches_extension(name, &config.extensions))
        .map(|name| ImageJob {
            source: config.input_dir.join(&name),
            destination: config.output_dir.join(&name),
            file_name: name,
        })
        .collect();

    debug!(
        input = %config.input_dir.display(),
        jobs = jobs.len(),
        "scan complete"
    );

    Ok(ScanResult {
        jobs,
        created_output_dir,
    })
}
