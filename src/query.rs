//! Data structures that must be filled with the input and the parameters for a scan

use crate::common::ScanError;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct ScanTarget {
    /// Root directory whose files are examined
    pub root: PathBuf,
    /// Exact names of the shared libraries to find dependents of
    pub libraries: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ScanParameters {
    /// Descend into subdirectories of the root
    pub recursive: bool,
    /// Worker pool size override; deduced from the host when not set
    pub max_workers: Option<usize>,
}

/// Complete specification of a scan task
#[derive(Clone, Debug)]
pub struct ScanQuery {
    pub target: ScanTarget,
    pub parameters: ScanParameters,
}

impl ScanQuery {
    /// Query with default parameters: non-recursive, deduced worker count
    pub fn for_directory<P: AsRef<Path>>(root: P, libraries: Vec<String>) -> Self {
        Self {
            target: ScanTarget {
                root: root.as_ref().to_owned(),
                libraries,
            },
            parameters: ScanParameters {
                recursive: false,
                max_workers: None,
            },
        }
    }

    /// Check the preconditions the caller must establish before scanning
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.target.libraries.is_empty() {
            return Err(ScanError::NoTargetLibraries);
        }
        if !self.target.root.is_dir() {
            return Err(ScanError::InvalidTarget(format!(
                "{} is not a directory",
                self.target.root.display()
            )));
        }
        Ok(())
    }

    /// Worker pool size: the override, or min(32, available_parallelism + 4)
    pub fn worker_count(&self) -> usize {
        self.parameters
            .max_workers
            .unwrap_or_else(default_worker_count)
            .max(1)
    }
}

fn default_worker_count() -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    (parallelism + 4).min(32)
}
