use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid scan target: {0}")]
    InvalidTarget(String),

    #[error("at least one target library must be specified")]
    NoTargetLibraries,

    #[error("scan failed: {0}")]
    ScanFailed(String),

    #[error("could not write report to {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    ElfError(#[from] goblin::error::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Best-effort conversion of a path for display purposes
pub fn path_to_string<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().into_owned()
}
