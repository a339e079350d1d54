use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Enumerate candidate files under `root`
///
/// With `recursive` unset only the immediate children of `root` are
/// considered. Symbolic links are not followed; unreadable directories are
/// skipped. The returned order is whatever the traversal produces and must
/// not be relied upon downstream.
pub fn collect_candidates(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }
    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
