use crate::common::ScanError;
use crate::elf::{self, Inspection};
use crate::executable::{ExecutableInfo, ScanResults};
use crate::query::ScanQuery;
use crate::walker;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Finds the executables below the query's root that depend on the target libraries
///
/// Candidate paths are fanned out over a bounded pool of worker threads; the
/// per-worker partial results are folded into a single `ScanResults` once
/// every worker has drained the queue.
pub(crate) struct Scanner {
    query: ScanQuery,
}

impl Scanner {
    pub(crate) fn new(query: &ScanQuery) -> Self {
        Self {
            query: query.clone(),
        }
    }

    pub(crate) fn run(&self) -> Result<ScanResults, ScanError> {
        let mut results = ScanResults::new();

        let targets: HashSet<&str> = self
            .query
            .target
            .libraries
            .iter()
            .map(String::as_str)
            .collect();
        if targets.is_empty() {
            return Ok(results);
        }

        let candidates =
            walker::collect_candidates(&self.query.target.root, self.query.parameters.recursive);
        if candidates.is_empty() {
            return Ok(results);
        }

        let workers = self.query.worker_count().min(candidates.len());
        debug!(
            "scanning {} candidates with {} workers",
            candidates.len(),
            workers
        );

        let (sender, receiver) = crossbeam_channel::unbounded();
        for path in candidates {
            // unbounded channel, the receiver is still alive
            let _ = sender.send(path);
        }
        drop(sender);

        let partials: Vec<Vec<(String, ExecutableInfo)>> =
            crossbeam::thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|_| {
                        let receiver = receiver.clone();
                        let targets = &targets;
                        scope.spawn(move |_| {
                            let mut found = Vec::new();
                            while let Ok(path) = receiver.recv() {
                                match analyze_candidate(&path, targets) {
                                    Ok(matches) => found.extend(matches),
                                    Err(e) => {
                                        debug!("error analyzing {}: {}", path.display(), e)
                                    }
                                }
                            }
                            found
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| handle.join())
                    .collect::<Result<Vec<_>, _>>()
            })
            .and_then(|joined| joined)
            .map_err(|_| ScanError::ScanFailed("a scan worker panicked".to_owned()))?;

        for partial in partials {
            for (library, info) in partial {
                results.record(library, info);
            }
        }

        Ok(results)
    }
}

/// One isolated unit of work: classify and analyze a single candidate path
///
/// Yields one `(library, ExecutableInfo)` pair per target library the file
/// depends on. Anything that is not a parseable ELF contributes nothing;
/// read and parse failures surface as errors for the caller to log.
fn analyze_candidate(
    path: &Path,
    targets: &HashSet<&str>,
) -> Result<Vec<(String, ExecutableInfo)>, ScanError> {
    if !elf::is_elf_candidate(path) {
        return Ok(Vec::new());
    }

    let filemap = elf::ElfFileMap::new(path)?;
    let file = match elf::inspect(&filemap)? {
        Inspection::Elf(file) => file,
        Inspection::NotElf => return Ok(Vec::new()),
    };

    let architecture = file.architecture();
    Ok(file
        .needed_libraries()
        .iter()
        .filter(|needed| targets.contains(*needed))
        .map(|needed| {
            (
                (*needed).to_owned(),
                ExecutableInfo::new(filemap.path(), architecture),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_target_set_yields_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("some_file"), b"\x7fELF junk").unwrap();

        let query = ScanQuery::for_directory(dir.path(), Vec::new());
        let results = Scanner::new(&query).run().unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn non_elf_files_contribute_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("script.sh"), b"#!/bin/sh\n").unwrap();
        fs::write(dir.path().join("notes.txt"), b"plain text").unwrap();

        let query = ScanQuery::for_directory(dir.path(), vec!["libc.so.6".to_owned()]);
        let results = Scanner::new(&query).run().unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn analyze_skips_file_without_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain");
        fs::write(&path, b"not a binary at all").unwrap();

        let targets = HashSet::from(["libc.so.6"]);
        assert!(analyze_candidate(&path, &targets).unwrap().is_empty());
    }

    #[test]
    fn analyze_surfaces_corrupt_elf_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt");
        fs::write(&path, b"\x7fELF\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();

        let targets = HashSet::from(["libc.so.6"]);
        assert!(analyze_candidate(&path, &targets).is_err());
    }
}
