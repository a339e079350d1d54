//! Deterministic grouping and rendering of scan results

use crate::common::{path_to_string, ScanError};
use crate::executable::{Architecture, ExecutableInfo, ScanResults};
use fs_err as fs;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One library and the executables depending on it, paths in ascending order
#[derive(Debug, Serialize)]
pub struct LibraryUsage<'a> {
    pub library: &'a str,
    pub executables: Vec<&'a ExecutableInfo>,
}

/// All matches for one architecture
#[derive(Debug, Serialize)]
pub struct ArchitectureBlock<'a> {
    pub architecture: Architecture,
    pub libraries: Vec<LibraryUsage<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    scanned_root: String,
    architectures: Vec<ArchitectureBlock<'a>>,
}

/// Deterministic view over the aggregate
///
/// Architectures ascend by machine value, libraries within a block are
/// ordered by descending executable count (ties by ascending name), and each
/// library's executables by ascending path. Independent of the order the
/// results were recorded in.
pub fn group_by_architecture(results: &ScanResults) -> Vec<ArchitectureBlock<'_>> {
    let mut by_arch: BTreeMap<Architecture, BTreeMap<&str, Vec<&ExecutableInfo>>> = BTreeMap::new();
    for (library, executables) in results.iter() {
        for info in executables {
            by_arch
                .entry(info.architecture)
                .or_default()
                .entry(library.as_str())
                .or_default()
                .push(info);
        }
    }

    by_arch
        .into_iter()
        .map(|(architecture, libraries)| {
            let mut libraries: Vec<LibraryUsage<'_>> = libraries
                .into_iter()
                .map(|(library, mut executables)| {
                    executables.sort_by(|a, b| a.path.cmp(&b.path));
                    LibraryUsage {
                        library,
                        executables,
                    }
                })
                .collect();
            // the inner map iterates in name order and the sort is stable,
            // so equal-count libraries stay in ascending name order
            libraries.sort_by(|a, b| b.executables.len().cmp(&a.executables.len()));
            ArchitectureBlock {
                architecture,
                libraries,
            }
        })
        .collect()
}

/// Render the report text
pub fn render_text(results: &ScanResults, scanned_root: &Path) -> String {
    let mut out = format!(
        "Report on dynamic used libraries by ELF executables on {}\n",
        path_to_string(scanned_root)
    );
    for block in group_by_architecture(results) {
        out.push_str(&format!("---------- {} ----------\n", block.architecture));
        for usage in &block.libraries {
            out.push_str(&format!(
                "{} ({} execs)\n",
                usage.library,
                usage.executables.len()
            ));
            for info in &usage.executables {
                out.push_str(&format!("\t-> {}\n", path_to_string(&info.path)));
            }
        }
    }
    out
}

/// Write the text report, overwriting `output`
///
/// The report is rendered in full before a single write call; a failure is
/// surfaced and no partially written file is ever declared a success.
pub fn write_text_report(
    results: &ScanResults,
    output: &Path,
    scanned_root: &Path,
) -> Result<(), ScanError> {
    let contents = render_text(results, scanned_root);
    fs::write(output, contents).map_err(|source| ScanError::ReportWrite {
        path: output.to_owned(),
        source,
    })
}

/// Write the same grouped view as JSON
pub fn write_json_report(
    results: &ScanResults,
    output: &Path,
    scanned_root: &Path,
) -> Result<(), ScanError> {
    let report = JsonReport {
        scanned_root: path_to_string(scanned_root),
        architectures: group_by_architecture(results),
    };
    let contents = serde_json::to_string_pretty(&report)?;
    fs::write(output, contents).map_err(|source| ScanError::ReportWrite {
        path: output.to_owned(),
        source,
    })
}
