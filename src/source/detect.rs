//! Root Detector: finds the directories that hold a complete feed and
//! decides which one an address resolves to.

use std::path::Path;

use crate::error::{Error, Result};

use super::address::split_fragment;
use super::index::{EntryCounter, find_paths};
use super::options::{FileTable, SourceOptions};

/// Directories of the archive (nested ones included) that hold every required file.
pub fn find_gtfs_paths(
    archive: &Path,
    files: &FileTable,
    options: &SourceOptions,
) -> Result<Vec<String>> {
    let mut counter = EntryCounter::new(options.entry_count_limit);
    let index = find_paths(archive, None, &mut counter)?;
    Ok(index
        .iter()
        .filter(|(_, names)| files.required_files_present(names))
        .map(|(dir, _)| dir.to_string())
        .collect())
}

/// Target chosen for one nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Directory or nested-archive entry to look for at this level.
    pub target: String,
    /// Fragment handed to the next level.
    pub remaining: String,
    /// Set when detection replaced the requested target.
    pub overridden: bool,
}

/// Reconcile the requested target with the detected feed roots.
///
/// Candidates are compared by their first segment only, so a root found in
/// `inner.zip#data` is reached through `inner.zip`. A single candidate wins
/// over whatever was requested; several candidates require the request to
/// name one of them.
pub fn resolve_target(
    candidates: &[String],
    requested: &str,
    remaining: &str,
) -> Result<ResolvedTarget> {
    let mut heads: Vec<&str> = candidates.iter().map(|c| split_fragment(c).0).collect();
    heads.sort_unstable();
    heads.dedup();

    match heads.as_slice() {
        [only] if *only != requested => Ok(ResolvedTarget {
            target: only.to_string(),
            remaining: String::new(),
            overridden: true,
        }),
        [_, _, ..] if !heads.contains(&requested) => Err(Error::AmbiguousRoot {
            candidates: candidates.to_vec(),
        }),
        _ => Ok(ResolvedTarget {
            target: requested.to_string(),
            remaining: remaining.to_string(),
            overridden: false,
        }),
    }
}
