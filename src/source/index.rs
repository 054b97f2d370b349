//! Directory index of a (possibly nested) archive.
//!
//! Directories inside nested archives are keyed as
//! `outer/inner.zip#dir/in/inner`, one `#` per level of nesting.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::zip::ZipExtractor;

/// Mapping from directory to the file names found directly in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    dirs: BTreeMap<String, BTreeSet<String>>,
}

impl PathIndex {
    /// Register a directory, leaving its file set empty if it is new.
    fn touch(&mut self, dir: String) -> &mut BTreeSet<String> {
        self.dirs.entry(dir).or_default()
    }

    /// Union `other` into `self`, key by key.
    fn merge(&mut self, other: PathIndex) {
        for (dir, files) in other.dirs {
            self.touch(dir).extend(files);
        }
    }

    pub fn get(&self, dir: &str) -> Option<&BTreeSet<String>> {
        self.dirs.get(dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.dirs.iter().map(|(dir, files)| (dir.as_str(), files))
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Running count of entries visited by one indexing run.
///
/// One counter is shared by every level of a traversal so that nesting
/// cannot multiply the budget.
#[derive(Debug)]
pub struct EntryCounter {
    count: usize,
    limit: usize,
}

impl EntryCounter {
    pub fn new(limit: usize) -> Self {
        Self { count: 0, limit }
    }

    /// Count one entry, failing once the limit is passed.
    pub fn tick(&mut self) -> Result<()> {
        self.count += 1;
        if self.count > self.limit {
            return Err(Error::TraversalLimitExceeded { limit: self.limit });
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Build the directory index of the archive at `archive`, descending into nested archives.
///
/// Nested archives are copied to temporary files while this level is read
/// and indexed only after the archive itself is closed, so a chain of
/// nested archives holds no open file handles.
///
/// # Arguments
///
/// * `archive` - Path of the archive to index
/// * `basepath` - Key prefix for this level: `None` at the top, and
///   `"<outer entry path>#"` for each nested archive
/// * `counter` - Entry counter shared by every level of the traversal
///
/// # Returns
///
/// The union of this level's directories and those of every nested archive.
///
/// # Errors
///
/// Returns [`Error::TraversalLimitExceeded`] once the counter passes its
/// limit, and [`Error::InvalidArchive`] if any archive cannot be read.
pub fn find_paths(
    archive: &Path,
    basepath: Option<&str>,
    counter: &mut EntryCounter,
) -> Result<PathIndex> {
    let base = basepath.unwrap_or("");
    let mut index = PathIndex::default();
    let mut nested = Vec::new();

    {
        let zip = ZipExtractor::open(archive)?;
        for entry in zip.entries() {
            counter.tick()?;

            let (dir, name) = entry.split_name();
            let dir = format!("{base}{dir}");

            if entry.is_directory {
                index.touch(dir);
                index.touch(format!("{base}{}", entry.file_name.trim_end_matches('/')));
            } else if entry.is_archive() {
                index.touch(dir);
                let nested_base = format!("{base}{}#", entry.file_name);
                nested.push((nested_base, zip.extract_to_temp(entry)?));
            } else {
                index.touch(dir).insert(name.to_string());
            }
        }
    }

    for (nested_base, path) in nested {
        debug!("descending into {nested_base}");
        index.merge(find_paths(&path, Some(&nested_base), counter)?);
    }

    Ok(index)
}
