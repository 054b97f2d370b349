//! Locating and extracting a feed inside (possibly nested) ZIP archives.
//!
//! An address names an archive and, optionally, a directory inside it:
//!
//! ```text
//! feed.zip                      archive root
//! feed.zip#gtfs                 directory gtfs/ of feed.zip
//! outer.zip#inner.zip#gtfs      directory gtfs/ of inner.zip, stored in outer.zip
//! ```
//!
//! [`ZipSource`] parses the address, creates the working directory and
//! extracts the recognized feed files into it, flat.

mod address;
mod detect;
mod index;
mod nested;
mod options;

pub use address::{Address, decode_target, split_fragment};
pub use detect::{ResolvedTarget, find_gtfs_paths, resolve_target};
pub use index::{EntryCounter, PathIndex, find_paths};
pub use nested::{ExtractContext, extract_nested};
pub use options::{DEFAULT_ENTRY_COUNT_LIMIT, FileTable, SourceOptions};

use std::path::{Path, PathBuf};

use log::info;
use tempfile::TempDir;

use crate::error::{Error, Result};

/// Extracts feeds from ZIP addresses.
#[derive(Debug, Clone, Default)]
pub struct ZipSource {
    options: SourceOptions,
    files: FileTable,
}

impl ZipSource {
    pub fn new(options: SourceOptions) -> Self {
        Self {
            options,
            files: FileTable::default(),
        }
    }

    pub fn with_file_table(mut self, files: FileTable) -> Self {
        self.files = files;
        self
    }

    pub fn options(&self) -> &SourceOptions {
        &self.options
    }

    pub fn file_table(&self) -> &FileTable {
        &self.files
    }

    /// Whether the archive part of `address` exists; the fragment is ignored.
    pub fn exists(address: &str) -> bool {
        Address::parse(address).archive_path.exists()
    }

    /// Extract the feed at `address` into a fresh temporary working directory.
    ///
    /// # Arguments
    ///
    /// * `address` - `archive.zip[#fragment]`, the fragment descending one
    ///   nested archive per `#`
    ///
    /// # Returns
    ///
    /// A [`LoadedSource`] owning the working directory, which is removed when
    /// it is dropped unless [`LoadedSource::keep`] is called.
    ///
    /// # Errors
    ///
    /// Any [`Error`] variant: unreadable archives, missing targets, an
    /// ambiguous feed root, or a traversal past the entry ceiling.
    pub fn load(&self, address: &str) -> Result<LoadedSource> {
        let workdir = tempfile::Builder::new()
            .prefix("gtfszip-")
            .tempdir()
            .map_err(|e| Error::InvalidSource(format!("cannot create working directory: {e}")))?;

        let (archive_path, source_filenames) = self.extract(address, workdir.path())?;
        Ok(LoadedSource {
            workdir,
            archive_path,
            source_filenames,
        })
    }

    /// Extract the feed at `address` into an existing directory owned by the caller.
    ///
    /// Returns every file name seen in the resolved target.
    pub fn load_into(&self, address: &str, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Err(Error::InvalidSource(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        self.extract(address, dir).map(|(_, names)| names)
    }

    /// Feed roots found anywhere in the archive at `archive`.
    pub fn find_roots(&self, archive: &Path) -> Result<Vec<String>> {
        find_gtfs_paths(archive, &self.files, &self.options)
    }

    /// Directory index of the archive at `archive`.
    pub fn index(&self, archive: &Path) -> Result<PathIndex> {
        let mut counter = EntryCounter::new(self.options.entry_count_limit);
        find_paths(archive, None, &mut counter)
    }

    fn extract(&self, address: &str, workdir: &Path) -> Result<(PathBuf, Vec<String>)> {
        let Address {
            archive_path,
            fragment,
        } = Address::parse(address);

        let ctx = ExtractContext {
            workdir,
            files: &self.files,
            options: &self.options,
        };
        let mut seen = Vec::new();
        extract_nested(&archive_path, &fragment, &ctx, &mut seen)?;

        info!(
            "loaded {} into {} ({} file(s) seen)",
            address,
            workdir.display(),
            seen.len()
        );
        Ok((archive_path, seen))
    }
}

/// A feed extracted into a temporary working directory.
///
/// The directory is removed when this value is dropped, unless it was
/// [kept](Self::keep).
#[derive(Debug)]
pub struct LoadedSource {
    workdir: TempDir,
    archive_path: PathBuf,
    source_filenames: Vec<String>,
}

impl LoadedSource {
    /// Working directory holding the extracted files.
    pub fn path(&self) -> &Path {
        self.workdir.path()
    }

    /// Archive the feed was read from.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Every file name seen in the resolved target, extracted or not.
    pub fn source_filenames(&self) -> &[String] {
        &self.source_filenames
    }

    /// Persist the working directory and return its path.
    pub fn keep(self) -> PathBuf {
        self.workdir.keep()
    }
}
