//! Nested Extractor: follows an address fragment through nested archives
//! and writes the recognized feed files of the target directory out flat.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::zip::ZipExtractor;

use super::address::{decode_target, split_fragment};
use super::detect::{ResolvedTarget, find_gtfs_paths, resolve_target};
use super::options::{FileTable, SourceOptions};

/// Everything one extraction shares across nesting levels.
pub struct ExtractContext<'a> {
    pub workdir: &'a Path,
    pub files: &'a FileTable,
    pub options: &'a SourceOptions,
}

/// Extract the feed addressed by `fragment` inside `archive` into the working directory.
///
/// Each call peels one `#` segment off `fragment`. Every file name seen in
/// the target directory is appended to `seen`, across all levels, whether or
/// not it was written out; only names in the file table are extracted, flat,
/// under their bare file name. Entries are handled in archive order. A nested
/// archive is entered after its parent's own files and once the parent is
/// closed, so on a name collision the deeper file wins.
///
/// # Arguments
///
/// * `archive` - Path of the archive at this nesting level
/// * `fragment` - The rest of the address, e.g. `inner.zip#gtfs`
/// * `ctx` - Working directory, file table and options for the extraction
/// * `seen` - Accumulates the names of all files found in target directories
///
/// # Errors
///
/// Returns [`Error::InvalidSource`] if the target does not exist or a file
/// cannot be written, [`Error::AmbiguousRoot`] when root detection finds
/// several feeds, and [`Error::InvalidArchive`] if an archive cannot be read.
pub fn extract_nested(
    archive: &Path,
    fragment: &str,
    ctx: &ExtractContext<'_>,
    seen: &mut Vec<String>,
) -> Result<()> {
    let (local, remaining) = split_fragment(fragment);
    let requested = decode_target(local)?;

    let ResolvedTarget {
        target,
        remaining,
        overridden,
    } = if ctx.options.auto_detect_root {
        let candidates = find_gtfs_paths(archive, ctx.files, ctx.options)?;
        debug!("feed roots in {}: {:?}", archive.display(), candidates);
        resolve_target(&candidates, &requested, remaining)?
    } else {
        ResolvedTarget {
            target: requested,
            remaining: remaining.to_string(),
            overridden: false,
        }
    };
    if overridden {
        warn!(
            "using detected feed root {:?} in {} instead of {:?}",
            target,
            archive.display(),
            local
        );
    }

    let prefix = format!("{target}/");
    let mut found = target.is_empty();
    let mut nested = Vec::new();

    {
        let zip = ZipExtractor::open(archive)?;
        for entry in zip.entries() {
            // Writers may omit directory entries, so a path prefix is enough
            found |= entry.file_name.starts_with(&prefix);
            if entry.is_directory {
                continue;
            }

            let (dir, name) = entry.split_name();
            if dir == target {
                found = true;
                seen.push(name.to_string());
                if ctx.files.is_recognized(name) {
                    debug!("extracting {}", entry.file_name);
                    let data = zip.extract_to_memory(entry)?;
                    let dest = ctx.workdir.join(name);
                    fs::write(&dest, data).map_err(|e| {
                        Error::InvalidSource(format!("cannot write {}: {e}", dest.display()))
                    })?;
                }
            } else if entry.file_name == target && entry.is_archive() {
                found = true;
                nested.push(zip.extract_to_temp(entry)?);
            }
        }
    }

    if !found {
        return Err(Error::InvalidSource(format!(
            "{target:?} not found in {}",
            archive.display()
        )));
    }

    for path in nested {
        debug!("entering nested archive {target} at {}", path.display());
        extract_nested(&path, &remaining, ctx, seen)?;
    }

    info!(
        "resolved {:?} in {}, {} file(s) seen so far",
        target,
        archive.display(),
        seen.len()
    );
    Ok(())
}
