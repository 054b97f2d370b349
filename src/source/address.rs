use std::path::PathBuf;

use crate::error::{Error, Result};

/// A feed address of the form `archive.zip[#fragment]`.
///
/// Only the first `#` separates the archive path; the fragment keeps any
/// further `#` so nested archives can be peeled one level at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub archive_path: PathBuf,
    pub fragment: String,
}

impl Address {
    pub fn parse(address: &str) -> Self {
        let (archive_path, fragment) = split_fragment(address);
        Self {
            archive_path: PathBuf::from(archive_path),
            fragment: fragment.to_string(),
        }
    }
}

/// Split at the first `#`; the second half is empty when there is none.
pub fn split_fragment(s: &str) -> (&str, &str) {
    s.split_once('#').unwrap_or((s, ""))
}

/// Turn a fragment segment into a directory or entry path inside an archive.
///
/// Percent-escapes are decoded and trailing slashes dropped; an empty result
/// is the archive root.
pub fn decode_target(target: &str) -> Result<String> {
    let decoded = urlencoding::decode(target)
        .map_err(|e| Error::InvalidSource(format!("cannot decode {target:?}: {e}")))?;
    Ok(decoded.trim_end_matches('/').to_string())
}
