//! Error types for feed location and extraction.
//!
//! Callers of [`ZipSource`](crate::ZipSource) only ever see [`Error`]; the
//! archive reader's own [`ZipError`] is translated at that boundary.
//!
//! ```rust,no_run
//! use gtfszip::{Error, SourceOptions, ZipSource};
//!
//! let source = ZipSource::new(SourceOptions::default().auto_detect_root(true));
//! match source.load("feeds.zip") {
//!     Ok(loaded) => println!("extracted to {}", loaded.path().display()),
//!     Err(Error::AmbiguousRoot { candidates }) => {
//!         eprintln!("pick one of: {}", candidates.join(", "));
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::zip::ZipError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The archive cannot be opened or read.
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// Any other failure while resolving or loading an address.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Several directories hold a complete feed and the address names none of them.
    #[error("Ambiguous feed root, candidates: {}", candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },

    /// Indexing saw more entries than the configured ceiling.
    #[error("Archive traversal exceeded {limit} entries")]
    TraversalLimitExceeded { limit: usize },
}

impl Error {
    /// Returns `true` if retrying with a different address can succeed.
    ///
    /// Only an ambiguous root qualifies: the caller can pick one of the
    /// candidates as an explicit fragment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::AmbiguousRoot { .. })
    }
}

impl From<ZipError> for Error {
    fn from(err: ZipError) -> Self {
        Error::InvalidArchive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
