use std::io;

use thiserror::Error;

/// Low-level failures raised while reading a ZIP archive.
///
/// These never cross the [`ZipSource`](crate::ZipSource) boundary; they are
/// translated into [`Error::InvalidArchive`](crate::Error::InvalidArchive).
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a valid ZIP file")]
    NotAZip,

    #[error("Malformed ZIP archive: {0}")]
    Malformed(String),

    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    #[error("CRC mismatch for {name}: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },
}

pub type Result<T> = std::result::Result<T, ZipError>;
