//! ZIP archive parsing and extraction.
//!
//! This is the archive entry reader the feed locator is built on. It lists
//! entries, reads their bytes, and extracts single entries to disk or to a
//! scoped temporary file.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Entry listing and extraction
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED and DEFLATE compression methods, with CRC-32 verification
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod error;
mod extractor;
mod parser;
mod structures;

pub use error::ZipError;
pub use extractor::ZipExtractor;
pub use parser::ZipParser;
pub use structures::*;
