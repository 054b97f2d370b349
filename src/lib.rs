//! # gtfszip
//!
//! Locate and extract GTFS feed files stored in ZIP archives, including
//! archives nested inside other archives.
//!
//! Feeds are addressed as `archive.zip[#fragment]`, where the fragment names
//! a directory inside the archive and may descend into nested archives one
//! `#` at a time: `outer.zip#inner.zip#gtfs`.
//!
//! ## Features
//!
//! - Pure Rust ZIP reader (ZIP64, STORED and DEFLATE, CRC-32 checked)
//! - Directory index across nested archives, bounded by an entry ceiling
//! - Feed root detection, with an explicit error when the root is ambiguous
//! - Flat extraction of recognized feed files into a working directory
//!
//! ## Example
//!
//! ```no_run
//! use gtfszip::{SourceOptions, ZipSource};
//!
//! fn main() -> gtfszip::Result<()> {
//!     let source = ZipSource::new(SourceOptions::default().auto_detect_root(true));
//!     let loaded = source.load("feeds.zip#gtfs")?;
//!
//!     for name in loaded.source_filenames() {
//!         println!("{name}");
//!     }
//!     println!("extracted into {}", loaded.path().display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod source;
pub mod zip;

pub use cli::Cli;
pub use error::{Error, Result};
pub use io::{LocalFileReader, ReadAt};
pub use source::{Address, FileTable, LoadedSource, PathIndex, SourceOptions, ZipSource};
pub use crate::zip::{ZipExtractor, ZipFileEntry};
