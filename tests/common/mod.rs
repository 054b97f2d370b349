//! Shared fixtures for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use gtfszip::{FileTable, SourceOptions, ZipSource};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Builds an in-memory archive. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    zip_bytes_with(entries, zip::CompressionMethod::Stored)
}

pub fn zip_bytes_with(entries: &[(&str, &[u8])], method: zip::CompressionMethod) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default().compression_method(method);

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(name.to_string(), options).unwrap();
        } else {
            writer.start_file(name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write_archive(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// A two-file feed table keeps fixtures small.
pub fn small_table() -> FileTable {
    FileTable::new(["stops.txt", "routes.txt"], ["shapes.txt"])
}

pub fn source(options: SourceOptions) -> ZipSource {
    init_logger();
    ZipSource::new(options).with_file_table(small_table())
}

pub fn auto_source() -> ZipSource {
    source(SourceOptions::default().auto_detect_root(true))
}

/// Address string for `archive` with an optional fragment.
pub fn address(archive: &Path, fragment: &str) -> String {
    if fragment.is_empty() {
        archive.display().to_string()
    } else {
        format!("{}#{}", archive.display(), fragment)
    }
}

/// Sorted file names present in `dir`.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub const STOPS: &[u8] = b"stop_id,stop_name,stop_lat,stop_lon\n1,Main St,39.35,-76.66\n";
pub const ROUTES: &[u8] = b"route_id,route_short_name,route_type\nR1,1,3\n";
