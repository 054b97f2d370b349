use std::io::{Read, Write};
use std::path::Path;

use flate2::Crc;
use flate2::read::DeflateDecoder;
use log::debug;
use tempfile::TempPath;

use crate::io::{LocalFileReader, ReadAt};

use super::error::{Result, ZipError};
use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// ZIP file extractor
///
/// Opening an extractor reads the whole Central Directory once; the entries
/// are then available in archive order through [`entries`](Self::entries).
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
    entries: Vec<ZipFileEntry>,
}

impl ZipExtractor<LocalFileReader> {
    /// Open a ZIP archive on the local filesystem.
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(LocalFileReader::new(path)?)
    }
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: R) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let entries = parser.list_files()?;
        Ok(Self { parser, entries })
    }

    /// All entries of the archive, in Central Directory order
    pub fn entries(&self) -> &[ZipFileEntry] {
        &self.entries
    }

    /// Extract file data to memory
    ///
    /// The output is capped at the declared uncompressed size and checked
    /// against the stored CRC-32.
    pub fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let data_offset = self.parser.get_data_offset(entry)?;

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size.min(1 << 20) as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size)
                    .read_to_end(&mut out)?;
                out
            }
            CompressionMethod::Unknown(_) => {
                return Err(ZipError::UnsupportedCompression(
                    entry.compression_method.as_u16(),
                ));
            }
        };

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(ZipError::CrcMismatch {
                name: entry.file_name.clone(),
                expected: entry.crc32,
                actual: crc.sum(),
            });
        }

        Ok(data)
    }

    /// Extract an entry to a uniquely named temporary file.
    ///
    /// The file is written, flushed and closed before this returns, so the
    /// guard holds no open file handle.
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry to extract, usually a nested archive
    ///
    /// # Returns
    ///
    /// A [`TempPath`] guard; the file is deleted when the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be decoded or the temporary file
    /// cannot be written.
    pub fn extract_to_temp(&self, entry: &ZipFileEntry) -> Result<TempPath> {
        let (_, name) = entry.split_name();
        let mut tmp = tempfile::Builder::new().prefix(name).tempfile()?;
        let data = self.extract_to_memory(entry)?;
        tmp.write_all(&data)?;
        tmp.flush()?;

        let path = tmp.into_temp_path();
        debug!(
            "extracted nested archive {} to {}",
            entry.file_name,
            path.display()
        );
        Ok(path)
    }
}
