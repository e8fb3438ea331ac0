//! ZIP format support

use crate::{
    formats::{CompressionMethod, Entry, EntrySource},
    Result,
};
use anyhow::Context;
use std::{fs::File, io::BufReader, path::Path};
use zip::ZipArchive;

/// a zip archive read through its central directory
pub struct ZipContainer {
    archive: ZipArchive<BufReader<File>>,
    index: usize,
}

impl ZipContainer {
    pub fn open(archive_path: &Path) -> Result<Self> {
        let file = File::open(archive_path)?;
        let archive = ZipArchive::new(BufReader::new(file)).with_context(|| {
            format!("failed to read ZIP archive from {}", archive_path.display())
        })?;

        Ok(Self { archive, index: 0 })
    }
}

impl EntrySource for ZipContainer {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        if self.index >= self.archive.len() {
            return Ok(None);
        }

        // raw access: sizes and method only, no decryption or decompression
        let file = self.archive.by_index_raw(self.index)?;
        let entry = Entry {
            name: file.name().to_string(),
            size: file.size(),
            stored_size: file.compressed_size(),
            method: method_of(file.compression()),
        };
        drop(file);

        self.index += 1;
        Ok(Some(entry))
    }

    fn kind(&self) -> &'static str {
        "zip"
    }
}

/// map a recorded zip method; codes this build cannot decode are still named
fn method_of(method: zip::CompressionMethod) -> CompressionMethod {
    match method {
        zip::CompressionMethod::Stored => CompressionMethod::Stored,
        zip::CompressionMethod::Deflated => CompressionMethod::Deflated,
        zip::CompressionMethod::DEFLATE64 => CompressionMethod::Deflate64,
        zip::CompressionMethod::Bzip2 => CompressionMethod::Bzip2,
        zip::CompressionMethod::LZMA => CompressionMethod::Lzma,
        zip::CompressionMethod::Zstd => CompressionMethod::Zstd,
        zip::CompressionMethod::XZ => CompressionMethod::Xz,
        zip::CompressionMethod::Aes => CompressionMethod::Aes,
        _ => CompressionMethod::Zipped,
    }
}
