//! real directories

use crate::{
    formats::{CompressionMethod, Entry, EntrySource},
    Result,
};
use anyhow::Context;
use std::{
    fs::{self, FileType},
    path::Path,
};
use walkdir::WalkDir;

/// the immediate children of a directory, in readdir order
pub struct DirectoryContainer {
    entries: walkdir::IntoIter,
}

impl DirectoryContainer {
    pub fn open(path: &Path) -> Result<Self> {
        // surface permission problems at open time rather than on the first entry
        fs::read_dir(path)?;

        let entries = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter();

        Ok(Self { entries })
    }
}

impl EntrySource for DirectoryContainer {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        let Some(entry) = self.entries.next() else {
            return Ok(None);
        };
        let entry = entry?;
        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;

        let method = method_of(entry.file_type());
        let size = metadata.len();
        Ok(Some(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size,
            stored_size: size,
            method,
        }))
    }

    fn kind(&self) -> &'static str {
        "directory"
    }
}

fn method_of(file_type: FileType) -> CompressionMethod {
    if file_type.is_file() {
        CompressionMethod::Stored
    } else if file_type.is_dir() {
        CompressionMethod::Directory
    } else if file_type.is_symlink() {
        CompressionMethod::Symlink
    } else {
        special_method_of(file_type)
    }
}

#[cfg(unix)]
fn special_method_of(file_type: FileType) -> CompressionMethod {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_fifo() {
        CompressionMethod::Fifo
    } else if file_type.is_char_device() {
        CompressionMethod::CharDevice
    } else if file_type.is_block_device() {
        CompressionMethod::BlockDevice
    } else if file_type.is_socket() {
        CompressionMethod::Socket
    } else {
        CompressionMethod::Special
    }
}

#[cfg(not(unix))]
fn special_method_of(_file_type: FileType) -> CompressionMethod {
    CompressionMethod::Special
}
