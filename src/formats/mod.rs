//! container access: real directories and archives behind one handle
//!
//! A [`Container`] is opened from a path and yields [`Entry`] records one at
//! a time, in whatever order the underlying directory or archive stores
//! them. Dropping the handle releases the directory stream or archive file.

use crate::Result;
use std::{
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

pub mod directory;
pub mod sevenz;
pub mod tarball;
pub mod zip;

use directory::DirectoryContainer;
use sevenz::SevenZContainer;
use tarball::TarContainer;
use self::zip::ZipContainer;

/// suffixes tried when a path names neither a directory nor a file,
/// so that `zzdir test` lists `test.zip`
pub const ZIP_SUFFIXES: &[&str] = &[".zip", ".ZIP"];

/// one listable record inside a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// logical size in bytes
    pub size: u64,
    /// bytes occupied inside the container
    pub stored_size: u64,
    pub method: CompressionMethod,
}

/// how an entry is stored, resolved to a short name by [`CompressionMethod::name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflated,
    Deflate64,
    Bzip2,
    Lzma,
    Zstd,
    Xz,
    Gzip,
    Aes,
    /// any other zip method
    Zipped,
    /// member of an uncompressed tar
    Tar,
    SevenZ,
    Directory,
    Symlink,
    Fifo,
    CharDevice,
    BlockDevice,
    Socket,
    /// a node of no other known type
    Special,
}

impl CompressionMethod {
    /// short display name, at most 9 characters
    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::Stored => "stored",
            CompressionMethod::Deflated => "defl:N",
            CompressionMethod::Deflate64 => "defl:B",
            CompressionMethod::Bzip2 => "bzip2",
            CompressionMethod::Lzma => "lzma",
            CompressionMethod::Zstd => "zstd",
            CompressionMethod::Xz => "xz",
            CompressionMethod::Gzip => "gzip",
            CompressionMethod::Aes => "aes",
            CompressionMethod::Zipped => "zipped",
            CompressionMethod::Tar => "tar",
            CompressionMethod::SevenZ => "7z",
            CompressionMethod::Directory => "directory",
            CompressionMethod::Symlink => "is/lnk",
            CompressionMethod::Fifo => "is/fifo",
            CompressionMethod::CharDevice => "is/chr",
            CompressionMethod::BlockDevice => "is/blk",
            CompressionMethod::Socket => "is/sock",
            CompressionMethod::Special => "special",
        }
    }
}

/// Supported archive formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Tar,
    Zstd,
    Gzip,
    Xz,
    Zip,
    SevenZ,
}

impl Format {
    /// Detect format from file path, with magic number validation
    pub fn detect(path: &Path) -> Result<Self> {
        if let Some(format) = Self::from_magic(path)? {
            return Ok(format);
        }

        if let Some(format) = Self::from_extension(path) {
            return Ok(format);
        }

        Self::from_mime(path)
            .ok_or_else(|| anyhow::anyhow!("not a directory or recognized archive"))
    }

    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?.to_lowercase();

        if filename.ends_with(".tar") {
            Some(Format::Tar)
        } else if filename.ends_with(".zst")
            || filename.ends_with(".zstd")
            || filename.ends_with(".tzst")
        {
            Some(Format::Zstd)
        } else if filename.ends_with(".tgz") || filename.ends_with(".gz") {
            Some(Format::Gzip)
        } else if filename.ends_with(".txz") || filename.ends_with(".xz") {
            Some(Format::Xz)
        } else if filename.ends_with(".zip") || filename.ends_with(".jar") {
            Some(Format::Zip)
        } else if filename.ends_with(".7z") {
            Some(Format::SevenZ)
        } else {
            None
        }
    }

    /// Detect format from the leading bytes of the file
    fn from_magic(path: &Path) -> Result<Option<Self>> {
        let mut buffer = Vec::with_capacity(512);
        File::open(path)?.take(512).read_to_end(&mut buffer)?;

        if buffer.len() >= 4 {
            match &buffer[..4] {
                [0x28, 0xB5, 0x2F, 0xFD] => return Ok(Some(Format::Zstd)),
                [0x1F, 0x8B, _, _] => return Ok(Some(Format::Gzip)),
                [0xFD, 0x37, 0x7A, 0x58] => return Ok(Some(Format::Xz)),
                [0x50, 0x4B, 0x03, 0x04] | [0x50, 0x4B, 0x05, 0x06] | [0x50, 0x4B, 0x07, 0x08] => {
                    return Ok(Some(Format::Zip));
                }
                _ => {}
            }
        }

        if buffer.len() >= 6 && &buffer[..6] == b"7z\xBC\xAF\x27\x1C" {
            return Ok(Some(Format::SevenZ));
        }

        // ustar header magic
        if buffer.len() >= 262 && &buffer[257..262] == b"ustar" {
            return Ok(Some(Format::Tar));
        }

        Ok(None)
    }

    /// last resort: mime sniffing
    fn from_mime(path: &Path) -> Option<Self> {
        match tree_magic_mini::from_filepath(path)? {
            "application/x-tar" => Some(Format::Tar),
            "application/zstd" => Some(Format::Zstd),
            "application/gzip" | "application/x-gzip" => Some(Format::Gzip),
            "application/x-xz" => Some(Format::Xz),
            "application/zip" | "application/java-archive" => Some(Format::Zip),
            "application/x-7z-compressed" => Some(Format::SevenZ),
            _ => None,
        }
    }

    /// Get format name for display
    pub fn name(&self) -> &'static str {
        match self {
            Format::Tar => "tar",
            Format::Zstd => "Zstandard",
            Format::Gzip => "Gzip",
            Format::Xz => "XZ",
            Format::Zip => "ZIP",
            Format::SevenZ => "7-Zip",
        }
    }
}

/// a backend that hands out entries one at a time
pub trait EntrySource {
    /// next entry, or `None` once the container is exhausted
    fn next_entry(&mut self) -> Result<Option<Entry>>;

    /// short name used in diagnostics
    fn kind(&self) -> &'static str;
}

/// an open directory or archive
pub struct Container {
    path: PathBuf,
    source: Box<dyn EntrySource>,
}

impl Container {
    /// open a directory or archive
    ///
    /// Paths that do not exist are retried with [`ZIP_SUFFIXES`] appended.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve(path.as_ref())?;

        let source: Box<dyn EntrySource> = if fs::metadata(&path)?.is_dir() {
            Box::new(DirectoryContainer::open(&path)?)
        } else {
            match Format::detect(&path)? {
                Format::Zip => Box::new(ZipContainer::open(&path)?),
                Format::SevenZ => Box::new(SevenZContainer::open(&path)?),
                format @ (Format::Tar | Format::Gzip | Format::Xz | Format::Zstd) => {
                    Box::new(TarContainer::open(&path, format)?)
                }
            }
        };

        Ok(Self::with_source(path, source))
    }

    /// wrap an already opened backend
    pub fn with_source(path: impl Into<PathBuf>, source: Box<dyn EntrySource>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), kind = source.kind(), "opened container");
        Self { path, source }
    }

    /// the path that was actually opened, after suffix resolution
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }

    /// next entry, or `None` at the end of the container
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        let entry = self.source.next_entry()?;
        if let Some(entry) = &entry {
            trace!(name = %entry.name, size = entry.size, stored = entry.stored_size, "entry");
        }
        Ok(entry)
    }

    /// release the container
    pub fn close(self) {
        drop(self);
    }
}

impl Iterator for Container {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), kind = self.source.kind(), "closed container");
    }
}

/// map a requested path to the one that exists on disk
fn resolve(path: &Path) -> io::Result<PathBuf> {
    match fs::metadata(path) {
        Ok(_) => Ok(path.to_path_buf()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            for suffix in ZIP_SUFFIXES {
                let mut candidate = path.as_os_str().to_owned();
                candidate.push(suffix);
                let candidate = PathBuf::from(candidate);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
            Err(err)
        }
        Err(err) => Err(err),
    }
}
