//! tar archives, plain or wrapped in a gzip / xz / zstd stream

use crate::{
    formats::{CompressionMethod, Entry, EntrySource, Format},
    Result,
};
use anyhow::Context;
use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    vec,
};
use tar::Archive;
use xz2::read::XzDecoder;

/// tar members, indexed from the headers when the archive is opened
///
/// A compressed tar stream can only be walked front to back once, so the
/// member headers are read up front and the stream is closed again.
pub struct TarContainer {
    entries: vec::IntoIter<Entry>,
    format: Format,
}

impl TarContainer {
    pub fn open(archive_path: &Path, format: Format) -> Result<Self> {
        let file = File::open(archive_path)?;
        let reader = decoder(BufReader::new(file), format)?;
        let method = stream_method(format);

        let entries = read_headers(reader, method).with_context(|| {
            format!(
                "failed to read {} tar archive from {}",
                format.name(),
                archive_path.display()
            )
        })?;

        Ok(Self {
            entries: entries.into_iter(),
            format,
        })
    }
}

impl EntrySource for TarContainer {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        Ok(self.entries.next())
    }

    fn kind(&self) -> &'static str {
        match self.format {
            Format::Gzip => "tar.gz",
            Format::Xz => "tar.xz",
            Format::Zstd => "tar.zst",
            _ => "tar",
        }
    }
}

fn decoder(reader: BufReader<File>, format: Format) -> Result<Box<dyn Read>> {
    Ok(match format {
        Format::Gzip => Box::new(GzDecoder::new(reader)),
        Format::Xz => Box::new(XzDecoder::new(reader)),
        Format::Zstd => Box::new(zstd::stream::read::Decoder::with_buffer(reader)?),
        _ => Box::new(reader),
    })
}

fn stream_method(format: Format) -> CompressionMethod {
    match format {
        Format::Gzip => CompressionMethod::Gzip,
        Format::Xz => CompressionMethod::Xz,
        Format::Zstd => CompressionMethod::Zstd,
        _ => CompressionMethod::Tar,
    }
}

/// tar records no per-member compressed size; stored size equals size
fn read_headers<R: Read>(reader: R, method: CompressionMethod) -> Result<Vec<Entry>> {
    let mut archive = Archive::new(reader);
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();
        let size = entry.header().size()?;

        entries.push(Entry {
            name,
            size,
            stored_size: size,
            method,
        });
    }

    Ok(entries)
}
