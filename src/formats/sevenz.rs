//! 7-Zip format support

use crate::{
    formats::{CompressionMethod, Entry, EntrySource},
    Result,
};
use anyhow::Context;
use sevenz_rust::{Archive, Password, SevenZReader};
use std::{fs::File, path::Path};

/// a 7z archive, walked through its header database
pub struct SevenZContainer {
    reader: SevenZReader<File>,
    stored_sizes: Vec<u64>,
    index: usize,
}

impl SevenZContainer {
    pub fn open(archive_path: &Path) -> Result<Self> {
        let reader = SevenZReader::open(archive_path, Password::empty()).with_context(|| {
            format!("failed to read 7z archive from {}", archive_path.display())
        })?;
        let stored_sizes = stored_sizes(reader.archive());

        Ok(Self {
            reader,
            stored_sizes,
            index: 0,
        })
    }
}

impl EntrySource for SevenZContainer {
    fn next_entry(&mut self) -> Result<Option<Entry>> {
        let Some(file) = self.reader.archive().files.get(self.index) else {
            return Ok(None);
        };
        let stored_size = self.stored_sizes.get(self.index).copied().unwrap_or_default();
        self.index += 1;

        Ok(Some(Entry {
            name: file.name.clone(),
            size: file.size,
            stored_size,
            method: CompressionMethod::SevenZ,
        }))
    }

    fn kind(&self) -> &'static str {
        "7z"
    }
}

/// per-file share of the packed block each file lives in
///
/// The archive database only records a packed size per block, attached to
/// the block's first file. Members of a solid block get the block's packed
/// size split in proportion to their unpacked size, so all of them show the
/// block's ratio. Files without a stream occupy nothing.
fn stored_sizes(archive: &Archive) -> Vec<u64> {
    let blocks = &archive.stream_map.file_folder_index;
    let mut packed = vec![0u64; archive.folders.len()];
    let mut unpacked = vec![0u64; archive.folders.len()];

    for (file, block) in archive.files.iter().zip(blocks) {
        if let (true, Some(block)) = (file.has_stream, *block) {
            if let (Some(p), Some(u)) = (packed.get_mut(block), unpacked.get_mut(block)) {
                *p = p.saturating_add(file.compressed_size);
                *u = u.saturating_add(file.size);
            }
        }
    }

    archive
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| match blocks.get(i).copied().flatten() {
            Some(block) if file.has_stream => {
                let packed = packed.get(block).copied().unwrap_or_default();
                let unpacked = unpacked.get(block).copied().unwrap_or_default();
                share(file.size, packed, unpacked)
            }
            _ => 0,
        })
        .collect()
}

fn share(size: u64, packed: u64, unpacked: u64) -> u64 {
    if unpacked == 0 {
        return 0;
    }
    let share = u128::from(size) * u128::from(packed) / u128::from(unpacked);
    u64::try_from(share).unwrap_or(u64::MAX)
}
