//! size column and compression ratio formatting
//!
//! Each listed entry becomes one [`Row`]. Entries larger than
//! [`KILOBYTE_THRESHOLD`] bytes are shown in kilobytes with a narrower
//! number field so both layouts line up in the same table.

use std::fmt;

/// sizes above this many bytes are rendered in kilobytes
pub const KILOBYTE_THRESHOLD: u64 = 999_999;

/// the size column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeColumn {
    /// raw byte count, 6 columns wide
    Bytes(u64),
    /// `size >> 10`, 5 columns wide plus a `K` suffix
    Kilobytes(u64),
}

/// one formatted line of the content table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub size: SizeColumn,
    pub method: &'a str,
    pub ratio: i128,
    pub name: &'a str,
}

impl<'a> Row<'a> {
    /// build the row for an entry
    ///
    /// `method` is the display name of the entry's compression method.
    pub fn new(size: u64, stored_size: u64, method: &'a str, name: &'a str) -> Self {
        let size_column = if size > KILOBYTE_THRESHOLD {
            SizeColumn::Kilobytes(size >> 10)
        } else {
            SizeColumn::Bytes(size)
        };
        Self {
            size: size_column,
            method,
            ratio: compression_ratio(size, stored_size),
            name,
        }
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            SizeColumn::Kilobytes(kb) => write!(f, "{kb:5}K")?,
            SizeColumn::Bytes(bytes) => write!(f, "{bytes:6}")?,
        }
        write!(f, " {:<9} {:2}% {}", self.method, self.ratio, self.name)
    }
}

/// percentage saved by compression, integer arithmetic only
///
/// The `| 1` on numerator and divisor keeps the divisor nonzero for empty
/// entries. The two branches round differently near the threshold; both
/// are kept as they are. Computed in `i128` so no `u64` input can overflow.
pub fn compression_ratio(size: u64, stored_size: u64) -> i128 {
    let size = i128::from(size);
    let stored = i128::from(stored_size);

    if size > i128::from(KILOBYTE_THRESHOLD) {
        100 - (stored | 1) / ((size / 100) | 1)
    } else {
        100 - (stored | 1) * 100 / (size | 1)
    }
}
