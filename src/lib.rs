//! zzdir - list directories and archives as one content table
//!
//! Every path is opened as a [`formats::Container`], whether it is a real
//! directory or a zip, tar (plain, gzip, xz, zstd) or 7z archive. Each
//! entry is printed with its size, compression method, compression ratio
//! and name.

pub mod cli;
pub mod error;
pub mod formats;
pub mod list;
pub mod logging;
pub mod ratio;

// re-export main types for convenience
pub use error::Result;
pub use formats::{CompressionMethod, Container, Entry};
pub use list::ExitStatus;
