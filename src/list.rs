//! content table listing for directories and archives

use crate::formats::Container;
use crate::ratio::Row;
use std::{
    ffi::OsStr,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// sysexits EX_NOINPUT
pub const EX_NOINPUT: u8 = 66;
/// sysexits EX_IOERR
pub const EX_IOERR: u8 = 74;

/// aggregate process status; later variants take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ExitStatus {
    #[default]
    Success,
    /// a container failed while its entries were being read
    IoError,
    /// a path could not be opened
    NoInput,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::IoError => EX_IOERR,
            ExitStatus::NoInput => EX_NOINPUT,
        }
    }
}

/// outcome of listing one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    Listed {
        entries: usize,
    },
    /// the path could not be opened as a directory or archive
    OpenFailed {
        path: PathBuf,
        reason: String,
    },
    /// the container failed after `entries` lines were printed
    ReadFailed {
        entries: usize,
        reason: String,
    },
}

impl ListingOutcome {
    pub fn status(&self) -> ExitStatus {
        match self {
            ListingOutcome::Listed { .. } => ExitStatus::Success,
            ListingOutcome::ReadFailed { .. } => ExitStatus::IoError,
            ListingOutcome::OpenFailed { .. } => ExitStatus::NoInput,
        }
    }
}

/// list one path, writing table lines to `out` and diagnostics to `err`
///
/// Returns an error only when writing to `out` or `err` fails. The
/// container is released before this returns, on every path.
pub fn list_path<W: Write, E: Write>(
    path: &OsStr,
    show_header: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<ListingOutcome> {
    let label = Path::new(path);

    let container = match Container::open(label) {
        Ok(container) => container,
        Err(e) => {
            let reason = format!("{e:#}");
            writeln!(err, "did not open {}: {reason}", label.display())?;
            return Ok(ListingOutcome::OpenFailed {
                path: label.to_path_buf(),
                reason,
            });
        }
    };

    if container.path() != label {
        debug!(
            requested = %label.display(),
            resolved = %container.path().display(),
            "opened with archive suffix"
        );
    }

    list_container(container, label, show_header, out, err)
}

/// print the entries of an opened container, consuming the handle
///
/// `label` is the path as the user gave it, before any suffix resolution.
pub fn list_container<W: Write, E: Write>(
    mut container: Container,
    label: &Path,
    show_header: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<ListingOutcome> {
    let shown = label.display();

    if show_header {
        writeln!(out, "{shown}: ")?;
    }

    let kind = container.kind();
    let mut entries = 0;
    for entry in &mut container {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(path = %shown, kind, "listing stopped: {reason}");
                writeln!(err, "error reading {shown}: {reason}")?;
                return Ok(ListingOutcome::ReadFailed { entries, reason });
            }
        };

        let row = Row::new(entry.size, entry.stored_size, entry.method.name(), &entry.name);
        writeln!(out, "{row}")?;
        entries += 1;
    }

    container.close();
    Ok(ListingOutcome::Listed { entries })
}

/// list every path in order, folding the per-path outcomes into one status
///
/// A per-path header is printed only when more than one path is given.
/// Write failures end the run early with the status gathered so far.
pub fn list_paths<P, W, E>(paths: &[P], out: &mut W, err: &mut E) -> ExitStatus
where
    P: AsRef<OsStr>,
    W: Write,
    E: Write,
{
    let show_header = paths.len() > 1;
    let mut status = ExitStatus::Success;

    for path in paths {
        match list_path(path.as_ref(), show_header, out, err) {
            Ok(outcome) => status = status.max(outcome.status()),
            Err(e) => {
                warn!("output closed: {e}");
                break;
            }
        }
        if out.flush().is_err() {
            break;
        }
    }

    status
}
