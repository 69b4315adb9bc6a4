//! Source and destination resolution for file compression.
//!
//! - [`open_src_file`] resolves a path string to a `Box<dyn Read>`, handling
//!   the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] resolves a path string to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::io::prefs::IoPrefs;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

pub const STDIN_MARK: &str = "stdin";
pub const STDOUT_MARK: &str = "stdout";

#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Open `path` for reading; `"stdin"` reads standard input.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if path == STDIN_MARK {
        debug!("using stdin for input");
        return Ok(Box::new(io::stdin()));
    }

    if Path::new(path).is_dir() {
        warn!("{path} is a directory -- ignored");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory"),
        ));
    }

    let f = File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Open `path` for writing.
///
/// `"stdout"` writes to standard output and [`NUL_MARK`] discards everything.
/// An existing regular file is only replaced when `prefs.overwrite` is set;
/// otherwise the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, prefs: &IoPrefs) -> io::Result<DstFile> {
    if path == STDOUT_MARK {
        debug!("using stdout for output");
        return Ok(DstFile {
            inner: Box::new(io::stdout().lock()),
            is_stdout: true,
        });
    }

    if path == NUL_MARK {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path}: already exists; not overwritten"),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))?;

    Ok(DstFile {
        inner: Box::new(io::BufWriter::new(f)),
        is_stdout: false,
    })
}
