//! File compression through the windowing compressor.
//!
//! The source is read in chunks of `prefs.read_chunk` bytes into one reusable
//! owned [`BufferView`]; each chunk is drained through
//! [`StreamCompressor::compress_next_buffer`] and every output view is written
//! straight to the destination. At end of input the stream is finished, so
//! the destination holds one complete Brotli stream.

use std::fs;
use std::io::{self, Read, Write};
use std::time::Instant;

use log::{debug, error, info};

use crate::buffer::BufferView;
use crate::io::file_io::{open_dst_file, open_src_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{IoPrefs, BROTLI_EXTENSION};
use crate::stream::StreamCompressor;

/// Statistics of one successful compression run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl CompressStats {
    /// Compressed size as a percentage of the input; 0 for empty input.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 * 100.0 / self.bytes_in as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Chunked reading
// ---------------------------------------------------------------------------

/// Fill `buf` from `reader` until it is full or EOF; returns the byte count.
fn read_to_capacity(reader: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

// ---------------------------------------------------------------------------
// Stream-level compression
// ---------------------------------------------------------------------------

/// Compress everything `reader` yields into `writer`.
pub fn compress_stream(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    prefs: &IoPrefs,
) -> io::Result<CompressStats> {
    let mut compressor = StreamCompressor::new(&prefs.params)?.with_policy(prefs.policy);
    let mut chunk = BufferView::allocate(prefs.read_chunk);
    let mut stats = CompressStats::default();

    loop {
        chunk.clear();
        let n = read_to_capacity(reader, chunk.as_bytes_mut()?)?;
        if n == 0 {
            break;
        }
        chunk.set_limit(n)?;
        stats.bytes_in += n as u64;

        // A single-window policy needs several calls per chunk.
        while chunk.has_remaining() {
            let out = compressor.compress_next_buffer(&mut chunk, prefs.flush_each_chunk)?;
            writer.write_all(out.remaining_bytes())?;
            stats.bytes_out += out.remaining() as u64;
        }
        debug!("chunk of {n} bytes compressed, {} bytes out so far", stats.bytes_out);
    }

    let tail = compressor.finish(&mut BufferView::allocate(0))?;
    writer.write_all(tail.remaining_bytes())?;
    writer.flush()?;
    stats.bytes_out += tail.remaining() as u64;
    compressor.close();
    Ok(stats)
}

// ---------------------------------------------------------------------------
// File-level compression
// ---------------------------------------------------------------------------

/// Compress `src` into `dst`. Either may be a sentinel (`"stdin"`,
/// `"stdout"`, the null device).
pub fn compress_filename(src: &str, dst: &str, prefs: &IoPrefs) -> io::Result<CompressStats> {
    let start = Instant::now();
    let mut reader = open_src_file(src)?;
    let mut writer = open_dst_file(dst, prefs)?;

    let result = compress_stream(&mut reader, &mut writer, prefs);
    drop(writer);
    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            if dst != STDOUT_MARK && dst != NUL_MARK && src != dst {
                let _ = fs::remove_file(dst);
            }
            return Err(e);
        }
    };

    info!(
        "{src}: {} -> {} bytes ({:.2}%) in {:.2?}",
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio_percent(),
        start.elapsed()
    );

    if prefs.remove_src_file && src != STDIN_MARK && dst != STDOUT_MARK {
        fs::remove_file(src)?;
    }
    Ok(stats)
}

/// `src` with the Brotli extension appended.
pub fn default_dst_name(src: &str) -> String {
    format!("{src}{BROTLI_EXTENSION}")
}

/// Compress every file in `srcs` to `<src><suffix>` (or all to stdout when
/// `suffix` is `"stdout"`). Returns the number of files that failed.
pub fn compress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &IoPrefs) -> usize {
    let mut missed = 0;
    for &src in srcs {
        let dst = if suffix == STDOUT_MARK {
            STDOUT_MARK.to_owned()
        } else {
            format!("{src}{suffix}")
        };
        if let Err(e) = compress_filename(src, &dst, prefs) {
            error!("{src}: {e}");
            missed += 1;
        }
    }
    missed
}
