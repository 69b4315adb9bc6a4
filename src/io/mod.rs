//! File and stdio compression on top of [`StreamCompressor`].
//!
//! [`StreamCompressor`]: crate::stream::StreamCompressor

pub mod compress_file;
pub mod file_io;
pub mod prefs;

pub use compress_file::{
    compress_filename, compress_multiple_filenames, compress_stream, default_dst_name,
    CompressStats,
};
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
pub use prefs::{IoPrefs, BROTLI_EXTENSION};
