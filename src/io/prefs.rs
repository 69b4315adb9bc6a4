//! Preferences for file-level compression.

use crate::config::Parameters;
use crate::stream::WindowPolicy;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Bytes read from the source per `compress_next_buffer` call.
pub const READ_CHUNK_DEFAULT: usize = 4 * MB;

/// Default suffix of compressed files.
pub const BROTLI_EXTENSION: &str = ".br";

/// Options that apply to a whole file operation.
#[derive(Debug, Clone)]
pub struct IoPrefs {
    /// Replace an existing destination file.
    pub overwrite: bool,
    /// Delete the source after it was compressed successfully.
    pub remove_src_file: bool,
    /// Emit a Brotli flush after every read chunk.
    pub flush_each_chunk: bool,
    pub read_chunk: usize,
    pub params: Parameters,
    pub policy: WindowPolicy,
}

impl Default for IoPrefs {
    fn default() -> Self {
        IoPrefs {
            overwrite: false,
            remove_src_file: false,
            flush_each_chunk: false,
            read_chunk: READ_CHUNK_DEFAULT,
            params: Parameters::default(),
            policy: WindowPolicy::DrainAll,
        }
    }
}

impl IoPrefs {
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Clamped to at least 1 KiB.
    pub fn with_read_chunk(mut self, bytes: usize) -> Self {
        self.read_chunk = bytes.max(KB);
        self
    }
}
