//! Compression engine adapter.
//!
//! The windowing compressor is generic over [`CompressionEngine`]; the crate
//! ships one implementation, [`BrotliEngine`], backed by the `brotli` crate.

pub mod encoder;

pub use self::encoder::BrotliEngine;

use crate::config::Parameters;
use crate::error::EngineFault;

/// A stateful compressor that accepts input in windows of at most
/// [`max_input_chunk_size`](CompressionEngine::max_input_chunk_size) bytes.
///
/// Compressed bytes are appended to a caller-supplied `Vec`. An engine always
/// consumes the whole window it is handed; with `flush == false` it may buffer
/// input internally and append nothing.
pub trait CompressionEngine {
    /// Validate `params` and create fresh engine state.
    fn open(params: &Parameters) -> Result<Self, EngineFault>
    where
        Self: Sized;

    /// Largest window accepted by [`compress`](CompressionEngine::compress).
    fn max_input_chunk_size(&self) -> usize;

    /// Feed one window. With `flush` set, every byte buffered so far is
    /// emitted, so the concatenated output decodes up to this point.
    fn compress(&mut self, window: &[u8], flush: bool, out: &mut Vec<u8>)
        -> Result<(), EngineFault>;

    /// Emit the end-of-stream marker. Further `compress`/`finish` calls fail
    /// with [`EngineFault::Finished`].
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), EngineFault>;

    /// Release engine state. Idempotent.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
