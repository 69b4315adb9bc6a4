//! Windowing stream compressor.
//!
//! [`StreamCompressor`] turns an engine that only accepts inputs of at most
//! `M` bytes into a streaming interface over arbitrary [`BufferView`]s:
//!
//! 1. the input's readable region is cut into windows of at most `M` bytes;
//! 2. every window but the last is fed with `flush = false`, the last one with
//!    the caller's flush flag (an empty region still yields one empty call);
//! 3. the engine output is copied into one freshly allocated, exactly sized
//!    output view;
//! 4. the input position is advanced past the consumed windows.
//!
//! [`WindowPolicy`] bounds how many windows one call consumes.
//!
//! A failed call returns no output and leaves the input position where it was.
//! An engine fault also closes the compressor: later calls fail with
//! [`StreamError::ClosedStream`].

use std::fmt;

use log::{debug, trace, warn};

use crate::buffer::{alloc, BufferView, WindowFeeder};
use crate::config::Parameters;
use crate::engine::{BrotliEngine, CompressionEngine};
use crate::error::{Result, StreamError};

/// How many windows one [`StreamCompressor::compress_next_buffer`] call may
/// consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// Consume at most one window per call: an input of `2.5 * M` advances to
    /// `M`, `2M`, then `2.5M`. The flush flag applies to that window only.
    #[default]
    SingleWindow,
    /// Consume every readable byte, including a final partial window.
    DrainAll,
}

impl WindowPolicy {
    fn budget(self) -> Option<usize> {
        match self {
            WindowPolicy::DrainAll => None,
            WindowPolicy::SingleWindow => Some(1),
        }
    }
}

/// Cumulative counters of one compressor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Uncompressed bytes consumed from inputs.
    pub bytes_in: u64,
    /// Compressed bytes handed back in output views.
    pub bytes_out: u64,
    /// Engine invocations, empty windows included.
    pub windows: u64,
    /// Successful compress / finish calls.
    pub calls: u64,
}

/// Streaming compressor over buffer views. Owns exactly one engine.
///
/// Dropping the compressor closes the engine.
pub struct StreamCompressor<E: CompressionEngine = BrotliEngine> {
    engine: Option<E>,
    policy: WindowPolicy,
    stats: StreamStats,
}

impl StreamCompressor<BrotliEngine> {
    /// Open a Brotli-backed compressor.
    pub fn new(params: &Parameters) -> Result<Self> {
        Self::open(params)
    }
}

impl<E: CompressionEngine> StreamCompressor<E> {
    pub fn open(params: &Parameters) -> Result<Self> {
        let engine = E::open(params)?;
        debug!(
            "stream opened: quality={} lgwin={} mode={} max_chunk={}",
            params.quality,
            params.lgwin,
            params.mode.name(),
            engine.max_input_chunk_size()
        );
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: E) -> Self {
        StreamCompressor {
            engine: Some(engine),
            policy: WindowPolicy::default(),
            stats: StreamStats::default(),
        }
    }

    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: WindowPolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn is_closed(&self) -> bool {
        self.engine.is_none()
    }

    /// The engine's maximum window size `M`.
    pub fn max_input_chunk_size(&self) -> Result<usize> {
        Ok(self.engine()?.max_input_chunk_size())
    }

    /// Compress the readable bytes of `input`, as many windows as the policy
    /// allows, and return a fresh output view.
    ///
    /// On success `input.position()` has advanced past every consumed byte;
    /// its limit and capacity never change. With `flush == false` the output
    /// may be empty (capacity 0) while the engine accumulates a block.
    pub fn compress_next_buffer(&mut self, input: &mut BufferView, flush: bool) -> Result<BufferView> {
        let budget = self.policy.budget();
        let engine = self.engine.as_mut().ok_or(StreamError::ClosedStream)?;
        input.validate()?;

        let max_chunk = engine.max_input_chunk_size();
        let mut feeder = WindowFeeder::new(input, max_chunk);
        if let Some(windows) = budget {
            feeder = feeder.with_budget(windows);
        }
        let mut out = Vec::new();
        let pass = match feed_windows(engine, input.as_bytes(), feeder, flush, &mut out) {
            Ok(pass) => pass,
            Err(err) => return Err(self.fault(err)),
        };
        let output = alloc::allocate_from(&out)?;

        input.advance(pass.consumed);
        self.record(&pass, output.capacity());
        debug!(
            "compress_next_buffer: consumed {} bytes in {} windows, flush={flush}, produced {} bytes, position {}/{}",
            pass.consumed,
            pass.windows,
            output.capacity(),
            input.position(),
            input.limit()
        );
        Ok(output)
    }

    /// Compress all of `data`, whatever the window policy.
    pub fn compress_slice(&mut self, data: &[u8], flush: bool) -> Result<BufferView> {
        let engine = self.engine.as_mut().ok_or(StreamError::ClosedStream)?;
        let feeder = WindowFeeder::over(0, data.len(), engine.max_input_chunk_size());
        let mut out = Vec::new();
        let pass = match feed_windows(engine, data, feeder, flush, &mut out) {
            Ok(pass) => pass,
            Err(err) => return Err(self.fault(err)),
        };
        let output = alloc::allocate_from(&out)?;
        self.record(&pass, output.capacity());
        trace!("compress_slice: {} bytes in, {} bytes out", pass.consumed, output.capacity());
        Ok(output)
    }

    /// Compress every readable byte of `input`, then end the stream.
    ///
    /// The output carries the end-of-stream marker; afterwards the compressor
    /// only accepts [`close`](Self::close).
    pub fn finish(&mut self, input: &mut BufferView) -> Result<BufferView> {
        let engine = self.engine.as_mut().ok_or(StreamError::ClosedStream)?;
        input.validate()?;

        let feeder = WindowFeeder::new(input, engine.max_input_chunk_size());
        let mut out = Vec::new();
        let fed = if feeder.len() == 0 {
            Ok(Pass::default())
        } else {
            feed_windows(engine, input.as_bytes(), feeder, false, &mut out)
        };
        let pass = match fed.and_then(|pass| engine.finish(&mut out).map(|()| pass).map_err(StreamError::from)) {
            Ok(pass) => pass,
            Err(err) => return Err(self.fault(err)),
        };
        let output = alloc::allocate_from(&out)?;

        input.advance(pass.consumed);
        self.record(&pass, output.capacity());
        debug!(
            "stream finished: {} bytes in, {} bytes out",
            self.stats.bytes_in, self.stats.bytes_out
        );
        Ok(output)
    }

    /// Release the engine. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.close();
            debug!("stream closed after {} calls", self.stats.calls);
        }
    }

    /// Engine state is undefined after a fault; release it.
    fn fault(&mut self, err: StreamError) -> StreamError {
        warn!("closing stream after engine fault: {err}");
        self.close();
        err
    }

    fn engine(&self) -> Result<&E> {
        self.engine.as_ref().ok_or(StreamError::ClosedStream)
    }

    fn record(&mut self, pass: &Pass, produced: usize) {
        self.stats.bytes_in += pass.consumed as u64;
        self.stats.bytes_out += produced as u64;
        self.stats.windows += pass.windows as u64;
        self.stats.calls += 1;
    }
}

impl<E: CompressionEngine> Drop for StreamCompressor<E> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<E: CompressionEngine> fmt::Debug for StreamCompressor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCompressor")
            .field("closed", &self.is_closed())
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window loop
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Pass {
    consumed: usize,
    windows: usize,
}

/// Feed every window of `feeder` (offsets into `data`) to the engine. Only the
/// last window carries `flush`; an empty feeder produces one empty call.
fn feed_windows<E: CompressionEngine>(
    engine: &mut E,
    data: &[u8],
    feeder: WindowFeeder,
    flush: bool,
    out: &mut Vec<u8>,
) -> Result<Pass> {
    let count = feeder.len();
    if count == 0 {
        engine.compress(&[], flush, out)?;
        return Ok(Pass {
            consumed: 0,
            windows: 1,
        });
    }
    let mut pass = Pass::default();
    for (i, spec) in feeder.enumerate() {
        let last = i + 1 == count;
        engine.compress(&data[spec.start..spec.end()], flush && last, out)?;
        trace!("window {}..{} fed, flush={}", spec.start, spec.end(), flush && last);
        pass.consumed += spec.len;
        pass.windows += 1;
    }
    Ok(pass)
}
