//! Error taxonomy for the windowing compressor.
//!
//! Three families of failure reach the caller:
//!
//! - [`EngineFault`]: the compression engine refused or failed a request;
//! - [`StreamError::ClosedStream`]: the compressor was already closed;
//! - [`BufferFault`]: the caller handed over a malformed [`BufferView`]
//!   (or asked for an impossible allocation).
//!
//! A failed call never returns partially accumulated output.
//!
//! [`BufferView`]: crate::buffer::BufferView

use std::io;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StreamError {
    /// The engine reported a failure. The engine state is undefined afterwards
    /// and the compressor should be closed.
    #[error("engine fault: {0}")]
    Engine(#[from] EngineFault),

    /// Any operation other than `close` after the compressor was closed.
    #[error("stream compressor is closed")]
    ClosedStream,

    /// The supplied buffer view violates its cursor invariants.
    #[error("invalid buffer: {0}")]
    InvalidBuffer(#[from] BufferFault),
}

impl StreamError {
    /// `true` for [`StreamError::ClosedStream`].
    pub fn is_closed(&self) -> bool {
        matches!(self, StreamError::ClosedStream)
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match &err {
            StreamError::InvalidBuffer(_) => io::ErrorKind::InvalidInput,
            StreamError::ClosedStream => io::ErrorKind::BrokenPipe,
            StreamError::Engine(EngineFault::Encoder(e)) => e.kind(),
            StreamError::Engine(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

impl From<BufferFault> for io::Error {
    fn from(fault: BufferFault) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, fault)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine faults
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineFault {
    #[error("engine invoked after close")]
    Closed,

    #[error("engine invoked after the stream was finished")]
    Finished,

    #[error("window of {have} bytes exceeds the maximum input chunk of {max} bytes")]
    WindowTooLarge { have: usize, max: usize },

    #[error("parameter {name} = {value} is outside {min}..={max}")]
    InvalidParameter {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// The underlying encoder failed while producing output.
    #[error("encoder failure: {0}")]
    Encoder(#[source] io::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffer faults
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferFault {
    #[error("position {position} is past limit {limit}")]
    PositionPastLimit { position: usize, limit: usize },

    #[error("limit {limit} is past capacity {capacity}")]
    LimitPastCapacity { limit: usize, capacity: usize },

    #[error("range {offset}+{len} is outside backing storage of {backing} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        backing: usize,
    },

    #[error("view is backed by shared storage and cannot be written")]
    ReadOnly,

    #[error("write of {requested} bytes exceeds the {remaining} bytes remaining")]
    Overflow { requested: usize, remaining: usize },

    #[error("allocation of {0} bytes exceeds isize::MAX")]
    AllocationTooLarge(usize),
}
