// brstream: windowed streaming Brotli compression over buffer views

pub mod buffer;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod stream;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use buffer::{BufferView, Ownership};
pub use config::{EncoderMode, Parameters};
pub use engine::{BrotliEngine, CompressionEngine};
pub use error::{BufferFault, EngineFault, Result, StreamError};
pub use stream::{StreamCompressor, StreamStats, StreamWriter, WindowPolicy};
