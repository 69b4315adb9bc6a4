//! Streaming compression over buffer views.

pub mod compressor;
pub mod writer;

pub use compressor::{StreamCompressor, StreamStats, WindowPolicy};
pub use writer::StreamWriter;
