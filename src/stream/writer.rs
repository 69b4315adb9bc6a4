//! `std::io::Write` adapter over [`StreamCompressor`].

use std::io::{self, Write};

use crate::buffer::BufferView;
use crate::config::Parameters;
use crate::engine::{BrotliEngine, CompressionEngine};
use crate::stream::compressor::{StreamCompressor, StreamStats, WindowPolicy};

/// Compresses everything written to it into `inner`.
///
/// `flush()` forces a Brotli flush so the bytes written so far decode on the
/// other side. Call [`finish`](StreamWriter::finish) to terminate the stream;
/// dropping an unfinished writer finishes it on a best-effort basis.
pub struct StreamWriter<W: Write, E: CompressionEngine = BrotliEngine> {
    inner: Option<W>,
    compressor: StreamCompressor<E>,
}

impl<W: Write> StreamWriter<W, BrotliEngine> {
    pub fn new(inner: W, params: &Parameters) -> io::Result<Self> {
        Ok(Self::with_compressor(inner, StreamCompressor::new(params)?))
    }
}

impl<W: Write, E: CompressionEngine> StreamWriter<W, E> {
    pub fn with_compressor(inner: W, compressor: StreamCompressor<E>) -> Self {
        StreamWriter {
            inner: Some(inner),
            compressor,
        }
    }

    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.compressor.set_policy(policy);
        self
    }

    pub fn stats(&self) -> StreamStats {
        self.compressor.stats()
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// End the stream and hand back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.finish_stream()?;
        self.inner
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "writer already finished"))
    }

    fn finish_stream(&mut self) -> io::Result<()> {
        let tail = self.compressor.finish(&mut BufferView::allocate(0))?;
        let inner = self.inner_mut()?;
        inner.write_all(tail.remaining_bytes())?;
        inner.flush()?;
        self.compressor.close();
        Ok(())
    }

    fn inner_mut(&mut self) -> io::Result<&mut W> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "writer already finished"))
    }
}

impl<W: Write, E: CompressionEngine> Write for StreamWriter<W, E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let out = self.compressor.compress_slice(buf, false)?;
        self.inner_mut()?.write_all(out.remaining_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let out = self.compressor.compress_slice(&[], true)?;
        let inner = self.inner_mut()?;
        inner.write_all(out.remaining_bytes())?;
        inner.flush()
    }
}

impl<W: Write, E: CompressionEngine> Drop for StreamWriter<W, E> {
    fn drop(&mut self) {
        if self.inner.is_some() && !self.compressor.is_closed() {
            let _ = self.finish_stream();
        }
    }
}
