//! Brotli engine on top of `brotli::CompressorWriter`.
//!
//! The writer compresses into a sink shared with the engine; after each
//! window the engine drains whatever the encoder produced into the caller's
//! output. `flush()` on the writer maps to `BROTLI_OPERATION_FLUSH` and
//! `into_inner()` to `BROTLI_OPERATION_FINISH`.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use ::brotli::enc::backward_references::BrotliEncoderMode;
use ::brotli::enc::BrotliEncoderParams;
use ::brotli::CompressorWriter;
use log::trace;

use crate::config::{EncoderMode, Parameters};
use crate::engine::CompressionEngine;
use crate::error::EngineFault;

/// Internal buffer size of the `CompressorWriter`.
const WRITER_BUFFER_SIZE: usize = 4096;

// ─────────────────────────────────────────────────────────────────────────────
// Output sink
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    fn drain_into(&self, out: &mut Vec<u8>) {
        out.append(&mut self.0.borrow_mut());
    }

    fn discard(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

enum EngineState {
    Open(Box<CompressorWriter<SharedSink>>),
    Finished,
    Closed,
}

/// Brotli [`CompressionEngine`].
///
/// Holds its encoder state through reference-counted cells, so it is not
/// `Send`: build one per thread.
pub struct BrotliEngine {
    state: EngineState,
    sink: SharedSink,
    max_chunk: usize,
}

impl BrotliEngine {
    fn encoder_params(params: &Parameters) -> BrotliEncoderParams {
        let mut enc = BrotliEncoderParams::default();
        enc.quality = params.quality as i32;
        enc.lgwin = params.lgwin as i32;
        enc.lgblock = params.effective_lgblock() as i32;
        enc.mode = match params.mode {
            EncoderMode::Generic => BrotliEncoderMode::BROTLI_MODE_GENERIC,
            EncoderMode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
            EncoderMode::Font => BrotliEncoderMode::BROTLI_MODE_FONT,
        };
        enc
    }

    fn writer(&mut self) -> Result<&mut CompressorWriter<SharedSink>, EngineFault> {
        match &mut self.state {
            EngineState::Open(writer) => Ok(writer),
            EngineState::Finished => Err(EngineFault::Finished),
            EngineState::Closed => Err(EngineFault::Closed),
        }
    }
}

impl CompressionEngine for BrotliEngine {
    fn open(params: &Parameters) -> Result<Self, EngineFault> {
        params.validate()?;
        let sink = SharedSink::default();
        let writer =
            CompressorWriter::with_params(sink.clone(), WRITER_BUFFER_SIZE, &Self::encoder_params(params));
        Ok(BrotliEngine {
            state: EngineState::Open(Box::new(writer)),
            sink,
            max_chunk: params.input_block_size(),
        })
    }

    fn max_input_chunk_size(&self) -> usize {
        self.max_chunk
    }

    fn compress(&mut self, window: &[u8], flush: bool, out: &mut Vec<u8>) -> Result<(), EngineFault> {
        let max = self.max_chunk;
        let writer = self.writer()?;
        if window.len() > max {
            return Err(EngineFault::WindowTooLarge {
                have: window.len(),
                max,
            });
        }
        let written = writer.write_all(window).and_then(|()| {
            if flush {
                writer.flush()
            } else {
                Ok(())
            }
        });
        if let Err(e) = written {
            self.sink.discard();
            return Err(EngineFault::Encoder(e));
        }
        let before = out.len();
        self.sink.drain_into(out);
        trace!(
            "brotli window: {} bytes in, {} bytes out, flush={flush}",
            window.len(),
            out.len() - before
        );
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), EngineFault> {
        self.writer()?;
        if let EngineState::Open(writer) = std::mem::replace(&mut self.state, EngineState::Finished) {
            drop((*writer).into_inner());
        }
        self.sink.drain_into(out);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping an open writer finalises the stream into the sink.
        self.state = EngineState::Closed;
        self.sink.discard();
    }

    fn is_closed(&self) -> bool {
        matches!(self.state, EngineState::Closed)
    }
}
