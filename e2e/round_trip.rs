// e2e/round_trip.rs: compressed output decodes back to the input.
//
// Streams are finished and decoded with brotli::Decompressor. Covers
// multi-window inputs, flush-split equivalence, arbitrary call splits,
// output independence from input storage and closed-stream behaviour.

use std::io::Read;

use brstream::{BufferView, Parameters, StreamCompressor, StreamError, WindowPolicy};

fn decompress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, 4096)
        .read_to_end(&mut out)
        .expect("compressed stream must decode");
    out
}

fn fast() -> Parameters {
    Parameters::default().with_quality(5)
}

/// Deterministic, moderately compressible data.
fn sample(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if i % 7 == 0 {
                (state >> 24) as u8
            } else {
                b"streaming brotli "[i % 17]
            }
        })
        .collect()
}

#[test]
fn multi_window_input_round_trips() {
    let mut compressor = StreamCompressor::new(&fast())
        .unwrap()
        .with_policy(WindowPolicy::DrainAll);
    let m = compressor.max_input_chunk_size().unwrap();
    let data = sample(m * 3 + 1234);

    let mut stream = Vec::new();
    let mut input = BufferView::from_vec(data.clone());
    stream.extend_from_slice(compressor.compress_next_buffer(&mut input, false).unwrap().remaining_bytes());
    stream.extend_from_slice(compressor.finish(&mut BufferView::allocate(0)).unwrap().remaining_bytes());

    assert_eq!(decompress(&stream), data);
    assert_eq!(compressor.stats().bytes_in, data.len() as u64);
    assert_eq!(compressor.stats().bytes_out, stream.len() as u64);
}

#[test]
fn finish_drains_remaining_input() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    let data = sample(10_000);
    let mut input = BufferView::from_vec(data.clone());

    let out = compressor.finish(&mut input).unwrap();

    assert_eq!(input.position(), data.len());
    assert_eq!(decompress(out.remaining_bytes()), data);
}

#[test]
fn flush_split_matches_single_flushed_call() {
    let data = sample(5000);

    let mut split = StreamCompressor::new(&fast()).unwrap();
    let mut first = split
        .compress_next_buffer(&mut BufferView::from_vec(data.clone()), false)
        .unwrap()
        .to_vec();
    first.extend_from_slice(
        split
            .compress_next_buffer(&mut BufferView::allocate(0), true)
            .unwrap()
            .remaining_bytes(),
    );

    let mut single = StreamCompressor::new(&fast()).unwrap();
    let once = single
        .compress_next_buffer(&mut BufferView::from_vec(data), true)
        .unwrap();

    assert_eq!(first, once.to_vec());
}

#[test]
fn every_flush_yields_a_decodable_prefix() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    let mut stream = Vec::new();
    let mut expected = Vec::new();

    for part in [&b"alpha "[..], b"beta ", b"gamma"] {
        expected.extend_from_slice(part);
        let out = compressor.compress_slice(part, true).unwrap();
        stream.extend_from_slice(out.remaining_bytes());

        // A flushed prefix decodes without an end-of-stream marker.
        let mut partial = Vec::new();
        let mut reader = brotli::Decompressor::new(&stream[..], 4096);
        let mut buf = [0u8; 64];
        while partial.len() < expected.len() {
            let n = reader.read(&mut buf).unwrap();
            assert!(n > 0, "flushed prefix ended early");
            partial.extend_from_slice(&buf[..n]);
        }
        assert_eq!(partial, expected);
    }
}

#[test]
fn default_policy_round_trips_one_window_per_call() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    assert_eq!(compressor.policy(), WindowPolicy::SingleWindow);
    let m = compressor.max_input_chunk_size().unwrap();
    let data = sample(m * 2 + 77);
    let mut input = BufferView::from_vec(data.clone());

    let mut stream = Vec::new();
    let mut calls = 0;
    while input.has_remaining() {
        stream.extend_from_slice(compressor.compress_next_buffer(&mut input, false).unwrap().remaining_bytes());
        calls += 1;
    }
    stream.extend_from_slice(compressor.finish(&mut input).unwrap().remaining_bytes());

    assert_eq!(calls, 3);
    assert_eq!(decompress(&stream), data);
}

#[test]
fn output_never_aliases_input_storage() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    let mut input = BufferView::from_vec(sample(4096));
    let base = input.as_ptr() as usize;
    let end = base + input.capacity();

    let out = compressor.compress_next_buffer(&mut input, true).unwrap();
    let p = out.as_ptr() as usize;

    assert!(out.capacity() > 0);
    assert!(p + out.capacity() <= base || p >= end);
}

#[test]
fn higher_quality_and_text_mode_round_trip() {
    let params = Parameters::default()
        .with_quality(9)
        .with_lgwin(18)
        .with_mode(brstream::EncoderMode::Text);
    let mut compressor = StreamCompressor::new(&params).unwrap();
    assert_eq!(compressor.max_input_chunk_size().unwrap(), 1 << 18);

    let text = "The quick brown fox jumps over the lazy dog. ".repeat(2000);
    let out = compressor
        .finish(&mut BufferView::copy_from_slice(text.as_bytes()))
        .unwrap();
    assert_eq!(decompress(out.remaining_bytes()), text.as_bytes());
}

#[test]
fn closed_compressor_fails_every_operation() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    compressor.close();
    compressor.close();

    let mut input = BufferView::copy_from_slice(b"data");
    assert!(matches!(
        compressor.compress_next_buffer(&mut input, true),
        Err(StreamError::ClosedStream)
    ));
    assert!(matches!(compressor.finish(&mut input), Err(StreamError::ClosedStream)));
    assert!(matches!(compressor.max_input_chunk_size(), Err(StreamError::ClosedStream)));
    assert_eq!(input.position(), 0);
}

#[test]
fn compress_after_finish_is_an_engine_fault() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    compressor.finish(&mut BufferView::allocate(0)).unwrap();

    let mut input = BufferView::copy_from_slice(b"late");
    let err = compressor.compress_next_buffer(&mut input, true).unwrap_err();
    assert!(matches!(err, StreamError::Engine(brstream::EngineFault::Finished)));
    assert_eq!(input.position(), 0);

    // The fault released the engine.
    assert!(compressor.is_closed());
    assert!(compressor.compress_next_buffer(&mut input, true).unwrap_err().is_closed());
}

#[test]
fn compressors_on_separate_threads_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let data = sample(20_000 + i * 1000);
                let mut compressor = StreamCompressor::new(&fast()).unwrap();
                let out = compressor.finish(&mut BufferView::from_vec(data.clone())).unwrap();
                (data, out.to_vec())
            })
        })
        .collect();
    for handle in handles {
        let (data, stream) = handle.join().unwrap();
        assert_eq!(decompress(&stream), data);
    }
}
