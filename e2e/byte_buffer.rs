// e2e/byte_buffer.rs: cursor behaviour of StreamCompressor over owned,
// shared and sliced buffer views.
//
// Every flushed output is compared byte for byte with a reference encoder
// (a fresh brotli::CompressorWriter with the same quality / window, fed the
// same bytes and flushed once).

use std::io::Write;

use brstream::{BufferView, Ownership, Parameters, StreamCompressor, WindowPolicy};
use bytes::Bytes;

const A_BYTES: &[u8] = b"AAAAAAAAAA";

fn params() -> Parameters {
    Parameters::default()
}

fn compressor() -> StreamCompressor {
    StreamCompressor::new(&params()).unwrap()
}

/// Output of a reference encoder after a single flush of `data`.
fn reference_flush(data: &[u8]) -> Vec<u8> {
    let p = params();
    let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, p.quality, p.lgwin);
    writer.write_all(data).unwrap();
    writer.flush().unwrap();
    writer.get_ref().clone()
}

fn filled(len: usize, byte: u8) -> Vec<u8> {
    vec![byte; len]
}

/// 100 bytes of 'x' with A_BYTES written at offset 23.
fn x_block_with_a_at_23() -> Vec<u8> {
    let mut data = filled(100, b'x');
    data[23..23 + A_BYTES.len()].copy_from_slice(A_BYTES);
    data
}

// ── Windowing ────────────────────────────────────────────────────────────────

#[test]
fn compress_sets_position_to_the_next_window_until_it_hits_limit() {
    let fast = Parameters::default().with_quality(5);
    let mut compressor = StreamCompressor::new(&fast).unwrap();
    let m = compressor.max_input_chunk_size().unwrap();
    let large = m * 5 / 2;

    let mut input = BufferView::from_vec(filled(large, b'x'));

    for expected in [m, 2 * m, large] {
        compressor.compress_next_buffer(&mut input, false).unwrap();
        assert_eq!(input.position(), expected);
        assert_eq!(input.limit(), large);
        assert_eq!(input.capacity(), large);
    }
}

#[test]
fn drain_all_consumes_every_full_window_in_one_call() {
    let fast = Parameters::default().with_quality(5);
    let mut compressor = StreamCompressor::new(&fast)
        .unwrap()
        .with_policy(WindowPolicy::DrainAll);
    let m = compressor.max_input_chunk_size().unwrap();

    let mut input = BufferView::from_vec(filled(3 * m, b'y'));
    compressor.compress_next_buffer(&mut input, false).unwrap();

    assert_eq!(input.position(), 3 * m);
    assert_eq!(compressor.stats().windows, 3);
}

// ── Owned views ──────────────────────────────────────────────────────────────

#[test]
fn compress_owned_view_with_flushing() {
    let mut input = BufferView::allocate(A_BYTES.len());
    input.put(A_BYTES).unwrap();
    input.set_position(0).unwrap();

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();

    let expected = reference_flush(A_BYTES);
    assert_eq!(out.capacity(), expected.len());
    assert_eq!(out.remaining_bytes(), &expected[..]);
    assert_eq!(input.position(), input.limit());
}

#[test]
fn compress_owned_view_without_flushing() {
    let mut compressor = compressor();
    let mut input = BufferView::allocate(A_BYTES.len());
    input.put(A_BYTES).unwrap();
    input.set_position(0).unwrap();

    let out = compressor.compress_next_buffer(&mut input, false).unwrap();
    assert_eq!(out.capacity(), 0);

    let out = compressor
        .compress_next_buffer(&mut BufferView::allocate(0), true)
        .unwrap();
    let expected = reference_flush(A_BYTES);
    assert_eq!(out.capacity(), expected.len());
    assert_eq!(out.remaining_bytes(), &expected[..]);
}

#[test]
fn compress_owned_view_using_position_and_limit() {
    let mut input = BufferView::allocate(100);
    input.put(&filled(100, b'x')).unwrap();
    input.set_position(23).unwrap();
    input.put(A_BYTES).unwrap();
    input.set_position(23).unwrap();
    input.set_limit(23 + A_BYTES.len()).unwrap();

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();

    let expected = reference_flush(A_BYTES);
    assert_eq!(out.capacity(), expected.len());
    assert_eq!(out.limit(), expected.len());
    assert_eq!(out.position(), 0);
    assert_eq!(out.remaining_bytes(), &expected[..]);
    assert_eq!(input.position(), 23 + A_BYTES.len());
    assert_eq!(input.capacity(), 100);
}

// ── Shared (wrapped) views ───────────────────────────────────────────────────

#[test]
fn compress_shared_view_with_flushing() {
    let mut input = BufferView::wrap_static(A_BYTES);
    assert_eq!(input.ownership(), Ownership::Shared);

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();

    assert_eq!(out.remaining_bytes(), &reference_flush(A_BYTES)[..]);
    assert_eq!(out.ownership(), Ownership::Owned);
}

#[test]
fn compress_shared_view_without_flushing() {
    let mut compressor = compressor();
    let mut input = BufferView::wrap_static(A_BYTES);

    let out = compressor.compress_next_buffer(&mut input, false).unwrap();
    assert_eq!(out.capacity(), 0);

    let out = compressor
        .compress_next_buffer(&mut BufferView::wrap(Bytes::new()), true)
        .unwrap();
    assert_eq!(out.remaining_bytes(), &reference_flush(A_BYTES)[..]);
}

#[test]
fn compress_shared_view_using_position_and_limit() {
    let mut input = BufferView::wrap(Bytes::from(x_block_with_a_at_23()));
    input.set_position(23).unwrap();
    input.set_limit(23 + A_BYTES.len()).unwrap();

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();

    let expected = reference_flush(A_BYTES);
    assert_eq!(out.capacity(), expected.len());
    assert_eq!(out.limit(), expected.len());
    assert_eq!(out.position(), 0);
    assert_eq!(out.remaining_bytes(), &expected[..]);
}

#[test]
fn compress_sliced_view_with_base_offset() {
    let mut backing = BufferView::wrap(Bytes::from(x_block_with_a_at_23()));
    backing.set_position(23).unwrap();
    let mut input = backing.slice();
    input.set_limit(A_BYTES.len()).unwrap();
    assert_eq!(input.offset(), 23);
    assert_eq!(input.position(), 0);

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();

    let expected = reference_flush(A_BYTES);
    assert_eq!(out.capacity(), expected.len());
    assert_eq!(out.position(), 0);
    assert_eq!(out.remaining_bytes(), &expected[..]);
    assert_eq!(input.position(), A_BYTES.len());
    // The parent view's cursor is independent of the slice.
    assert_eq!(backing.position(), 23);
}

#[test]
fn slicing_an_owned_view_shares_its_storage() {
    let mut owned = BufferView::from_vec(x_block_with_a_at_23());
    owned.set_position(23).unwrap();
    let mut input = owned.slice();
    input.set_limit(A_BYTES.len()).unwrap();
    assert_eq!(owned.ownership(), Ownership::Shared);
    assert_eq!(input.ownership(), Ownership::Shared);

    let out = compressor().compress_next_buffer(&mut input, true).unwrap();
    assert_eq!(out.remaining_bytes(), &reference_flush(A_BYTES)[..]);
}
