// Integration tests for stream::writer: the io::Write adapter.

use std::io::{self, Read, Write};

use brstream::{Parameters, StreamCompressor, StreamWriter, WindowPolicy};

fn decompress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, 4096)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn fast() -> Parameters {
    Parameters::default().with_quality(4).with_lgwin(18)
}

#[test]
fn io_copy_round_trips() {
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let mut w = StreamWriter::new(Vec::new(), &fast()).unwrap();

    io::copy(&mut &data[..], &mut w).unwrap();
    let compressed = w.finish().unwrap();

    assert!(compressed.len() < data.len());
    assert_eq!(decompress(&compressed), data);
}

#[test]
fn writes_larger_than_one_window_are_split() {
    let params = fast();
    let m = params.input_block_size();
    let data = vec![b'z'; m * 3 + 5];

    let mut w = StreamWriter::new(Vec::new(), &params).unwrap();
    w.write_all(&data).unwrap();
    assert!(w.stats().windows >= 4);
    assert_eq!(decompress(&w.finish().unwrap()), data);
}

#[test]
fn single_window_policy_does_not_truncate_writes() {
    let params = fast();
    let data = vec![b'q'; params.input_block_size() * 2];
    let mut w = StreamWriter::new(Vec::new(), &params)
        .unwrap()
        .with_policy(WindowPolicy::SingleWindow);

    assert_eq!(w.write(&data).unwrap(), data.len());
    assert_eq!(decompress(&w.finish().unwrap()), data);
}

#[test]
fn with_compressor_reuses_an_open_stream() {
    let mut compressor = StreamCompressor::new(&fast()).unwrap();
    let head = compressor.compress_slice(b"head-", false).unwrap();

    let mut sink = head.to_vec();
    let mut w = StreamWriter::with_compressor(&mut sink, compressor);
    w.write_all(b"tail").unwrap();
    w.finish().unwrap();

    assert_eq!(decompress(&sink), b"head-tail");
}

#[test]
fn stats_follow_written_bytes() {
    let mut w = StreamWriter::new(io::sink(), &fast()).unwrap();
    w.write_all(&[1u8; 1000]).unwrap();
    w.flush().unwrap();
    let stats = w.stats();
    assert_eq!(stats.bytes_in, 1000);
    assert!(stats.bytes_out > 0);
}
