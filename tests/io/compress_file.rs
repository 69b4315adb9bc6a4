// Integration tests for io::compress_file: chunked stream compression and the
// file-level wrappers.

use std::io::{Cursor, Read};

use brstream::io::{
    compress_filename, compress_multiple_filenames, compress_stream, default_dst_name, IoPrefs,
};
use brstream::{Parameters, WindowPolicy};
use tempfile::TempDir;

fn decompress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, 4096)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn prefs() -> IoPrefs {
    IoPrefs::default().with_params(Parameters::default().with_quality(5).with_lgwin(18))
}

fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

#[test]
fn stream_with_small_read_chunks() {
    let data = text(300_000);
    let prefs = prefs().with_read_chunk(7_000);
    let mut out = Vec::new();

    let stats = compress_stream(&mut Cursor::new(&data), &mut out, &prefs).unwrap();

    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, out.len() as u64);
    assert!(stats.ratio_percent() < 10.0);
    assert_eq!(decompress(&out), data);
}

#[test]
fn stream_single_window_with_flush_each_chunk() {
    let data = text(200_000);
    let mut prefs = prefs()
        .with_policy(WindowPolicy::SingleWindow)
        .with_read_chunk(150_000);
    prefs.flush_each_chunk = true;
    let mut out = Vec::new();

    compress_stream(&mut Cursor::new(&data), &mut out, &prefs).unwrap();

    assert_eq!(decompress(&out), data);
}

#[test]
fn empty_stream_is_a_valid_brotli_stream() {
    let mut out = Vec::new();
    let stats = compress_stream(&mut Cursor::new(Vec::new()), &mut out, &prefs()).unwrap();
    assert_eq!(stats.bytes_in, 0);
    assert_eq!(stats.ratio_percent(), 0.0);
    assert!(!out.is_empty());
    assert!(decompress(&out).is_empty());
}

#[test]
fn invalid_parameters_fail_before_reading() {
    let bad = IoPrefs::default().with_params(Parameters::default().with_quality(42));
    let mut out = Vec::new();
    let err = compress_stream(&mut Cursor::new(text(10)), &mut out, &bad).unwrap_err();
    assert!(out.is_empty());
    assert!(err.to_string().contains("quality"));
}

#[test]
fn filename_round_trip_with_default_name() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("doc.txt");
    let data = text(50_000);
    std::fs::write(&src, &data).unwrap();
    let src = src.to_str().unwrap();
    let dst = default_dst_name(src);

    compress_filename(src, &dst, &prefs()).unwrap();

    assert!(dst.ends_with("doc.txt.br"));
    assert_eq!(decompress(&std::fs::read(&dst).unwrap()), data);
}

#[test]
fn multiple_filenames_counts_failures() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.txt");
    std::fs::write(&good, text(1000)).unwrap();
    let missing = dir.path().join("missing.txt");

    let failed = compress_multiple_filenames(
        &[good.to_str().unwrap(), missing.to_str().unwrap()],
        ".brz",
        &prefs(),
    );

    assert_eq!(failed, 1);
    assert!(dir.path().join("good.txt.brz").exists());
    assert!(!dir.path().join("missing.txt.brz").exists());
}
