//! E2E: file API
//!
//! Exercises `io::compress_filename`, `io::compress_multiple_filenames` and
//! `StreamWriter` against real files in a temporary directory, decoding every
//! result with `brotli::Decompressor`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use brstream::io::{compress_filename, compress_multiple_filenames, IoPrefs, NUL_MARK};
use brstream::{Parameters, StreamWriter, WindowPolicy};
use tempfile::TempDir;

fn decompress_file(path: &Path) -> Vec<u8> {
    let compressed = fs::read(path).unwrap();
    let mut out = Vec::new();
    brotli::Decompressor::new(&compressed[..], 4096)
        .read_to_end(&mut out)
        .expect("output must be a complete brotli stream");
    out
}

fn prefs() -> IoPrefs {
    IoPrefs::default()
        .with_params(Parameters::default().with_quality(5))
        .with_read_chunk(16 * 1024)
}

fn write_input(dir: &TempDir, name: &str, len: usize) -> (String, Vec<u8>) {
    let data: Vec<u8> = b"brotli file api test data "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect();
    let path = dir.path().join(name);
    fs::write(&path, &data).unwrap();
    (path.to_str().unwrap().to_owned(), data)
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_filename
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (src, data) = write_input(&dir, "input.txt", 100_000);
    let dst = format!("{src}.br");

    let stats = compress_filename(&src, &dst, &prefs()).unwrap();

    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, fs::metadata(&dst).unwrap().len());
    assert!(stats.bytes_out < stats.bytes_in);
    assert_eq!(decompress_file(Path::new(&dst)), data);
}

#[test]
fn test_compress_file_single_window_with_flushes() {
    let dir = TempDir::new().unwrap();
    let (src, data) = write_input(&dir, "input.txt", 200_000);
    let dst = format!("{src}.br");
    let mut prefs = prefs().with_policy(WindowPolicy::SingleWindow);
    prefs.flush_each_chunk = true;

    compress_filename(&src, &dst, &prefs).unwrap();

    assert_eq!(decompress_file(Path::new(&dst)), data);
}

#[test]
fn test_compress_empty_file() {
    let dir = TempDir::new().unwrap();
    let (src, _) = write_input(&dir, "empty.txt", 0);
    let dst = format!("{src}.br");

    let stats = compress_filename(&src, &dst, &prefs()).unwrap();

    assert_eq!(stats.bytes_in, 0);
    assert!(decompress_file(Path::new(&dst)).is_empty());
}

#[test]
fn test_existing_destination_is_kept_without_overwrite() {
    let dir = TempDir::new().unwrap();
    let (src, _) = write_input(&dir, "input.txt", 1000);
    let dst = format!("{src}.br");
    fs::write(&dst, b"do not touch").unwrap();

    let err = compress_filename(&src, &dst, &prefs()).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"do not touch");

    compress_filename(&src, &dst, &prefs().with_overwrite(true)).unwrap();
    assert_ne!(fs::read(&dst).unwrap(), b"do not touch");
}

#[test]
fn test_missing_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("missing.txt");
    let dst = dir.path().join("missing.txt.br");

    let err = compress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs()).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(!dst.exists());
}

#[test]
fn test_remove_source_after_success() {
    let dir = TempDir::new().unwrap();
    let (src, data) = write_input(&dir, "input.txt", 5000);
    let dst = format!("{src}.br");
    let mut prefs = prefs();
    prefs.remove_src_file = true;

    compress_filename(&src, &dst, &prefs).unwrap();

    assert!(!Path::new(&src).exists());
    assert_eq!(decompress_file(Path::new(&dst)), data);
}

#[test]
fn test_null_device_destination() {
    let dir = TempDir::new().unwrap();
    let (src, data) = write_input(&dir, "input.txt", 5000);

    let stats = compress_filename(&src, NUL_MARK, &prefs()).unwrap();

    assert_eq!(stats.bytes_in, data.len() as u64);
    assert!(Path::new(&src).exists());
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let dir = TempDir::new().unwrap();
    let (src, _) = write_input(&dir, "input.txt", 100);
    let dst = format!("{src}.br");
    let prefs = prefs().with_params(Parameters::default().with_lgwin(8));

    assert!(compress_filename(&src, &dst, &prefs).is_err());
    assert!(!Path::new(&dst).exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_multiple_filenames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_multiple_files_with_suffix() {
    let dir = TempDir::new().unwrap();
    let (a, data_a) = write_input(&dir, "a.txt", 3000);
    let (b, data_b) = write_input(&dir, "b.txt", 7000);
    let missing = dir.path().join("c.txt");

    let missed = compress_multiple_filenames(
        &[a.as_str(), b.as_str(), missing.to_str().unwrap()],
        ".brotli",
        &prefs(),
    );

    assert_eq!(missed, 1);
    assert_eq!(decompress_file(Path::new(&format!("{a}.brotli"))), data_a);
    assert_eq!(decompress_file(Path::new(&format!("{b}.brotli"))), data_b);
}

// ─────────────────────────────────────────────────────────────────────────────
// StreamWriter into a file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stream_writer_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("writer.br");
    let file = fs::File::create(&path).unwrap();

    let mut writer = StreamWriter::new(file, &Parameters::default().with_quality(5)).unwrap();
    let mut expected = Vec::new();
    for i in 0..500 {
        let line = format!("line {i}: streaming through a writer\n");
        writer.write_all(line.as_bytes()).unwrap();
        expected.extend_from_slice(line.as_bytes());
        if i % 100 == 0 {
            writer.flush().unwrap();
        }
    }
    writer.finish().unwrap();

    assert_eq!(decompress_file(&path), expected);
}
