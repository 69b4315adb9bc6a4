// Integration tests for io::file_io: source / destination resolution.

use std::io::{self, Read, Write};

use brstream::io::file_io::{open_dst_file, open_src_file, NUL_MARK, STDOUT_MARK};
use brstream::io::IoPrefs;
use tempfile::TempDir;

#[test]
fn src_file_reads_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, b"source bytes").unwrap();

    let mut reader = open_src_file(path.to_str().unwrap()).unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).unwrap();
    assert_eq!(buf, "source bytes");
}

#[test]
fn missing_src_error_names_the_path() {
    let err = open_src_file("/no/such/dir/input.bin").err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(err.to_string().contains("/no/such/dir/input.bin"));
}

#[test]
fn dst_file_is_created_and_buffered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.br");

    let mut dst = open_dst_file(path.to_str().unwrap(), &IoPrefs::default()).unwrap();
    assert!(!dst.is_stdout);
    dst.write_all(b"abc").unwrap();
    drop(dst);

    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
}

#[test]
fn sentinels_never_hit_the_overwrite_check() {
    let prefs = IoPrefs::default();
    assert!(open_dst_file(STDOUT_MARK, &prefs).unwrap().is_stdout);
    assert!(open_dst_file(NUL_MARK, &prefs).is_ok());
}
