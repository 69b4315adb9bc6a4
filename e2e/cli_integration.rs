// e2e/cli_integration.rs: CLI integration tests
//
// Runs the `brstream` binary as a black box with std::process::Command and
// checks exit codes, produced files and that the output decodes.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Locate the `brstream` binary produced by Cargo.
fn brstream_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_brstream") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("brstream");
    p
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, Brotli!\n".repeat(273);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

fn decompress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, 4096).read_to_end(&mut out).unwrap();
    out
}

fn decompress_file(path: &Path) -> Vec<u8> {
    decompress(&fs::read(path).unwrap())
}

// ── 1. Default output name ───────────────────────────────────────────────────

#[test]
fn test_cli_compress_default_output_name() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(brstream_bin())
        .args(["-q", "5", input.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run brstream");

    assert!(status.success(), "compress should exit 0");
    let compressed = dir.path().join("input.txt.br");
    assert!(compressed.exists(), "input.txt.br should exist");
    assert_eq!(decompress_file(&compressed), original);
    assert!(input.exists(), "source is kept by default");
}

// ── 2. Explicit output and overwrite ─────────────────────────────────────────

#[test]
fn test_cli_refuses_to_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let out = dir.path().join("out.br");
    fs::write(&out, b"existing").unwrap();

    let status = Command::new(brstream_bin())
        .args([input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .status()
        .expect("failed to run brstream");
    assert!(!status.success(), "existing output without -f must fail");
    assert_eq!(fs::read(&out).unwrap(), b"existing");

    let status = Command::new(brstream_bin())
        .args(["-f", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .status()
        .expect("failed to run brstream -f");
    assert!(status.success(), "-f should overwrite");
    assert_eq!(decompress_file(&out), fs::read(&input).unwrap());
}

// ── 3. stdin → stdout ────────────────────────────────────────────────────────

#[test]
fn test_cli_stdin_to_stdout() {
    let payload = b"piped through brstream\n".repeat(100);
    let mut child = Command::new(brstream_bin())
        .args(["-c", "-q", "4"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn brstream");

    child.stdin.take().unwrap().write_all(&payload).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(decompress(&output.stdout), payload);
}

// ── 4. Parameters and policies ───────────────────────────────────────────────

#[test]
fn test_cli_single_window_and_flags() {
    let (dir, input) = make_temp_input();
    let out = dir.path().join("flags.br");

    let status = Command::new(brstream_bin())
        .args([
            "--single-window",
            "--flush",
            "--chunk-kib",
            "1",
            "-q",
            "6",
            "-w",
            "16",
            "--mode",
            "text",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run brstream");

    assert!(status.success());
    assert_eq!(decompress_file(&out), fs::read(&input).unwrap());
}

#[test]
fn test_cli_rejects_out_of_range_quality() {
    let (_dir, input) = make_temp_input();
    let status = Command::new(brstream_bin())
        .args(["-q", "12", input.to_str().unwrap()])
        .status()
        .expect("failed to run brstream");
    assert!(!status.success());
}

// ── 5. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs_and_remove() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "first file\n".repeat(50)).unwrap();
    fs::write(&b, "second file\n".repeat(50)).unwrap();

    let status = Command::new(brstream_bin())
        .args(["--rm", "-q", "5", a.to_str().unwrap(), b.to_str().unwrap()])
        .status()
        .expect("failed to run brstream");

    assert!(status.success());
    assert!(!a.exists() && !b.exists(), "--rm removes sources");
    assert_eq!(
        decompress_file(&dir.path().join("a.txt.br")),
        "first file\n".repeat(50).as_bytes()
    );
    assert_eq!(
        decompress_file(&dir.path().join("b.txt.br")),
        "second file\n".repeat(50).as_bytes()
    );
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(brstream_bin())
        .arg(dir.path().join("nope.txt").to_str().unwrap())
        .output()
        .expect("failed to run brstream");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.txt"));
}

// ── 6. --version / --help ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(brstream_bin())
        .arg("--version")
        .output()
        .expect("failed to run brstream --version");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {stdout}");
}

#[test]
fn test_cli_help() {
    let output = Command::new(brstream_bin())
        .arg("--help")
        .output()
        .expect("failed to run brstream --help");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
    assert!(stdout.contains("usage"), "got: {stdout}");
}
