// Integration tests for io::prefs: defaults and builder clamping.

use brstream::io::prefs::{IoPrefs, KB, READ_CHUNK_DEFAULT};
use brstream::io::BROTLI_EXTENSION;
use brstream::{Parameters, WindowPolicy};

#[test]
fn defaults() {
    let prefs = IoPrefs::default();
    assert!(!prefs.overwrite);
    assert!(!prefs.remove_src_file);
    assert!(!prefs.flush_each_chunk);
    assert_eq!(prefs.read_chunk, READ_CHUNK_DEFAULT);
    assert_eq!(prefs.params, Parameters::default());
    assert_eq!(prefs.policy, WindowPolicy::DrainAll);
    assert_eq!(BROTLI_EXTENSION, ".br");
}

#[test]
fn read_chunk_is_clamped_to_one_kib() {
    assert_eq!(IoPrefs::default().with_read_chunk(0).read_chunk, KB);
    assert_eq!(IoPrefs::default().with_read_chunk(3 * KB).read_chunk, 3 * KB);
}

#[test]
fn builders_compose() {
    let params = Parameters::default().with_quality(3);
    let prefs = IoPrefs::default()
        .with_params(params)
        .with_policy(WindowPolicy::SingleWindow)
        .with_overwrite(true);
    assert_eq!(prefs.params.quality, 3);
    assert_eq!(prefs.policy, WindowPolicy::SingleWindow);
    assert!(prefs.overwrite);
}
