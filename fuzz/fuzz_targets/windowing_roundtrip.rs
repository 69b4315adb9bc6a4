#![no_main]
use std::io::Read;

use brstream::{BufferView, Parameters, StreamCompressor, WindowPolicy};
use libfuzzer_sys::fuzz_target;

// Layout: [quality, policy, cut bytes..., 0xFF marker, payload...]. Each cut
// byte splits the payload; its low bit asks for a flush.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let quality = u32::from(data[0] % 12);
    let policy = if data[1] & 1 == 0 {
        WindowPolicy::DrainAll
    } else {
        WindowPolicy::SingleWindow
    };
    let rest = &data[2..];
    let split = rest.iter().position(|&b| b == 0xFF).unwrap_or(0);
    let (cuts, payload) = (&rest[..split], &rest[(split + 1).min(rest.len())..]);

    let params = Parameters::default().with_quality(quality).with_lgwin(16);
    let mut compressor = StreamCompressor::new(&params)
        .unwrap()
        .with_policy(policy);

    let mut compressed = Vec::new();
    let mut from = 0usize;
    for &cut in cuts {
        let to = (from + usize::from(cut >> 1) * 37).min(payload.len());
        let mut view = BufferView::copy_from_slice(&payload[from..to]);
        loop {
            let out = compressor.compress_next_buffer(&mut view, cut & 1 == 1).unwrap();
            compressed.extend_from_slice(out.remaining_bytes());
            if !view.has_remaining() {
                break;
            }
        }
        from = to;
    }
    let mut tail = BufferView::copy_from_slice(&payload[from..]);
    compressed.extend_from_slice(compressor.finish(&mut tail).unwrap().remaining_bytes());

    let mut recovered = Vec::new();
    brotli::Decompressor::new(&compressed[..], 4096)
        .read_to_end(&mut recovered)
        .expect("self-compressed stream must decode");
    assert_eq!(
        recovered,
        payload,
        "round-trip mismatch: {} bytes in, {} bytes back",
        payload.len(),
        recovered.len()
    );
});
