#![no_main]
use brstream::BufferView;
use libfuzzer_sys::fuzz_target;

// Drive the cursor API with arbitrary opcodes; the view must stay valid and
// slices must always read the bytes they cover.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let mut view = BufferView::from_vec((0..cap).collect());
    for pair in ops.chunks(2) {
        let arg = usize::from(pair.get(1).copied().unwrap_or(0));
        match pair[0] % 6 {
            0 => {
                let _ = view.set_position(arg);
            }
            1 => {
                let _ = view.set_limit(arg);
            }
            2 => view.flip(),
            3 => view.clear(),
            4 => {
                let expected = view.remaining_bytes().to_vec();
                let slice = view.slice();
                assert_eq!(slice.remaining_bytes(), &expected[..]);
                view = slice;
            }
            _ => {
                if let Ok(sub) = view.slice_range(arg / 2, arg / 4) {
                    assert_eq!(sub.capacity(), arg / 4);
                }
            }
        }
        assert!(view.validate().is_ok());
        assert!(view.position() <= view.limit() && view.limit() <= view.capacity());
    }
});
