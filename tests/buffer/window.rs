// Integration tests for buffer::window: WindowFeeder planning.
//
// Properties: windows are contiguous, start at the view's position, end at its
// limit, never exceed max_chunk, and only the last one may be partial.

use brstream::buffer::{WindowFeeder, WindowSpec};
use brstream::BufferView;
use proptest::prelude::*;

fn view(capacity: usize, position: usize, limit: usize) -> BufferView {
    let mut view = BufferView::allocate(capacity);
    view.set_limit(limit).unwrap();
    view.set_position(position).unwrap();
    view
}

#[test]
fn two_and_a_half_windows() {
    let windows: Vec<WindowSpec> = WindowFeeder::new(&view(250, 0, 250), 100).collect();
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[2], WindowSpec { start: 200, len: 50 });
}

#[test]
fn feeder_does_not_touch_the_view() {
    let v = view(64, 10, 40);
    let _ = WindowFeeder::new(&v, 8).count();
    assert_eq!((v.position(), v.limit(), v.capacity()), (10, 40, 64));
}

#[test]
fn remaining_tracks_unplanned_bytes() {
    let mut feeder = WindowFeeder::new(&view(10, 0, 10), 4);
    assert_eq!(feeder.remaining(), 10);
    feeder.next();
    assert_eq!(feeder.remaining(), 6);
}

proptest! {
    #[test]
    fn prop_windows_tile_the_readable_region(
        capacity in 0usize..2048,
        a in 0usize..2048,
        b in 0usize..2048,
        max_chunk in 1usize..512,
    ) {
        let limit = a.min(capacity);
        let position = b.min(limit);
        let windows: Vec<WindowSpec> = WindowFeeder::new(&view(capacity, position, limit), max_chunk).collect();

        if position == limit {
            prop_assert!(windows.is_empty());
        } else {
            prop_assert_eq!(windows[0].start, position);
            prop_assert_eq!(windows.last().map(|w| w.end()), Some(limit));
        }
        for pair in windows.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start);
            prop_assert_eq!(pair[0].len, max_chunk);
        }
        for w in &windows {
            prop_assert!(w.len > 0 && w.len <= max_chunk);
        }
        prop_assert_eq!(windows.len(), (limit - position).div_ceil(max_chunk));
    }

    #[test]
    fn prop_budget_limits_window_count(
        len in 0usize..1024,
        max_chunk in 1usize..64,
        budget in 0usize..8,
    ) {
        let feeder = WindowFeeder::new(&view(len, 0, len), max_chunk).with_budget(budget);
        let expected = len.div_ceil(max_chunk).min(budget);
        prop_assert_eq!(feeder.len(), expected);
        prop_assert_eq!(feeder.count(), expected);
    }
}
