// Integration tests for buffer::view: cursor arithmetic, ownership and
// slicing of BufferView.
//
// Coverage:
//   - construction: allocate / copy_from_slice / from_vec / wrap / From impls
//   - cursor setters reject position > limit and limit > capacity
//   - clear / flip / rewind
//   - slices share storage, carry a base offset and have independent cursors
//   - shared views are read-only; owned views accept put()
//   - into_bytes is zero-copy
//   - cursor invariant holds under arbitrary setter sequences (proptest)

use brstream::{BufferFault, BufferView, Ownership};
use bytes::Bytes;
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn from_vec_is_owned_and_fully_readable() {
    let view = BufferView::from(vec![1u8, 2, 3]);
    assert_eq!(view.ownership(), Ownership::Owned);
    assert_eq!(view.remaining_bytes(), &[1, 2, 3]);
    assert_eq!(view.offset(), 0);
}

#[test]
fn from_vec_takes_over_the_allocation() {
    let vec = vec![5u8; 64];
    let ptr = vec.as_ptr();
    let view = BufferView::from_vec(vec);
    assert_eq!(view.as_ptr(), ptr);
    assert_eq!(view.ownership(), Ownership::Owned);
}

#[test]
fn wrap_does_not_copy() {
    let bytes = Bytes::from(vec![9u8; 32]);
    let view = BufferView::from(bytes.clone());
    assert_eq!(view.ownership(), Ownership::Shared);
    assert_eq!(view.as_ptr(), bytes.as_ptr());
}

#[test]
fn copy_from_slice_copies() {
    let src = [7u8; 8];
    let view = BufferView::copy_from_slice(&src);
    assert_ne!(view.as_ptr(), src.as_ptr());
    assert_eq!(view.to_vec(), src.to_vec());
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn set_position_past_limit_is_rejected() {
    let mut view = BufferView::allocate(10);
    view.set_limit(4).unwrap();
    assert_eq!(
        view.set_position(5),
        Err(BufferFault::PositionPastLimit {
            position: 5,
            limit: 4
        })
    );
    assert_eq!(view.position(), 0);
}

#[test]
fn set_limit_past_capacity_is_rejected() {
    let mut view = BufferView::allocate(10);
    assert_eq!(
        view.set_limit(11),
        Err(BufferFault::LimitPastCapacity {
            limit: 11,
            capacity: 10
        })
    );
    assert_eq!(view.limit(), 10);
}

#[test]
fn flip_after_put_exposes_written_bytes() {
    let mut view = BufferView::allocate(16);
    view.put(b"hello").unwrap();
    view.flip();
    assert_eq!((view.position(), view.limit()), (0, 5));
    assert_eq!(view.remaining_bytes(), b"hello");

    view.set_position(5).unwrap();
    view.rewind();
    assert_eq!(view.position(), 0);

    view.clear();
    assert_eq!((view.position(), view.limit()), (0, 16));
}

// ─────────────────────────────────────────────────────────────────────────────
// Slicing and ownership
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slice_shares_storage_with_base_offset() {
    let mut parent = BufferView::from_vec((0u8..100).collect());
    parent.set_position(23).unwrap();
    parent.set_limit(60).unwrap();

    let child = parent.slice();

    assert_eq!(child.offset(), 23);
    assert_eq!((child.position(), child.limit(), child.capacity()), (0, 37, 37));
    assert_eq!(child.remaining_bytes()[0], 23);
    assert_eq!(child.as_ptr(), parent.remaining_bytes().as_ptr());
}

#[test]
fn slice_cursors_are_independent() {
    let mut parent = BufferView::from_vec(vec![0u8; 50]);
    let mut child = parent.slice();
    child.set_position(10).unwrap();
    assert_eq!(parent.position(), 0);
    parent.set_limit(5).unwrap();
    assert_eq!(child.limit(), 50);
}

#[test]
fn slice_range_out_of_bounds_is_rejected() {
    let mut view = BufferView::allocate(10);
    assert!(matches!(
        view.slice_range(8, 5),
        Err(BufferFault::OutOfBounds { offset: 8, len: 5, .. })
    ));
    let inner = view.slice_range(2, 8).unwrap();
    assert_eq!(inner.capacity(), 8);
}

#[test]
fn slicing_freezes_owned_storage() {
    let mut owned = BufferView::allocate(8);
    owned.put(b"ab").unwrap();
    let _slice = owned.slice();
    assert_eq!(owned.ownership(), Ownership::Shared);
    assert_eq!(owned.put(b"c"), Err(BufferFault::ReadOnly));
    assert!(owned.as_bytes_mut().is_err());
}

#[test]
fn parent_is_read_only_after_slice() {
    let mut parent = BufferView::from_vec(vec![0u8; 16]);
    parent.set_limit(8).unwrap();
    let child = parent.slice();

    assert_eq!(parent.put(b"x"), Err(BufferFault::ReadOnly));
    assert_eq!(parent.position(), 0);
    assert_eq!(child.ownership(), Ownership::Shared);

    let mut other = BufferView::allocate(4);
    let _ = other.slice_range(0, 2).unwrap();
    assert_eq!(other.put(b"y"), Err(BufferFault::ReadOnly));
}

#[test]
fn into_bytes_keeps_the_view_region() {
    let mut parent = BufferView::from_vec(b"0123456789".to_vec());
    let mid = parent.slice_range(3, 4).unwrap();
    assert_eq!(&mid.into_bytes()[..], b"3456");
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum CursorOp {
    Position(usize),
    Limit(usize),
    Flip,
    Clear,
    Rewind,
}

fn cursor_op() -> impl Strategy<Value = CursorOp> {
    prop_oneof![
        (0usize..80).prop_map(CursorOp::Position),
        (0usize..80).prop_map(CursorOp::Limit),
        Just(CursorOp::Flip),
        Just(CursorOp::Clear),
        Just(CursorOp::Rewind),
    ]
}

proptest! {
    #[test]
    fn prop_cursor_invariant_survives_any_setter_sequence(
        capacity in 0usize..64,
        ops in proptest::collection::vec(cursor_op(), 0..40),
    ) {
        let mut view = BufferView::allocate(capacity);
        for op in ops {
            match op {
                CursorOp::Position(p) => { let _ = view.set_position(p); }
                CursorOp::Limit(l) => { let _ = view.set_limit(l); }
                CursorOp::Flip => view.flip(),
                CursorOp::Clear => view.clear(),
                CursorOp::Rewind => view.rewind(),
            }
            prop_assert!(view.position() <= view.limit());
            prop_assert!(view.limit() <= view.capacity());
            prop_assert!(view.validate().is_ok());
            prop_assert_eq!(view.remaining_bytes().len(), view.remaining());
        }
    }
}
