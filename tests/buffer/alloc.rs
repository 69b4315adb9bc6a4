// Integration tests for buffer::alloc: exactly sized, independent output views.

use brstream::buffer::{allocate, allocate_from};
use brstream::{BufferFault, BufferView, Ownership};

#[test]
fn allocate_zero_is_valid() {
    let view = allocate(0).unwrap();
    assert_eq!((view.position(), view.limit(), view.capacity()), (0, 0, 0));
}

#[test]
fn allocate_is_owned_and_writable() {
    let mut view = allocate(4).unwrap();
    assert_eq!(view.ownership(), Ownership::Owned);
    view.put(b"abcd").unwrap();
    assert_eq!(view.as_bytes(), b"abcd");
}

#[test]
fn allocate_beyond_isize_max_fails() {
    let too_big = isize::MAX as usize + 1;
    assert_eq!(allocate(too_big).unwrap_err(), BufferFault::AllocationTooLarge(too_big));
}

#[test]
fn allocate_from_copies_out_of_shared_storage() {
    let shared = BufferView::wrap_static(b"shared bytes");
    let copy = allocate_from(shared.remaining_bytes()).unwrap();
    assert_eq!(copy.remaining_bytes(), b"shared bytes");
    assert_eq!(copy.ownership(), Ownership::Owned);
    assert_ne!(copy.as_ptr(), shared.as_ptr());
}
