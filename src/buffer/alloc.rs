//! Output buffer allocation.
//!
//! Every output view is freshly allocated, owned, and sized to exactly the
//! number of bytes it carries: position 0, limit = capacity. It never refers to
//! storage of any input view.

use crate::buffer::view::BufferView;
use crate::error::BufferFault;

/// Largest request honoured; `Vec` cannot hold more.
pub const MAX_ALLOCATION: usize = isize::MAX as usize;

/// Fresh zero-filled owned view of `len` bytes.
pub fn allocate(len: usize) -> Result<BufferView, BufferFault> {
    if len > MAX_ALLOCATION {
        return Err(BufferFault::AllocationTooLarge(len));
    }
    Ok(BufferView::allocate(len))
}

/// Fresh owned view holding a copy of `bytes`, sized exactly to them.
pub fn allocate_from(bytes: &[u8]) -> Result<BufferView, BufferFault> {
    let mut view = allocate(bytes.len())?;
    view.as_bytes_mut()?.copy_from_slice(bytes);
    Ok(view)
}
