//! Cursor-bearing byte views.
//!
//! A [`BufferView`] is a window onto a contiguous byte region with a mutable
//! read/write cursor:
//!
//! ```text
//!   backing storage
//!   ├── offset ──┬───────────────── capacity ─────────────────┐
//!                0 ≤ position ≤ limit ≤ capacity
//! ```
//!
//! `position`, `limit` and `capacity` are relative to the view's base
//! `offset` into its backing storage. Storage is either exclusively owned and
//! writable ([`Ownership::Owned`], a `BytesMut`) or reference counted and
//! read-only ([`Ownership::Shared`], a `Bytes`). Several views may share one
//! `Bytes` allocation; slicing an owned view converts it to shared storage.

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::error::BufferFault;

/// Ownership tag of a view's backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Exclusively owned, writable storage. Slicing the view turns it into
    /// [`Ownership::Shared`].
    Owned,
    /// Reference-counted storage, possibly shared with other views. Read-only.
    Shared,
}

#[derive(Clone)]
enum Backing {
    Owned(BytesMut),
    Shared(Bytes),
}

impl Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Owned(buf) => &buf[..],
            Backing::Shared(bytes) => &bytes[..],
        }
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

/// A logical view over a contiguous byte region with position / limit /
/// capacity semantics.
///
/// Cloning an owned view copies its storage; cloning a shared view shares it.
///
/// [`slice`](BufferView::slice) and [`slice_range`](BufferView::slice_range)
/// take `&mut self` because they convert an owned parent to shared storage:
/// after slicing, `put` and `as_bytes_mut` on the parent fail with
/// [`BufferFault::ReadOnly`].
#[derive(Clone)]
pub struct BufferView {
    backing: Backing,
    offset: usize,
    position: usize,
    limit: usize,
    capacity: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

impl BufferView {
    /// Zero-filled owned view of `capacity` bytes; position 0, limit = capacity.
    pub fn allocate(capacity: usize) -> Self {
        Self::owned(BytesMut::zeroed(capacity))
    }

    /// Owned view holding a copy of `src`.
    pub fn copy_from_slice(src: &[u8]) -> Self {
        Self::owned(BytesMut::from(src))
    }

    /// Owned view taking over the allocation of `vec`. No bytes are copied.
    pub fn from_vec(vec: Vec<u8>) -> Self {
        Self::owned(BytesMut::from(Bytes::from(vec)))
    }

    /// Shared view over externally owned storage. No bytes are copied.
    pub fn wrap(bytes: Bytes) -> Self {
        let capacity = bytes.len();
        BufferView {
            backing: Backing::Shared(bytes),
            offset: 0,
            position: 0,
            limit: capacity,
            capacity,
        }
    }

    pub fn wrap_static(bytes: &'static [u8]) -> Self {
        Self::wrap(Bytes::from_static(bytes))
    }

    fn owned(buf: BytesMut) -> Self {
        let capacity = buf.len();
        BufferView {
            backing: Backing::Owned(buf),
            offset: 0,
            position: 0,
            limit: capacity,
            capacity,
        }
    }

    /// New view over `position..limit` of this one, sharing storage.
    ///
    /// The slice starts at position 0 with limit = capacity = `remaining()`.
    /// An owned view is converted to shared storage first, so both views are
    /// read-only afterwards.
    pub fn slice(&mut self) -> BufferView {
        let (start, len) = (self.position, self.remaining());
        let shared = self.share();
        BufferView {
            backing: Backing::Shared(shared),
            offset: self.offset + start,
            position: 0,
            limit: len,
            capacity: len,
        }
    }

    /// New view over `start..start + len` (relative to this view), sharing
    /// storage. Cursor bounds of this view are not consulted.
    pub fn slice_range(&mut self, start: usize, len: usize) -> Result<BufferView, BufferFault> {
        let end = start.checked_add(len);
        if end.map_or(true, |end| end > self.capacity) {
            return Err(BufferFault::OutOfBounds {
                offset: start,
                len,
                backing: self.capacity,
            });
        }
        let shared = self.share();
        Ok(BufferView {
            backing: Backing::Shared(shared),
            offset: self.offset + start,
            position: 0,
            limit: len,
            capacity: len,
        })
    }

    fn share(&mut self) -> Bytes {
        let shared = match std::mem::replace(&mut self.backing, Backing::Shared(Bytes::new())) {
            Backing::Owned(buf) => buf.freeze(),
            Backing::Shared(bytes) => bytes,
        };
        self.backing = Backing::Shared(shared.clone());
        shared
    }
}

impl From<Vec<u8>> for BufferView {
    fn from(vec: Vec<u8>) -> Self {
        BufferView::from_vec(vec)
    }
}

impl From<Bytes> for BufferView {
    fn from(bytes: Bytes) -> Self {
        BufferView::wrap(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────────────

impl BufferView {
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Base offset of this view inside its backing storage.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    pub fn ownership(&self) -> Ownership {
        match self.backing {
            Backing::Owned(_) => Ownership::Owned,
            Backing::Shared(_) => Ownership::Shared,
        }
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), BufferFault> {
        if position > self.limit {
            return Err(BufferFault::PositionPastLimit {
                position,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Set the limit; a position beyond the new limit is pulled back to it.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), BufferFault> {
        if limit > self.capacity {
            return Err(BufferFault::LimitPastCapacity {
                limit,
                capacity: self.capacity,
            });
        }
        self.limit = limit;
        if self.position > limit {
            self.position = limit;
        }
        Ok(())
    }

    /// position = 0, limit = capacity.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity;
    }

    /// limit = position, position = 0.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Check `position <= limit <= capacity` and that the view lies inside its
    /// backing storage.
    pub fn validate(&self) -> Result<(), BufferFault> {
        if self.position > self.limit {
            return Err(BufferFault::PositionPastLimit {
                position: self.position,
                limit: self.limit,
            });
        }
        if self.limit > self.capacity {
            return Err(BufferFault::LimitPastCapacity {
                limit: self.limit,
                capacity: self.capacity,
            });
        }
        let backing = self.backing.len();
        if self
            .offset
            .checked_add(self.capacity)
            .map_or(true, |end| end > backing)
        {
            return Err(BufferFault::OutOfBounds {
                offset: self.offset,
                len: self.capacity,
                backing,
            });
        }
        Ok(())
    }

    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.position += n;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte access
// ─────────────────────────────────────────────────────────────────────────────

impl BufferView {
    /// The whole view, `0..capacity`, regardless of the cursor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.backing.as_slice()[self.offset..self.offset + self.capacity]
    }

    /// Readable bytes, `position..limit`.
    pub fn remaining_bytes(&self) -> &[u8] {
        &self.as_bytes()[self.position..self.limit]
    }

    /// Copy of the readable bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.remaining_bytes().to_vec()
    }

    /// Mutable access to `0..capacity`; fails for shared storage.
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8], BufferFault> {
        let range = self.offset..self.offset + self.capacity;
        match &mut self.backing {
            Backing::Owned(buf) => Ok(&mut buf[range]),
            Backing::Shared(_) => Err(BufferFault::ReadOnly),
        }
    }

    /// Write `src` at the current position and advance past it.
    pub fn put(&mut self, src: &[u8]) -> Result<(), BufferFault> {
        let remaining = self.remaining();
        if src.len() > remaining {
            return Err(BufferFault::Overflow {
                requested: src.len(),
                remaining,
            });
        }
        let at = self.position;
        self.as_bytes_mut()?[at..at + src.len()].copy_from_slice(src);
        self.position += src.len();
        Ok(())
    }

    /// The `0..capacity` region as `Bytes`. Zero-copy for both storage kinds.
    pub fn into_bytes(self) -> Bytes {
        let range = self.offset..self.offset + self.capacity;
        match self.backing {
            Backing::Owned(buf) => buf.freeze().slice(range),
            Backing::Shared(bytes) => bytes.slice(range),
        }
    }

    /// Address of the first byte of the view, for aliasing checks.
    pub fn as_ptr(&self) -> *const u8 {
        self.as_bytes().as_ptr()
    }
}

impl fmt::Debug for BufferView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("ownership", &self.ownership())
            .field("offset", &self.offset)
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity)
            .finish()
    }
}
