//! Window feeder: cuts the readable region of a [`BufferView`] into
//! successive windows no larger than the engine's maximum input chunk.
//!
//! The feeder only plans; it never touches the view. The compressor reads each
//! window through the view and advances the view's position once the engine
//! has accepted it, so a fresh feeder is derived from the cursor on every call.

use std::iter::FusedIterator;

use crate::buffer::view::BufferView;

/// One window, as a `(start, len)` pair relative to the view's base offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub start: usize,
    pub len: usize,
}

impl WindowSpec {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Lazy, finite, non-restartable sequence of [`WindowSpec`]s over
/// `position..limit` of a view.
///
/// Yields full windows of `max_chunk` bytes, then one partial window with the
/// remainder. An empty region yields nothing.
#[derive(Debug, Clone)]
pub struct WindowFeeder {
    next: usize,
    limit: usize,
    max_chunk: usize,
    budget: Option<usize>,
}

impl WindowFeeder {
    /// `max_chunk` of 0 is treated as 1.
    pub fn new(view: &BufferView, max_chunk: usize) -> Self {
        Self::over(view.position(), view.limit(), max_chunk)
    }

    /// Feeder over the raw range `start..limit`.
    pub fn over(start: usize, limit: usize, max_chunk: usize) -> Self {
        WindowFeeder {
            next: start,
            limit: limit.max(start),
            max_chunk: max_chunk.max(1),
            budget: None,
        }
    }

    /// Stop after at most `windows` windows.
    pub fn with_budget(mut self, windows: usize) -> Self {
        self.budget = Some(windows);
        self
    }

    /// Bytes not yet covered by a yielded window.
    pub fn remaining(&self) -> usize {
        self.limit - self.next
    }

    fn windows_left(&self) -> usize {
        let unbounded = self.remaining().div_ceil(self.max_chunk);
        match self.budget {
            Some(budget) => unbounded.min(budget),
            None => unbounded,
        }
    }
}

impl Iterator for WindowFeeder {
    type Item = WindowSpec;

    fn next(&mut self) -> Option<WindowSpec> {
        if self.next >= self.limit || self.budget == Some(0) {
            return None;
        }
        let len = (self.limit - self.next).min(self.max_chunk);
        let spec = WindowSpec {
            start: self.next,
            len,
        };
        self.next += len;
        if let Some(budget) = self.budget.as_mut() {
            *budget -= 1;
        }
        Some(spec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.windows_left();
        (n, Some(n))
    }
}

impl ExactSizeIterator for WindowFeeder {}

impl FusedIterator for WindowFeeder {}
