//! Buffer views, window planning and output allocation.

pub mod alloc;
pub mod view;
pub mod window;

pub use alloc::{allocate, allocate_from};
pub use view::{BufferView, Ownership};
pub use window::{WindowFeeder, WindowSpec};
