//! Engine-facing application contract.
//!
//! The runtime drives an [`App`] with two callbacks: one per input dispatch
//! and one per requested frame. Nothing runtime-internal leaks into them.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, WindowCtx};
