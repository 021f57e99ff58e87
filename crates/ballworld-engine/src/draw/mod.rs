//! Per-frame draw stream.
//!
//! Higher layers record commands into a [`DrawList`]; renderers consume it.
//! Insertion order is paint order within each renderer. Shapes are painted
//! before text.

mod list;

pub use list::{DrawCmd, DrawList};
