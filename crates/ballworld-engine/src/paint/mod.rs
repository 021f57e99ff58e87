//! Paint types consumed by the renderers.

mod color;

pub use color::Color;
