//! Instanced quad renderers.

mod common;

pub mod solid;
pub mod text;

pub use solid::ShapeRenderer;
pub use text::TextRenderer;
