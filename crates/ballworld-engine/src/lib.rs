//! Ball World engine crate.
//!
//! Owns the platform window, the GPU device and the renderers used by the
//! drawing app. Higher layers record a `DrawList` and hand it back here.

pub mod core;
pub mod coords;
pub mod device;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod window;
