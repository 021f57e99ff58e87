//! Scene model and drawing file format for **Ball World**.
//!
//! This crate holds everything that survives a save/open round-trip: the
//! balls placed on the canvas, their parallel origin list, and the pen
//! settings applied to the next ball.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`color`] | `Rgba`, `ColorParseError` |
//! | [`ball`] | `Ball`, `Point` |
//! | [`scene`] | `Scene` and its mutations |
//! | [`error`] | `DecodeError`, `DecodeErrorKind` |
//!
//! # Quick start
//!
//! ```rust
//! use ballworld_scene::{Rgba, Scene};
//!
//! let mut scene = Scene::new();
//! scene.place_ball(150, 150);
//! scene.set_active_color(Rgba::BLUE);
//! scene.place_ball(200, 200);
//!
//! let bytes = scene.to_bytes();
//! let restored = Scene::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, scene);
//! ```

pub mod ball;
mod codec;
pub mod color;
pub mod error;
pub mod scene;

pub use ball::{Ball, Point};
pub use color::{ColorParseError, Rgba};
pub use error::{DecodeError, DecodeErrorKind};
pub use scene::Scene;
