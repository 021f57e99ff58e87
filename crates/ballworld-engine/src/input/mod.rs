//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s (see `platform`)
//! and folds them into `InputState` + `InputFrame`.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::{InputFrame, KeyPress, PointerClick};
pub use state::InputState;
pub use types::{
    ButtonState, InputEvent, Key, Modifiers, MouseButton, PointerButtonEvent,
};
