use super::types::{Key, Modifiers, MouseButton};

/// A press followed by a release of the same button, reported at the release
/// position in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerClick {
    pub button: MouseButton,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// A non-repeat key press together with the modifiers held at the time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Input transitions produced by the events of one dispatch.
///
/// `InputState` holds what is currently down; `InputFrame` holds what just
/// happened. The runtime clears it after every application callback.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub clicks: Vec<PointerClick>,
    pub keys_pressed: Vec<KeyPress>,
    /// Printable text typed, in arrival order. Key repeats are included.
    pub text: Vec<String>,
    /// Pointer moved, entered or left.
    pub pointer_moved: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.clicks.clear();
        self.keys_pressed.clear();
        self.text.clear();
        self.pointer_moved = false;
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty() && self.keys_pressed.is_empty() && self.text.is_empty() && !self.pointer_moved
    }
}
