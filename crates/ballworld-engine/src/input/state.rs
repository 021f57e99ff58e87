use std::collections::HashSet;

use super::frame::{InputFrame, KeyPress, PointerClick};
use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton, PointerButtonEvent};

/// Current input state for the window.
///
/// Holds "is down" information and the pointer position. Transitions are
/// recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies one event to the current state and writes transitions to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = m;
            }

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((x, y));
                frame.pointer_moved = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                frame.pointer_moved = true;
            }

            InputEvent::Key { key, state, repeat, text } => match state {
                ButtonState::Pressed => {
                    let inserted = self.keys_down.insert(key);
                    if inserted && !repeat {
                        frame.keys_pressed.push(KeyPress { key, modifiers: self.modifiers });
                    }
                    if let Some(text) = text {
                        self.push_text(frame, text);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(&key);
                }
            },

            InputEvent::Text(text) => self.push_text(frame, text),

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((x, y));
                match state {
                    ButtonState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(&button) {
                            frame.clicks.push(PointerClick {
                                button,
                                x,
                                y,
                                modifiers: self.modifiers,
                            });
                        }
                    }
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Keeps printable text only. Control characters (Enter, Backspace,
    /// Ctrl chords) arrive as keys, and Cmd/Super chords are shortcuts.
    fn push_text(&self, frame: &mut InputFrame, text: String) {
        if self.modifiers.meta || text.is_empty() || text.chars().any(char::is_control) {
            return;
        }
        frame.text.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    fn key(key: Key, state: ButtonState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat, text: None }
    }

    fn typed(key: Key, text: &str, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state: ButtonState::Pressed, repeat, text: Some(text.to_string()) }
    }

    #[test]
    fn press_release_is_a_click_at_release_point() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(ButtonState::Pressed, 10.0, 10.0));
        assert!(frame.clicks.is_empty());
        assert!(state.button_down(MouseButton::Left));

        state.apply_event(&mut frame, button(ButtonState::Released, 12.0, 11.0));
        assert_eq!(frame.clicks.len(), 1);
        assert_eq!((frame.clicks[0].x, frame.clicks[0].y), (12.0, 11.0));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(ButtonState::Released, 1.0, 1.0));
        assert!(frame.clicks.is_empty());
    }

    #[test]
    fn focus_loss_drops_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(ButtonState::Pressed, 0.0, 0.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        state.apply_event(&mut frame, button(ButtonState::Released, 0.0, 0.0));
        assert!(frame.clicks.is_empty());
    }

    #[test]
    fn key_press_records_current_modifiers() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };

        state.apply_event(&mut frame, InputEvent::ModifiersChanged(ctrl));
        state.apply_event(&mut frame, key(Key::S, ButtonState::Pressed, false));

        assert_eq!(frame.keys_pressed, vec![KeyPress { key: Key::S, modifiers: ctrl }]);
    }

    #[test]
    fn held_key_and_repeats_are_reported_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Escape, ButtonState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Escape, ButtonState::Pressed, true));
        assert_eq!(frame.keys_pressed.len(), 1);

        state.apply_event(&mut frame, key(Key::Escape, ButtonState::Released, false));
        state.apply_event(&mut frame, key(Key::Escape, ButtonState::Pressed, false));
        assert_eq!(frame.keys_pressed.len(), 2);
    }

    #[test]
    fn pointer_tracking() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));
        assert!(frame.pointer_moved);

        frame.clear();
        assert!(frame.is_empty());

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn typed_text_includes_repeats() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, typed(Key::Unknown(1), "4", false));
        state.apply_event(&mut frame, typed(Key::Unknown(1), "4", true));
        state.apply_event(&mut frame, InputEvent::Text("é".to_string()));
        assert_eq!(frame.text, ["4", "4", "é"]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn control_text_and_command_chords_are_not_typed() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, typed(Key::Enter, "\r", false));
        state.apply_event(&mut frame, typed(Key::Backspace, "\u{8}", false));
        assert!(frame.text.is_empty());
        assert_eq!(frame.keys_pressed.len(), 2);

        let meta = Modifiers { meta: true, ..Modifiers::default() };
        state.apply_event(&mut frame, InputEvent::ModifiersChanged(meta));
        state.apply_event(&mut frame, typed(Key::S, "s", false));
        assert!(frame.text.is_empty());
    }
}
