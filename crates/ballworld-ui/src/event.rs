use ballworld_engine::coords::Vec2;
use ballworld_engine::input::{InputFrame, InputState, Key, MouseButton};

pub use ballworld_engine::input::Modifiers;

use crate::menu::Command;

/// Input events routed to the menu bar and then the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Left button pressed and released at `pos`.
    Click { pos: Vec2 },
    /// Pointer moved to `pos`, or left the window (`None`).
    Hover { pos: Option<Vec2> },
    /// Non-repeat key press.
    KeyPress { key: Key, modifiers: Modifiers },
    /// Printable text typed since the last dispatch.
    TextInput { text: String },
}

/// Result returned by [`MenuBar::on_event`](crate::menu_bar::MenuBar::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not for this widget; keep routing.
    Ignored,
    /// Handled; stop routing.
    Consumed,
    /// Handled, and the user picked a menu item.
    Invoke(Command),
}

/// Turns one dispatch worth of engine input into UI events.
///
/// Hover comes first so the menu bar sees the pointer position before any
/// click at that position. Typed text precedes key presses so an Enter in
/// the same batch confirms it. Clicks with buttons other than left are
/// dropped.
pub fn ui_events(state: &InputState, frame: &InputFrame) -> Vec<UiEvent> {
    let mut events = Vec::new();

    if frame.pointer_moved {
        let pos = state.pointer_pos.map(|(x, y)| Vec2::new(x, y));
        events.push(UiEvent::Hover { pos });
    }

    events.extend(
        frame
            .clicks
            .iter()
            .filter(|c| c.button == MouseButton::Left)
            .map(|c| UiEvent::Click { pos: Vec2::new(c.x, c.y) }),
    );

    events.extend(frame.text.iter().map(|t| UiEvent::TextInput { text: t.clone() }));

    events.extend(
        frame
            .keys_pressed
            .iter()
            .map(|k| UiEvent::KeyPress { key: k.key, modifiers: k.modifiers }),
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballworld_engine::input::{KeyPress, PointerClick};

    fn click(button: MouseButton, x: f32, y: f32) -> PointerClick {
        PointerClick { button, x, y, modifiers: Modifiers::default() }
    }

    #[test]
    fn only_left_clicks_become_ui_clicks() {
        let state = InputState::default();
        let mut frame = InputFrame::default();
        frame.clicks.push(click(MouseButton::Right, 1.0, 1.0));
        frame.clicks.push(click(MouseButton::Left, 150.0, 174.0));
        frame.clicks.push(click(MouseButton::Middle, 2.0, 2.0));

        assert_eq!(ui_events(&state, &frame), vec![UiEvent::Click { pos: Vec2::new(150.0, 174.0) }]);
    }

    #[test]
    fn hover_precedes_clicks_and_keys() {
        let mut state = InputState::default();
        state.pointer_pos = Some((10.0, 12.0));

        let mut frame = InputFrame::default();
        frame.pointer_moved = true;
        frame.clicks.push(click(MouseButton::Left, 10.0, 12.0));
        frame.keys_pressed.push(KeyPress { key: Key::Escape, modifiers: Modifiers::default() });

        let events = ui_events(&state, &frame);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], UiEvent::Hover { pos: Some(Vec2::new(10.0, 12.0)) });
        assert!(matches!(events[1], UiEvent::Click { .. }));
        assert!(matches!(events[2], UiEvent::KeyPress { key: Key::Escape, .. }));
    }

    #[test]
    fn pointer_leaving_hovers_nowhere() {
        let state = InputState::default();
        let mut frame = InputFrame::default();
        frame.pointer_moved = true;
        assert_eq!(ui_events(&state, &frame), vec![UiEvent::Hover { pos: None }]);
    }

    #[test]
    fn typed_text_comes_before_keys() {
        let state = InputState::default();
        let mut frame = InputFrame::default();
        frame.keys_pressed.push(KeyPress { key: Key::Enter, modifiers: Modifiers::default() });
        frame.text.push("4".to_string());
        frame.text.push("2".to_string());

        let events = ui_events(&state, &frame);
        assert_eq!(events[0], UiEvent::TextInput { text: "4".to_string() });
        assert_eq!(events[1], UiEvent::TextInput { text: "2".to_string() });
        assert!(matches!(events[2], UiEvent::KeyPress { key: Key::Enter, .. }));
    }
}
