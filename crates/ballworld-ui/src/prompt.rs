//! Modal prompts drawn inside the window.
//!
//! The controller asks for custom values through the blocking [`Prompter`]
//! trait, but the window cannot block. [`DialogPrompter`] bridges the two:
//! the first call records what was asked and returns `None`, the session
//! opens a [`PromptDialog`] for it, and once the user confirms, the same
//! command runs again and the prompter hands over the answer.

use std::cell::RefCell;
use std::rc::Rc;

use ballworld_engine::coords::{Rect, Vec2};
use ballworld_engine::input::Key;
use ballworld_scene::Rgba;

use crate::event::UiEvent;
use crate::host::Prompter;
use crate::menu::Command;
use crate::menu_bar::{BAR_HEIGHT, FONT_SIZE};
use crate::painter::{paint_color, Painter};

/// Longest answer the field accepts.
const MAX_INPUT_CHARS: usize = 32;

const ORIGIN: Vec2 = Vec2 { x: 40.0, y: BAR_HEIGHT + 40.0 };
const WIDTH: f32 = 320.0;
const HEIGHT: f32 = 136.0;
const PAD: f32 = 12.0;
const FIELD_HEIGHT: f32 = 26.0;
const BUTTON_WIDTH: f32 = 72.0;
const BUTTON_HEIGHT: f32 = 24.0;

const SHADE: Rgba = Rgba::new(0, 0, 0, 110);
const PANEL_BG: Rgba = Rgba::opaque(246, 246, 246);
const FIELD_BG: Rgba = Rgba::WHITE;
const BORDER: Rgba = Rgba::opaque(150, 150, 150);
const FOCUS: Rgba = Rgba::opaque(60, 120, 215);
const BUTTON_BG: Rgba = Rgba::opaque(225, 225, 225);
const LABEL: Rgba = Rgba::BLACK;
const ERROR: Rgba = Rgba::opaque(190, 30, 30);

/// What the controller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    Text { prompt: String },
    Color { title: String, current: Rgba },
}

/// A confirmed dialog value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Color(Rgba),
}

// ── DialogPrompter ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Exchange {
    request: Option<PromptRequest>,
    answer: Option<Answer>,
}

/// [`Prompter`] answered by the in-window dialog.
///
/// Clones share state: one goes into the controller's services, the session
/// keeps another to pick up requests and deliver answers.
#[derive(Debug, Clone, Default)]
pub struct DialogPrompter {
    exchange: Rc<RefCell<Exchange>>,
}

impl DialogPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request recorded since the last call, if any.
    pub fn take_request(&self) -> Option<PromptRequest> {
        self.exchange.borrow_mut().request.take()
    }

    /// Stores the answer for the next matching request.
    pub fn answer(&self, answer: Answer) {
        self.exchange.borrow_mut().answer = Some(answer);
    }
}

impl Prompter for DialogPrompter {
    fn request_text(&mut self, prompt: &str) -> Option<String> {
        let mut ex = self.exchange.borrow_mut();
        if let Some(Answer::Text(text)) = ex.answer.take() {
            return Some(text);
        }
        ex.request = Some(PromptRequest::Text { prompt: prompt.to_string() });
        None
    }

    fn request_color(&mut self, title: &str, current: Rgba) -> Option<Rgba> {
        let mut ex = self.exchange.borrow_mut();
        if let Some(Answer::Color(color)) = ex.answer.take() {
            return Some(color);
        }
        ex.request = Some(PromptRequest::Color { title: title.to_string(), current });
        None
    }
}

// ── PromptDialog ──────────────────────────────────────────────────────────

/// Outcome of one event delivered to an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// Nothing visible changed.
    Unchanged,
    /// The field or error line changed; the dialog stays open.
    Changed,
    /// Confirmed with a valid value.
    Submit(Answer),
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
struct DialogLayout {
    panel: Rect,
    field: Rect,
    swatch: Option<Rect>,
    ok: Rect,
    cancel: Rect,
}

impl DialogLayout {
    fn new(with_swatch: bool) -> Self {
        let panel = Rect::new(ORIGIN.x, ORIGIN.y, WIDTH, HEIGHT);
        let inner_w = WIDTH - 2.0 * PAD;
        let field_y = panel.origin.y + PAD + FONT_SIZE + 12.0;

        let (field, swatch) = if with_swatch {
            let field = Rect::new(panel.origin.x + PAD, field_y, inner_w - FIELD_HEIGHT - 8.0, FIELD_HEIGHT);
            let swatch = Rect::new(panel.right() - PAD - FIELD_HEIGHT, field_y, FIELD_HEIGHT, FIELD_HEIGHT);
            (field, Some(swatch))
        } else {
            (Rect::new(panel.origin.x + PAD, field_y, inner_w, FIELD_HEIGHT), None)
        };

        let button_y = panel.bottom() - PAD - BUTTON_HEIGHT;
        let cancel = Rect::new(panel.right() - PAD - BUTTON_WIDTH, button_y, BUTTON_WIDTH, BUTTON_HEIGHT);
        let ok = Rect::new(cancel.origin.x - 8.0 - BUTTON_WIDTH, button_y, BUTTON_WIDTH, BUTTON_HEIGHT);

        Self { panel, field, swatch, ok, cancel }
    }
}

/// Single-field modal asking for a radius or a color.
///
/// Type to edit, Backspace deletes, Enter or OK confirms, Escape or Cancel
/// closes. Color prompts start from the current color and stay open with an
/// error line until the text parses. While open it takes every event.
pub struct PromptDialog {
    request: PromptRequest,
    /// Command to run again once the answer is known.
    command: Command,
    text: String,
    error: Option<String>,
    layout: DialogLayout,
}

impl PromptDialog {
    pub fn new(request: PromptRequest, command: Command) -> Self {
        let (text, with_swatch) = match &request {
            PromptRequest::Text { .. } => (String::new(), false),
            PromptRequest::Color { current, .. } => (current.to_string(), true),
        };
        Self { request, command, text, error: None, layout: DialogLayout::new(with_swatch) }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn on_event(&mut self, event: &UiEvent) -> DialogResult {
        match event {
            UiEvent::TextInput { text } => {
                let room = MAX_INPUT_CHARS.saturating_sub(self.text.chars().count());
                let before = self.text.len();
                self.text.extend(text.chars().take(room));
                if self.text.len() == before {
                    return DialogResult::Unchanged;
                }
                self.error = None;
                DialogResult::Changed
            }
            UiEvent::KeyPress { key: Key::Backspace, .. } => {
                if self.text.pop().is_none() {
                    return DialogResult::Unchanged;
                }
                self.error = None;
                DialogResult::Changed
            }
            UiEvent::KeyPress { key: Key::Enter, .. } => self.submit(),
            UiEvent::KeyPress { key: Key::Escape, .. } => DialogResult::Cancel,
            UiEvent::Click { pos } if self.layout.ok.contains(*pos) => self.submit(),
            UiEvent::Click { pos } if self.layout.cancel.contains(*pos) => DialogResult::Cancel,
            UiEvent::Click { .. } | UiEvent::Hover { .. } | UiEvent::KeyPress { .. } => {
                DialogResult::Unchanged
            }
        }
    }

    /// Empty input cancels, like dismissing the prompt.
    fn submit(&mut self) -> DialogResult {
        let text = self.text.trim();
        if text.is_empty() {
            return DialogResult::Cancel;
        }
        match &self.request {
            PromptRequest::Text { .. } => DialogResult::Submit(Answer::Text(text.to_string())),
            PromptRequest::Color { .. } => match text.parse::<Rgba>() {
                Ok(color) => DialogResult::Submit(Answer::Color(color)),
                Err(e) => {
                    log::debug!("{e}");
                    self.error = Some(e.to_string());
                    DialogResult::Changed
                }
            },
        }
    }

    /// Color shown in the swatch: the typed color once it parses.
    fn preview(&self) -> Option<Rgba> {
        match &self.request {
            PromptRequest::Text { .. } => None,
            PromptRequest::Color { current, .. } => Some(self.text.parse().unwrap_or(*current)),
        }
    }

    pub fn paint(&self, painter: &mut Painter<'_>, window: Vec2) {
        let l = &self.layout;
        let below_bar = Rect::new(0.0, BAR_HEIGHT, window.x, (window.y - BAR_HEIGHT).max(0.0));
        painter.fill_rect(below_bar, paint_color(SHADE));

        painter.fill_rect(l.panel.inset(-1.0, -1.0), paint_color(BORDER));
        painter.fill_rect(l.panel, paint_color(PANEL_BG));

        let title = match &self.request {
            PromptRequest::Text { prompt } => prompt,
            PromptRequest::Color { title, .. } => title,
        };
        painter.text(title, FONT_SIZE, paint_color(LABEL), Vec2::new(l.panel.origin.x + PAD, l.panel.origin.y + PAD));

        painter.fill_rect(l.field.inset(-1.0, -1.0), paint_color(FOCUS));
        painter.fill_rect(l.field, paint_color(FIELD_BG));
        let line = painter.measure_text(&self.text, FONT_SIZE);
        let text_y = l.field.origin.y + ((l.field.size.y - line.y) / 2.0).max(0.0);
        painter.text(&self.text, FONT_SIZE, paint_color(LABEL), Vec2::new(l.field.origin.x + 6.0, text_y));

        // Caret after the last character.
        let caret_x = (l.field.origin.x + 7.0 + line.x).min(l.field.right() - 3.0);
        painter.fill_rect(Rect::new(caret_x, l.field.origin.y + 4.0, 1.5, l.field.size.y - 8.0), paint_color(FOCUS));

        if let (Some(swatch), Some(color)) = (l.swatch, self.preview()) {
            painter.fill_rect(swatch.inset(-1.0, -1.0), paint_color(BORDER));
            painter.fill_rect(swatch, paint_color(color));
        }

        if let Some(error) = &self.error {
            let y = l.field.bottom() + 4.0;
            painter.text(error, FONT_SIZE * 0.8, paint_color(ERROR), Vec2::new(l.field.origin.x, y));
        }

        button(painter, "OK", l.ok);
        button(painter, "Cancel", l.cancel);
    }
}

fn button(painter: &mut Painter<'_>, text: &str, rect: Rect) {
    painter.fill_rect(rect.inset(-1.0, -1.0), paint_color(BORDER));
    painter.fill_rect(rect, paint_color(BUTTON_BG));
    let size = painter.measure_text(text, FONT_SIZE);
    let origin = Vec2::new(
        rect.origin.x + ((rect.size.x - size.x) / 2.0).max(0.0),
        rect.origin.y + ((rect.size.y - size.y) / 2.0).max(0.0),
    );
    painter.text(text, FONT_SIZE, paint_color(LABEL), origin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballworld_engine::draw::{DrawCmd, DrawList};
    use ballworld_engine::input::Modifiers;
    use ballworld_engine::text::FontSystem;

    use crate::pen::{ColorChoice, RadiusChoice};

    fn radius_dialog() -> PromptDialog {
        let request = PromptRequest::Text { prompt: "Please input a value:".to_string() };
        PromptDialog::new(request, Command::Radius(RadiusChoice::Custom))
    }

    fn color_dialog(current: Rgba) -> PromptDialog {
        let request = PromptRequest::Color { title: "Choose Circle Color".to_string(), current };
        PromptDialog::new(request, Command::BallColor(ColorChoice::Custom))
    }

    fn key(key: Key) -> UiEvent {
        UiEvent::KeyPress { key, modifiers: Modifiers::default() }
    }

    fn typed(text: &str) -> UiEvent {
        UiEvent::TextInput { text: text.to_string() }
    }

    fn click(pos: Vec2) -> UiEvent {
        UiEvent::Click { pos }
    }

    fn center(r: Rect) -> Vec2 {
        Vec2::new(r.origin.x + r.size.x / 2.0, r.origin.y + r.size.y / 2.0)
    }

    #[test]
    fn prompter_records_then_answers() {
        let shared = DialogPrompter::new();
        let mut prompter = shared.clone();

        assert_eq!(prompter.request_text("Please input a value:"), None);
        assert_eq!(
            shared.take_request(),
            Some(PromptRequest::Text { prompt: "Please input a value:".to_string() })
        );
        assert_eq!(shared.take_request(), None);

        shared.answer(Answer::Text("42".to_string()));
        assert_eq!(prompter.request_text("Please input a value:").as_deref(), Some("42"));
        assert_eq!(shared.take_request(), None);
    }

    #[test]
    fn answer_of_the_wrong_kind_is_not_used() {
        let shared = DialogPrompter::new();
        let mut prompter = shared.clone();
        shared.answer(Answer::Text("42".to_string()));

        assert_eq!(prompter.request_color("Pick", Rgba::RED), None);
        assert!(matches!(shared.take_request(), Some(PromptRequest::Color { current: Rgba::RED, .. })));
    }

    #[test]
    fn typing_backspace_and_enter() {
        let mut d = radius_dialog();
        assert_eq!(d.on_event(&typed("4")), DialogResult::Changed);
        assert_eq!(d.on_event(&typed("7")), DialogResult::Changed);
        assert_eq!(d.on_event(&key(Key::Backspace)), DialogResult::Changed);
        assert_eq!(d.on_event(&typed("2")), DialogResult::Changed);
        assert_eq!(d.text(), "42");
        assert_eq!(d.on_event(&key(Key::Enter)), DialogResult::Submit(Answer::Text("42".to_string())));
        assert_eq!(d.command(), Command::Radius(RadiusChoice::Custom));
    }

    #[test]
    fn backspace_on_empty_field_changes_nothing() {
        let mut d = radius_dialog();
        assert_eq!(d.on_event(&key(Key::Backspace)), DialogResult::Unchanged);
    }

    #[test]
    fn input_is_capped() {
        let mut d = radius_dialog();
        d.on_event(&typed(&"9".repeat(40)));
        assert_eq!(d.text().len(), MAX_INPUT_CHARS);
        assert_eq!(d.on_event(&typed("9")), DialogResult::Unchanged);
    }

    #[test]
    fn escape_and_empty_enter_cancel() {
        let mut d = radius_dialog();
        assert_eq!(d.on_event(&key(Key::Enter)), DialogResult::Cancel);
        d.on_event(&typed("5"));
        assert_eq!(d.on_event(&key(Key::Escape)), DialogResult::Cancel);
    }

    #[test]
    fn color_starts_from_current_and_rejects_garbage() {
        let mut d = color_dialog(Rgba::RED);
        assert_eq!(d.text(), "#ff0000ff");

        for _ in 0..d.text().len() {
            d.on_event(&key(Key::Backspace));
        }
        d.on_event(&typed("purple"));
        assert_eq!(d.on_event(&key(Key::Enter)), DialogResult::Changed);
        assert!(d.error.is_some());

        // Editing clears the error.
        for _ in 0.."purple".len() {
            d.on_event(&key(Key::Backspace));
        }
        assert!(d.error.is_none());
        d.on_event(&typed("0,0,255"));
        assert_eq!(d.on_event(&key(Key::Enter)), DialogResult::Submit(Answer::Color(Rgba::BLUE)));
    }

    #[test]
    fn buttons_and_outside_clicks() {
        let mut d = radius_dialog();
        d.on_event(&typed("10"));
        assert_eq!(d.on_event(&click(Vec2::new(5.0, 480.0))), DialogResult::Unchanged);
        assert_eq!(d.on_event(&click(center(d.layout.field))), DialogResult::Unchanged);
        assert_eq!(d.on_event(&click(center(d.layout.cancel))), DialogResult::Cancel);
        assert_eq!(d.on_event(&click(center(d.layout.ok))), DialogResult::Submit(Answer::Text("10".to_string())));
    }

    #[test]
    fn layout_fits_inside_the_panel() {
        let l = DialogLayout::new(true);
        let swatch = l.swatch.unwrap();
        assert!(l.field.right() < swatch.origin.x);
        assert!(swatch.right() <= l.panel.right() - PAD);
        assert!(l.ok.right() < l.cancel.origin.x);
        assert!(l.field.bottom() < l.ok.origin.y);
        assert!(l.cancel.bottom() <= l.panel.bottom());
    }

    #[test]
    fn swatch_previews_typed_color() {
        let mut d = color_dialog(Rgba::RED);
        assert_eq!(d.preview(), Some(Rgba::RED));
        for _ in 0..d.text().len() {
            d.on_event(&key(Key::Backspace));
        }
        d.on_event(&typed("#00ff00"));
        assert_eq!(d.preview(), Some(Rgba::GREEN));
        assert_eq!(radius_dialog().preview(), None);
    }

    #[test]
    fn paint_shades_the_canvas_and_draws_controls() {
        let d = color_dialog(Rgba::BLUE);
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        d.paint(&mut Painter::new(&mut list, &fonts, None), Vec2::new(500.0, 500.0));

        let rects: Vec<Rect> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // Shade covers the canvas but not the menu bar.
        assert_eq!(rects[0], Rect::new(0.0, BAR_HEIGHT, 500.0, 500.0 - BAR_HEIGHT));
        assert!(rects.contains(&d.layout.swatch.unwrap()));
        assert!(rects.contains(&d.layout.ok));
        assert!(rects.contains(&d.layout.cancel));
    }
}
