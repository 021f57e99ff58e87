//! Title strip with drop-down menus.
//!
//! Layout is computed once from the menu labels; the window width only
//! affects the strip background. At most one menu is open at a time.

use ballworld_engine::coords::{Rect, Vec2};
use ballworld_engine::input::Key;
use ballworld_scene::Rgba;

use crate::event::{EventResult, UiEvent};
use crate::menu::{Command, Menu};
use crate::painter::{paint_color, Painter};

pub const BAR_HEIGHT: f32 = 24.0;
pub const FONT_SIZE: f32 = 14.0;

const TITLE_PAD_X: f32 = 10.0;
const ITEM_HEIGHT: f32 = 22.0;
const ITEM_PAD_X: f32 = 12.0;
const MIN_DROPDOWN_WIDTH: f32 = 110.0;

const BAR_BG: Rgba = Rgba::opaque(236, 236, 236);
const DROPDOWN_BG: Rgba = Rgba::WHITE;
const BORDER: Rgba = Rgba::opaque(150, 150, 150);
const HIGHLIGHT: Rgba = Rgba::opaque(190, 212, 242);
const LABEL: Rgba = Rgba::BLACK;

/// Cached geometry of one menu.
#[derive(Debug, Clone, PartialEq)]
struct MenuLayout {
    title: Rect,
    dropdown: Rect,
    items: Vec<Rect>,
}

pub struct MenuBar {
    menus: Vec<Menu>,
    layout: Vec<MenuLayout>,
    open: Option<usize>,
    hover: Option<Vec2>,
}

impl MenuBar {
    /// `measure` returns the width of a label at [`FONT_SIZE`].
    pub fn new(menus: Vec<Menu>, measure: impl Fn(&str) -> f32) -> Self {
        let mut layout = Vec::with_capacity(menus.len());
        let mut x = 0.0;

        for menu in &menus {
            let title = Rect::new(x, 0.0, measure(&menu.title) + 2.0 * TITLE_PAD_X, BAR_HEIGHT);
            x = title.right();

            let widest = menu.items.iter().map(|i| measure(&i.label)).fold(0.0f32, f32::max);
            let width = (widest + 2.0 * ITEM_PAD_X).max(MIN_DROPDOWN_WIDTH);
            let items: Vec<Rect> = (0..menu.items.len())
                .map(|i| Rect::new(title.origin.x, BAR_HEIGHT + i as f32 * ITEM_HEIGHT, width, ITEM_HEIGHT))
                .collect();
            let dropdown = Rect::new(title.origin.x, BAR_HEIGHT, width, items.len() as f32 * ITEM_HEIGHT);

            layout.push(MenuLayout { title, dropdown, items });
        }

        Self { menus, layout, open: None, hover: None }
    }

    pub fn height(&self) -> f32 {
        BAR_HEIGHT
    }

    /// Index of the open menu, if any.
    pub fn open_menu(&self) -> Option<usize> {
        self.open
    }

    pub fn on_event(&mut self, event: &UiEvent) -> EventResult {
        match event {
            UiEvent::Click { pos } => self.on_click(*pos),
            UiEvent::Hover { pos } => {
                self.hover = *pos;
                let Some(open) = self.open else { return EventResult::Ignored };
                // Sliding across the strip switches menus while one is open.
                if let Some(idx) = pos.and_then(|p| self.title_at(p)) {
                    if idx != open {
                        log::trace!("menu {:?} opened by hover", self.menus[idx].title);
                        self.open = Some(idx);
                    }
                }
                EventResult::Consumed
            }
            UiEvent::KeyPress { key: Key::Escape, .. } if self.open.is_some() => {
                self.open = None;
                EventResult::Consumed
            }
            UiEvent::KeyPress { .. } | UiEvent::TextInput { .. } => EventResult::Ignored,
        }
    }

    fn on_click(&mut self, pos: Vec2) -> EventResult {
        if let Some(command) = self.item_at(pos) {
            self.open = None;
            return EventResult::Invoke(command);
        }

        if let Some(idx) = self.title_at(pos) {
            self.open = if self.open == Some(idx) { None } else { Some(idx) };
            return EventResult::Consumed;
        }

        // A click anywhere else closes the open menu without reaching the canvas.
        if pos.y < BAR_HEIGHT || self.open.is_some() {
            self.open = None;
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn title_at(&self, pos: Vec2) -> Option<usize> {
        self.layout.iter().position(|l| l.title.contains(pos))
    }

    /// Command of the open menu's item under `pos`.
    fn item_at(&self, pos: Vec2) -> Option<Command> {
        let open = self.open?;
        let idx = self.layout[open].items.iter().position(|r| r.contains(pos))?;
        Some(self.menus[open].items[idx].command)
    }

    pub fn paint(&self, painter: &mut Painter<'_>, width: f32) {
        painter.fill_rect(Rect::new(0.0, 0.0, width, BAR_HEIGHT), paint_color(BAR_BG));
        painter.fill_rect(Rect::new(0.0, BAR_HEIGHT - 1.0, width, 1.0), paint_color(BORDER));

        for (idx, (menu, layout)) in self.menus.iter().zip(&self.layout).enumerate() {
            if self.open == Some(idx) {
                painter.fill_rect(layout.title, paint_color(HIGHLIGHT));
            }
            label(painter, &menu.title, layout.title, TITLE_PAD_X);
        }

        let Some(open) = self.open else { return };
        let (menu, layout) = (&self.menus[open], &self.layout[open]);

        painter.fill_rect(layout.dropdown.inset(-1.0, -1.0), paint_color(BORDER));
        painter.fill_rect(layout.dropdown, paint_color(DROPDOWN_BG));

        for (item, rect) in menu.items.iter().zip(&layout.items) {
            if self.hover.is_some_and(|p| rect.contains(p)) {
                painter.fill_rect(*rect, paint_color(HIGHLIGHT));
            }
            label(painter, &item.label, *rect, ITEM_PAD_X);
        }
    }
}

/// Left-aligned, vertically centered label.
fn label(painter: &mut Painter<'_>, text: &str, rect: Rect, pad_x: f32) {
    let line = painter.measure_text(text, FONT_SIZE).y;
    let origin = Vec2::new(rect.origin.x + pad_x, rect.origin.y + ((rect.size.y - line) / 2.0).max(0.0));
    painter.text(text, FONT_SIZE, paint_color(LABEL), origin);
}
