use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// One recorded draw command. Geometry is in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect { rect: Rect, color: Color },
    Disc { center: Vec2, radius: f32, color: Color },
    /// Single-line text; `origin` is the top-left of the line box.
    Text { text: String, font: FontId, size: f32, color: Color, origin: Vec2 },
}

/// Recorded draw stream for a frame.
///
/// `push_*` is O(1); `clear` keeps the allocation for the next frame.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Commands in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    /// Empty rects are dropped.
    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Rect { rect, color });
    }

    /// Zero-radius discs are recorded; renderers skip them.
    pub fn push_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Disc { center, radius, color });
    }

    pub fn push_text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Text { text, font, size, color, origin });
    }
}
