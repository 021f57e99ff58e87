use ballworld_engine::coords::{Rect, Vec2};
use ballworld_engine::draw::DrawList;
use ballworld_engine::paint::Color;
use ballworld_engine::text::{FontId, FontSystem};
use ballworld_scene::Rgba;

/// Average glyph advance, as a fraction of the font size, used when no font
/// is loaded.
const NO_FONT_ADVANCE: f32 = 0.55;

/// Converts a scene color (straight-alpha sRGB bytes) into a render color.
#[inline]
pub fn paint_color(c: Rgba) -> Color {
    Color::from_srgb_u8(c.r, c.g, c.b, c.a)
}

/// Size of one line of text. Without a font the width is estimated from the
/// character count so layout still works; nothing is drawn in that case.
pub fn measure_text(fonts: &FontSystem, font: Option<FontId>, text: &str, size: f32) -> Vec2 {
    match font {
        Some(id) => fonts.measure_text(text, id, size),
        None => Vec2::new(text.chars().count() as f32 * size * NO_FONT_ADVANCE, size),
    }
}

/// Drawing surface handed to the canvas and the menu bar.
///
/// Wraps the engine's `DrawList`; commands are painted in the order they are
/// recorded.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    font: Option<FontId>,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, font: Option<FontId>) -> Self {
        Self { draw_list, fonts, font }
    }

    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        measure_text(self.fonts, self.font, text, size)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_list.push_rect(rect, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw_list.push_disc(center, radius, color);
    }

    /// Single-line text with its top-left at `origin`. Dropped when no font
    /// is loaded.
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2) {
        match self.font {
            Some(font) => self.draw_list.push_text(text, font, size, color, origin),
            None => log::trace!("no font loaded, skipping {text:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballworld_engine::draw::DrawCmd;

    #[test]
    fn primary_colors_map_to_linear_extremes() {
        let close = |a: Color, b: [f32; 4]| a.to_array().iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
        assert!(close(paint_color(Rgba::RED), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(paint_color(Rgba::BLACK), [0.0, 0.0, 0.0, 1.0]));
        assert!(close(paint_color(Rgba::new(0, 0, 255, 0)), [0.0; 4]));
    }

    #[test]
    fn shapes_are_recorded_in_order() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, None);

        p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), paint_color(Rgba::BLUE));
        p.fill_circle(Vec2::new(5.0, 5.0), 3.0, paint_color(Rgba::RED));

        let cmds: Vec<&DrawCmd> = list.iter().collect();
        assert!(matches!(cmds[0], DrawCmd::Rect { .. }));
        assert!(matches!(cmds[1], DrawCmd::Disc { radius, .. } if *radius == 3.0));
    }

    #[test]
    fn text_without_font_is_measured_but_not_drawn() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, None);

        let size = p.measure_text("File", 10.0);
        assert_eq!(size, Vec2::new(4.0 * 10.0 * NO_FONT_ADVANCE, 10.0));

        p.text("File", 10.0, Color::from_premul(1.0, 1.0, 1.0, 1.0), Vec2::zero());
        assert!(list.is_empty());
    }
}
