use ballworld_engine::coords::{Rect, Vec2};
use ballworld_scene::Scene;

use crate::painter::{paint_color, Painter};

/// The drawing area below the menu bar.
///
/// Scene coordinates start at the canvas' top-left corner, so window
/// positions are shifted up by `top`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Canvas {
    top: f32,
}

impl Canvas {
    pub fn new(top: f32) -> Self {
        Self { top }
    }

    /// Scene point under a window position, or `None` above the canvas.
    pub fn scene_point(&self, pos: Vec2) -> Option<(i32, i32)> {
        if pos.y < self.top || pos.x < 0.0 {
            return None;
        }
        Some((pos.x.floor() as i32, (pos.y - self.top).floor() as i32))
    }

    /// Background, then every ball in placement order.
    pub fn paint(&self, painter: &mut Painter<'_>, scene: &Scene, window: Vec2) {
        let area = Rect::new(0.0, self.top, window.x, window.y - self.top);
        painter.fill_rect(area, paint_color(scene.background()));

        for ball in scene.balls() {
            let (cx, cy) = ball.center();
            let center = Vec2::new(cx as f32, cy as f32 + self.top);
            painter.fill_circle(center, ball.radius as f32, paint_color(ball.color));
        }
    }
}
