use crate::ball::{Ball, Point};
use crate::codec;
use crate::color::Rgba;
use crate::error::DecodeError;

/// Radius applied to new balls until the user picks another one.
pub const DEFAULT_RADIUS: u32 = 100;

/// Everything a drawing consists of: placed balls plus the current pen.
///
/// Invariants:
/// - `positions[i] == balls[i].origin` for every index; both grow and shrink together
/// - insertion order is paint order (later balls are drawn on top)
/// - balls are never modified after placement; pen changes only affect future balls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub(crate) balls: Vec<Ball>,
    pub(crate) positions: Vec<Point>,
    pub(crate) background: Rgba,
    pub(crate) active_color: Rgba,
    pub(crate) active_radius: u32,
}

impl Scene {
    /// Empty canvas: black background, red pen, radius 100.
    pub fn new() -> Self {
        Self {
            balls: Vec::new(),
            positions: Vec::new(),
            background: Rgba::BLACK,
            active_color: Rgba::RED,
            active_radius: DEFAULT_RADIUS,
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Balls in paint order.
    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Top-left draw origins, parallel to [`balls`](Self::balls).
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[inline]
    pub fn background(&self) -> Rgba {
        self.background
    }

    #[inline]
    pub fn active_color(&self) -> Rgba {
        self.active_color
    }

    #[inline]
    pub fn active_radius(&self) -> u32 {
        self.active_radius
    }

    // ── mutations ─────────────────────────────────────────────────────────

    /// Places a ball centered on the click point using the current pen.
    ///
    /// No bounds checking: a ball may lie partly or fully off-canvas.
    pub fn place_ball(&mut self, click_x: i32, click_y: i32) -> Ball {
        let origin = Point::new(click_x, click_y).offset_back(self.active_radius);
        let ball = Ball::new(self.active_color, origin, self.active_radius);
        self.positions.push(origin);
        self.balls.push(ball);
        ball
    }

    /// Removes every ball. Pen settings are kept.
    pub fn clear(&mut self) {
        self.balls.clear();
        self.positions.clear();
    }

    #[inline]
    pub fn set_active_color(&mut self, color: Rgba) {
        self.active_color = color;
    }

    #[inline]
    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    #[inline]
    pub fn set_active_radius(&mut self, radius: u32) {
        self.active_radius = radius;
    }

    // ── persistence ───────────────────────────────────────────────────────

    /// Encodes positions, background, active color, active radius and balls,
    /// in that order. See the codec module for the byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Decodes a drawing into a new scene.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        codec::decode(bytes)
    }

    /// Replaces every field with the decoded drawing.
    ///
    /// The whole stream is decoded before anything is assigned, so on error
    /// the scene is exactly as it was.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        *self = codec::decode(bytes)?;
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    #[test]
    fn defaults() {
        let scene = Scene::new();
        assert!(scene.balls().is_empty());
        assert!(scene.positions().is_empty());
        assert_eq!(scene.background(), Rgba::BLACK);
        assert_eq!(scene.active_color(), Rgba::RED);
        assert_eq!(scene.active_radius(), 100);
    }

    #[test]
    fn place_ball_subtracts_radius() {
        let mut scene = Scene::new();
        scene.set_active_radius(30);
        scene.set_active_color(Rgba::GREEN);
        let ball = scene.place_ball(40, 10);

        assert_eq!(ball, Ball::new(Rgba::GREEN, Point::new(10, -20), 30));
        assert_eq!(scene.balls(), &[ball]);
        assert_eq!(scene.positions(), &[Point::new(10, -20)]);
    }

    #[test]
    fn pen_changes_do_not_touch_existing_balls() {
        let mut scene = Scene::new();
        let first = scene.place_ball(150, 150);
        scene.set_active_color(Rgba::BLUE);
        scene.set_active_radius(5);
        scene.place_ball(0, 0);

        assert_eq!(scene.balls()[0], first);
        assert_eq!(scene.balls()[1], Ball::new(Rgba::BLUE, Point::new(-5, -5), 5));
    }

    #[test]
    fn zero_radius_ball_sits_on_click_point() {
        let mut scene = Scene::new();
        scene.set_active_radius(0);
        assert_eq!(scene.place_ball(7, 8).origin, Point::new(7, 8));
    }

    #[test]
    fn clear_keeps_pen_state() {
        let mut scene = Scene::new();
        scene.set_background(Rgba::GREEN);
        scene.set_active_color(Rgba::BLUE);
        scene.set_active_radius(42);
        scene.place_ball(1, 2);
        scene.place_ball(3, 4);

        scene.clear();

        assert!(scene.balls().is_empty());
        assert!(scene.positions().is_empty());
        assert_eq!(scene.background(), Rgba::GREEN);
        assert_eq!(scene.active_color(), Rgba::BLUE);
        assert_eq!(scene.active_radius(), 42);
    }

    #[test]
    fn round_trip_after_mixed_operations() {
        let mut scene = Scene::new();
        scene.place_ball(10, 10);
        scene.clear();
        scene.set_active_radius(500);
        scene.place_ball(250, 250);
        scene.set_background(Rgba::new(9, 8, 7, 6));
        scene.set_active_color(Rgba::WHITE);

        let restored = Scene::from_bytes(&scene.to_bytes()).unwrap();
        assert_eq!(restored, scene);
    }

    #[test]
    fn load_replaces_all_fields() {
        let mut saved = Scene::new();
        saved.set_background(Rgba::BLUE);
        saved.place_ball(100, 100);
        let bytes = saved.to_bytes();

        let mut scene = Scene::new();
        scene.set_active_radius(3);
        scene.place_ball(1, 1);
        scene.place_ball(2, 2);
        scene.load_bytes(&bytes).unwrap();

        assert_eq!(scene, saved);
    }

    #[test]
    fn failed_load_leaves_scene_untouched() {
        let mut scene = Scene::new();
        scene.place_ball(150, 150);
        scene.set_active_color(Rgba::BLUE);
        let before = scene.clone();

        let mut corrupt = scene.to_bytes();
        corrupt.truncate(corrupt.len() - 3);
        let err = scene.load_bytes(&corrupt).unwrap_err();

        assert_eq!(err.kind, DecodeErrorKind::Truncated);
        assert_eq!(scene, before);
    }

    #[test]
    fn load_rejects_positions_that_disagree_with_balls() {
        let mut source = Scene::new();
        source.place_ball(150, 150);
        let mut tampered = source.clone();
        tampered.positions[0] = Point::new(9999, -9999);
        let bytes = tampered.to_bytes();

        let mut scene = Scene::new();
        let err = scene.load_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::OriginMismatch { index: 0 });
        assert_eq!(scene, Scene::new());
    }

    #[test]
    fn garbage_is_rejected() {
        let mut scene = Scene::new();
        assert!(scene.load_bytes(b"not a drawing").is_err());
        assert_eq!(scene, Scene::new());
    }
}
