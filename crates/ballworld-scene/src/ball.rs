use crate::color::Rgba;

/// Integer position on the canvas (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves the point up-left by `d` on both axes, saturating at the `i32` range.
    pub fn offset_back(self, d: u32) -> Self {
        Self { x: sub_saturating(self.x, d), y: sub_saturating(self.y, d) }
    }
}

fn sub_saturating(v: i32, d: u32) -> i32 {
    let wide = i64::from(v) - i64::from(d);
    wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// A placed circle. Never modified after creation.
///
/// `origin` is the top-left corner of the circle's bounding square, so the
/// center sits at `origin + radius` on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ball {
    pub color: Rgba,
    pub origin: Point,
    pub radius: u32,
}

impl Ball {
    #[inline]
    pub const fn new(color: Rgba, origin: Point, radius: u32) -> Self {
        Self { color, origin, radius }
    }

    /// Center in canvas coordinates, widened so large radii cannot overflow.
    pub fn center(&self) -> (i64, i64) {
        let r = i64::from(self.radius);
        (i64::from(self.origin.x) + r, i64::from(self.origin.y) + r)
    }
}
