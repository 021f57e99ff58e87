//! Tagged binary encoding of a [`Scene`].
//!
//! Every value starts with a one-byte tag so a reader can tell a truncated or
//! foreign file from a valid one without trusting its length:
//!
//! | Tag | Value    | Payload                                         |
//! |-----|----------|-------------------------------------------------|
//! | `S` | sequence | `u64` LE count, then `count` tagged values      |
//! | `P` | point    | `i32` LE x, `i32` LE y                          |
//! | `C` | color    | r, g, b, a                                      |
//! | `I` | integer  | `i64` LE                                        |
//! | `B` | ball     | tagged color, tagged point, tagged integer      |
//!
//! A file is exactly five values with no header: positions (`S` of `P`),
//! background (`C`), active color (`C`), active radius (`I`) and balls
//! (`S` of `B`).

use crate::ball::{Ball, Point};
use crate::color::Rgba;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::scene::Scene;

pub(crate) const TAG_SEQ: u8 = b'S';
pub(crate) const TAG_POINT: u8 = b'P';
pub(crate) const TAG_COLOR: u8 = b'C';
pub(crate) const TAG_INT: u8 = b'I';
pub(crate) const TAG_BALL: u8 = b'B';

// Smallest encoded size of one element, used to reject absurd counts early.
const POINT_LEN: usize = 1 + 4 + 4;
const COLOR_LEN: usize = 1 + 4;
const INT_LEN: usize = 1 + 8;
const BALL_LEN: usize = 1 + COLOR_LEN + POINT_LEN + INT_LEN;

// First point of the leading positions sequence.
const POSITIONS_AT: usize = 1 + 8;

pub(crate) fn encode(scene: &Scene) -> Vec<u8> {
    let mut w = Writer::default();
    w.seq(&scene.positions, |w, p| w.point(*p));
    w.color(scene.background);
    w.color(scene.active_color);
    w.int(i64::from(scene.active_radius));
    w.seq(&scene.balls, |w, b| w.ball(b));
    w.buf
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Scene, DecodeError> {
    let mut r = Reader::new(bytes);

    let positions = r.seq(POINT_LEN, Reader::point)?;
    let background = r.color()?;
    let active_color = r.color()?;
    let active_radius = r.radius()?;
    let balls_at = r.pos;
    let balls = r.seq(BALL_LEN, Reader::ball)?;
    r.finish()?;

    if positions.len() != balls.len() {
        return Err(DecodeError::new(
            DecodeErrorKind::LengthMismatch { positions: positions.len(), balls: balls.len() },
            balls_at,
        ));
    }

    if let Some(index) = positions.iter().zip(&balls).position(|(p, b)| *p != b.origin) {
        return Err(DecodeError::new(
            DecodeErrorKind::OriginMismatch { index },
            POSITIONS_AT + index * POINT_LEN,
        ));
    }

    Ok(Scene { balls, positions, background, active_color, active_radius })
}

// ── writer ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn int(&mut self, v: i64) {
        self.buf.push(TAG_INT);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn color(&mut self, c: Rgba) {
        self.buf.push(TAG_COLOR);
        self.buf.extend_from_slice(&c.to_array());
    }

    fn point(&mut self, p: Point) {
        self.buf.push(TAG_POINT);
        self.buf.extend_from_slice(&p.x.to_le_bytes());
        self.buf.extend_from_slice(&p.y.to_le_bytes());
    }

    fn ball(&mut self, b: &Ball) {
        self.buf.push(TAG_BALL);
        self.color(b.color);
        self.point(b.origin);
        self.int(i64::from(b.radius));
    }

    fn seq<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.buf.push(TAG_SEQ);
        self.buf.extend_from_slice(&(items.len() as u64).to_le_bytes());
        for item in items {
            each(self, item);
        }
    }
}

// ── reader ────────────────────────────────────────────────────────────────

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        if self.remaining() < N {
            return Err(self.error(DecodeErrorKind::Truncated));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    fn tag(&mut self, expected: u8) -> Result<(), DecodeError> {
        let start = self.pos;
        let [found] = self.take::<1>()?;
        if found != expected {
            return Err(DecodeError::new(DecodeErrorKind::UnexpectedTag { expected, found }, start));
        }
        Ok(())
    }

    fn int(&mut self) -> Result<i64, DecodeError> {
        self.tag(TAG_INT)?;
        Ok(i64::from_le_bytes(self.take::<8>()?))
    }

    fn radius(&mut self) -> Result<u32, DecodeError> {
        let start = self.pos;
        let v = self.int()?;
        u32::try_from(v).map_err(|_| DecodeError::new(DecodeErrorKind::RadiusOutOfRange(v), start))
    }

    fn color(&mut self) -> Result<Rgba, DecodeError> {
        self.tag(TAG_COLOR)?;
        Ok(Rgba::from_array(self.take::<4>()?))
    }

    fn point(&mut self) -> Result<Point, DecodeError> {
        self.tag(TAG_POINT)?;
        let x = i32::from_le_bytes(self.take::<4>()?);
        let y = i32::from_le_bytes(self.take::<4>()?);
        Ok(Point::new(x, y))
    }

    fn ball(&mut self) -> Result<Ball, DecodeError> {
        self.tag(TAG_BALL)?;
        let color = self.color()?;
        let origin = self.point()?;
        let radius = self.radius()?;
        Ok(Ball::new(color, origin, radius))
    }

    fn seq<T>(
        &mut self,
        min_item_len: usize,
        mut each: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        self.tag(TAG_SEQ)?;
        let count = u64::from_le_bytes(self.take::<8>()?);
        if count > (self.remaining() / min_item_len) as u64 {
            return Err(self.error(DecodeErrorKind::Truncated));
        }
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(each(self)?);
        }
        Ok(items)
    }

    fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(self.error(DecodeErrorKind::TrailingBytes(n))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        let mut scene = Scene::new();
        scene.place_ball(150, 150);
        scene.set_active_color(Rgba::new(1, 2, 3, 4));
        scene.set_active_radius(7);
        scene.place_ball(-20, 5);
        scene.set_background(Rgba::GREEN);
        scene
    }

    #[test]
    fn empty_scene_layout() {
        let bytes = encode(&Scene::new());
        let mut expected = vec![TAG_SEQ];
        expected.extend_from_slice(&0u64.to_le_bytes());
        expected.extend_from_slice(&[TAG_COLOR, 0, 0, 0, 255]);
        expected.extend_from_slice(&[TAG_COLOR, 255, 0, 0, 255]);
        expected.push(TAG_INT);
        expected.extend_from_slice(&100i64.to_le_bytes());
        expected.push(TAG_SEQ);
        expected.extend_from_slice(&0u64.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let scene = sample();
        assert_eq!(decode(&encode(&scene)), Ok(scene));
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(&sample()), encode(&sample()));
    }

    #[test]
    fn every_truncation_is_rejected() {
        let bytes = encode(&sample());
        for len in 0..bytes.len() {
            let err = decode(&bytes[..len]).unwrap_err();
            assert_eq!(err.kind, DecodeErrorKind::Truncated, "prefix of {len} bytes");
        }
    }

    #[test]
    fn wrong_leading_tag() {
        let mut bytes = encode(&sample());
        bytes[0] = TAG_BALL;
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.offset, 0);
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedTag { expected: TAG_SEQ, found: TAG_BALL });
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&sample());
        let len = bytes.len();
        bytes.push(0);
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::new(DecodeErrorKind::TrailingBytes(1), len));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut bytes = encode(&Scene::new());
        // seq(9) + color(5) + color(5) puts the radius tag at 19.
        assert_eq!(bytes[19], TAG_INT);
        bytes[20..28].copy_from_slice(&(-3i64).to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::new(DecodeErrorKind::RadiusOutOfRange(-3), 19));
    }

    #[test]
    fn huge_count_fails_without_allocating() {
        let mut bytes = vec![TAG_SEQ];
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Truncated);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut scene = sample();
        scene.positions.pop();
        let err = decode(&encode(&scene)).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::LengthMismatch { positions: 1, balls: 2 });
    }

    #[test]
    fn position_must_match_its_ball() {
        let mut scene = sample();
        scene.positions[1] = Point::new(9999, -9999);
        let err = decode(&encode(&scene)).unwrap_err();
        assert_eq!(err, DecodeError::new(DecodeErrorKind::OriginMismatch { index: 1 }, 9 + 9));
    }
}
