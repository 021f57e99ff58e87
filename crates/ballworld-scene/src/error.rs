use std::fmt;

/// Reason a drawing file could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The stream ended in the middle of a value.
    Truncated,
    /// A value started with a different type tag than the layout requires.
    UnexpectedTag { expected: u8, found: u8 },
    /// A radius was negative or too large for `u32`.
    RadiusOutOfRange(i64),
    /// The positions and balls sequences have different lengths.
    LengthMismatch { positions: usize, balls: usize },
    /// A position differs from the origin of the ball at the same index.
    OriginMismatch { index: usize },
    /// Bytes remained after the last field.
    TrailingBytes(usize),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::Truncated => f.write_str("unexpected end of data"),
            DecodeErrorKind::UnexpectedTag { expected, found } => write!(
                f,
                "expected {} tag, found {}",
                tag_name(*expected),
                tag_name(*found)
            ),
            DecodeErrorKind::RadiusOutOfRange(v) => write!(f, "radius {v} is out of range"),
            DecodeErrorKind::LengthMismatch { positions, balls } => {
                write!(f, "{positions} positions but {balls} balls")
            }
            DecodeErrorKind::OriginMismatch { index } => {
                write!(f, "position {index} does not match its ball")
            }
            DecodeErrorKind::TrailingBytes(n) => write!(f, "{n} trailing bytes after the last field"),
        }
    }
}

fn tag_name(tag: u8) -> String {
    match tag {
        b'S' => "sequence".to_string(),
        b'P' => "point".to_string(),
        b'C' => "color".to_string(),
        b'I' => "integer".to_string(),
        b'B' => "ball".to_string(),
        other => format!("unknown (0x{other:02x})"),
    }
}

/// A decode failure from [`Scene::load_bytes`](crate::Scene::load_bytes) or
/// [`Scene::from_bytes`](crate::Scene::from_bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// Byte offset where the offending value starts.
    pub offset: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drawing decode error at byte {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for DecodeError {}
