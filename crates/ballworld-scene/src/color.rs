use std::fmt;
use std::str::FromStr;

/// Straight-alpha sRGB color with one byte per channel.
///
/// This is the color stored in balls and pen settings and written to drawing
/// files. Renderers convert it to their own representation at paint time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Error returned when text does not describe a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}': expected #rrggbb, #rrggbbaa or r,g,b[,a]", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// Accepted forms: `#rrggbb`, `#rrggbbaa`, `r,g,b` and `r,g,b,a` (decimal,
/// each 0–255). Surrounding whitespace is ignored. Alpha defaults to 255.
impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let err = || ColorParseError(text.to_string());

        if let Some(hex) = text.strip_prefix('#') {
            if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            let a = if hex.len() == 8 { channel(6)? } else { 255 };
            return Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, a));
        }

        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(err());
        }
        let mut channels = [255u8; 4];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| err())?;
        }
        Ok(Rgba::from_array(channels))
    }
}
