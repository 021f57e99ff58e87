//! Pen choices offered by the Color, Background and Radius menus.

use rand::{Rng, RngCore};

use ballworld_scene::Rgba;

/// Largest radius the Random item can pick.
pub const RANDOM_RADIUS_MAX: u32 = 500;

/// How a color menu item picks its color.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorChoice {
    Preset(Rgba),
    /// Ask the user through the prompter.
    Custom,
    Random,
}

/// How a radius menu item picks its radius.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RadiusChoice {
    Preset(u32),
    /// Ask the user for a number.
    Custom,
    Random,
}

/// Opaque color with every channel uniform in 0..=255.
pub fn random_color(rng: &mut dyn RngCore) -> Rgba {
    Rgba::opaque(
        rng.gen_range(0..=u8::MAX),
        rng.gen_range(0..=u8::MAX),
        rng.gen_range(0..=u8::MAX),
    )
}

/// Radius uniform in 0..=500.
pub fn random_radius(rng: &mut dyn RngCore) -> u32 {
    rng.gen_range(0..=RANDOM_RADIUS_MAX)
}

/// Parses a typed radius. Surrounding whitespace is ignored; anything that
/// is not a non-negative integer is `None`.
pub fn parse_radius(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
