//! Color type and the palette used by the demo scene.
//!
//! Colors are plain RGB triples in the core. The framebuffer stores them
//! packed as ARGB8888 (`0xAARRGGBB`) with an opaque alpha channel.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into ARGB8888 with full alpha.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Scales each channel by `factor`, clamped to `[0, 1]`.
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

pub const BACKGROUND: Color = Color::rgb(255, 255, 255);
pub const WIREFRAME: Color = Color::rgb(0, 0, 0);
pub const CUBE: Color = Color::rgb(70, 110, 200);
pub const TERRAIN: Color = Color::rgb(60, 140, 70);
