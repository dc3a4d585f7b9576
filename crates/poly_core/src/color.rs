//! Group colors
//!
//! 8-bit RGBA, which is what per-vertex color attributes carry.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GRAY: Self = Self::rgb(127, 127, 127);
    pub const SILVER: Self = Self::rgb(190, 190, 190);
    pub const PINK: Self = Self::rgb(255, 127, 127);

    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 200, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 127, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    pub const DARK_RED: Self = Self::rgb(200, 0, 0);
    pub const DARK_BLUE: Self = Self::rgb(0, 0, 200);
    pub const OLIVE: Self = Self::rgb(200, 200, 0);

    pub const CYAN: Self = Self::rgb(0, 200, 200);
    pub const MAGENTA: Self = Self::rgb(200, 0, 200);
    pub const PURPLE: Self = Self::rgb(127, 0, 255);
    pub const LIME: Self = Self::rgb(127, 255, 0);
    pub const AZURE: Self = Self::rgb(0, 127, 255);

    /// Opaque color from RGB bytes
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 3]> for Rgba8 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Rgba8::ORANGE.to_bytes(), [255, 127, 0, 255]);
        assert_eq!(Rgba8::from([1, 2, 3]), Rgba8::rgba(1, 2, 3, 255));
    }

    #[test]
    fn test_serializes_as_byte_tuple() {
        let s = ron::to_string(&Rgba8::PINK).unwrap();
        assert!(s.contains("255,127,127,255"), "got {}", s);
        let back: Rgba8 = ron::from_str("(0, 0, 200, 255)").unwrap();
        assert_eq!(back, Rgba8::DARK_BLUE);
    }
}
