//=========================================================================
// Color
//=========================================================================
//
// RGBA8 color used for background fills and surface pixels.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::Rgba;

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Composites `self` over `dst` (source-over, straight alpha).
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            0 => dst,
            255 => self,
            _ => {
                let sa = self.a as u32;
                let da = dst.a as u32;
                // out_a = sa + da * (1 - sa), all in 0..=255 fixed point
                let out_a = sa * 255 + da * (255 - sa);
                if out_a == 0 {
                    return Color::TRANSPARENT;
                }
                let channel = |s: u8, d: u8| -> u8 {
                    let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
                    ((num + out_a / 2) / out_a) as u8
                };
                Color {
                    r: channel(self.r, dst.r),
                    g: channel(self.g, dst.g),
                    b: channel(self.b, dst.b),
                    a: ((out_a + 127) / 255) as u8,
                }
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

//--- image Conversions ---------------------------------------------------

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Self { r, g, b, a }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.over(Color::WHITE), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn half_alpha_blends_over_opaque() {
        let half_black = Color::rgba(0, 0, 0, 128);
        let out = half_black.over(Color::WHITE);
        assert!(out.is_opaque());
        assert!(out.r > 120 && out.r < 135, "got {:?}", out);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
    }

    #[test]
    fn rgba_conversion_preserves_channels() {
        let c = Color::rgba(1, 2, 3, 4);
        let px: Rgba<u8> = c.into();
        assert_eq!(px.0, [1, 2, 3, 4]);
        assert_eq!(Color::from(px), c);
    }
}
