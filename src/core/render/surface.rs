//=========================================================================
// Render Surface
//=========================================================================
//
// Rectangular RGBA pixel buffer with a recorded screen offset.
//
// A camera allocates one surface per frame, objects paint into it, the
// post-process hook may edit it in place, and the display copies it to
// screen at `(x, y)`. Surfaces are discarded after that.
//
// All drawing operations clip to the surface bounds; out-of-range
// coordinates are silently ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::{Rgba, RgbaImage};

//=== Internal Dependencies ===============================================

use super::Color;

//=== RenderSurface =======================================================

#[derive(Debug, Clone)]
pub struct RenderSurface {
    x: i32,
    y: i32,
    pixels: RgbaImage,
}

impl RenderSurface {
    //--- Construction -----------------------------------------------------

    /// Creates a fully transparent surface of `width` x `height` pixels
    /// positioned at `(x, y)` in screen space.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            pixels: RgbaImage::new(width, height),
        }
    }

    //--- Geometry ---------------------------------------------------------

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    //--- Pixel Access -----------------------------------------------------

    /// Returns the pixel at `(x, y)` or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }

    /// Overwrites a single pixel (no blending).
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = self.to_local(x, y) {
            self.pixels.put_pixel(x, y, color.into());
        }
    }

    /// Overwrites every pixel of the rectangle `(x, y, width, height)` with
    /// `color`. The rectangle is clipped to the surface.
    pub fn set_pixels(&mut self, color: Color, x: i32, y: i32, width: u32, height: u32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };
        let px: Rgba<u8> = color.into();
        for py in y0..y1 {
            for col in x0..x1 {
                self.pixels.put_pixel(col, py, px);
            }
        }
    }

    /// Composites `color` over the rectangle `(x, y, width, height)`.
    pub fn fill_rect(&mut self, color: Color, x: i32, y: i32, width: u32, height: u32) {
        if color.is_opaque() {
            return self.set_pixels(color, x, y, width, height);
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };
        for py in y0..y1 {
            for col in x0..x1 {
                let dst = self.pixels.get_pixel_mut(col, py);
                *dst = color.over(Color::from(*dst)).into();
            }
        }
    }

    /// Overwrites the whole surface with `color`.
    pub fn fill(&mut self, color: Color) {
        let (w, h) = (self.width(), self.height());
        self.set_pixels(color, 0, 0, w, h);
    }

    /// Composites `source` onto this surface with its top-left corner at
    /// `(x, y)` (in this surface's local coordinates).
    pub fn draw_surface(&mut self, source: &RenderSurface, x: i32, y: i32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, source.width(), source.height()) else {
            return;
        };
        for dy in y0..y1 {
            for dx in x0..x1 {
                // clip() guarantees these are inside `source`
                let sx = (dx as i64 - x as i64) as u32;
                let sy = (dy as i64 - y as i64) as u32;
                let src = Color::from(*source.pixels.get_pixel(sx, sy));
                let dst = self.pixels.get_pixel_mut(dx, dy);
                *dst = src.over(Color::from(*dst)).into();
            }
        }
    }

    /// Read access to the backing image.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutable access to the backing image (e.g. for post-processing).
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    //--- Internal Helpers -------------------------------------------------

    fn to_local(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Intersects a rectangle with the surface; returns `[x0, x1) x [y0, y1)`.
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + width as i64).min(self.width() as i64);
        let y1 = (y as i64 + height as i64).min(self.height() as i64);

        (x0 < x1 && y0 < y1).then(|| (x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
