use std::fmt;
use std::io::Write;

use glam::DVec2;

use crate::utils::write_png_rgba8;

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(f64::from(self.w), f64::from(self.h))
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    fn pixel_count(self) -> usize {
        self.w as usize * self.h as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// An immutable RGBA8 image.
///
/// Rows are tightly packed, top to bottom.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    size: Size,
    pixels: Vec<u8>,
}

impl CapturedImage {
    /// Builds an image by evaluating `f` at every pixel.
    pub fn from_fn(size: Size, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(size.pixel_count() * 4);
        for y in 0..size.h {
            for x in 0..size.w {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self { size, pixels }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= i64::from(self.size.w) || y >= i64::from(self.size.h) {
            return None;
        }

        let idx = (y as usize * self.size.w as usize + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn write_png(&self, w: impl Write) -> Result<(), png::EncodingError> {
        write_png_rgba8(w, self.size.w, self.size.h, &self.pixels)
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
