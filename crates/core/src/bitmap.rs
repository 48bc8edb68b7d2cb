//! Bitmap - decoded, already-scaled RGBA pixels.
//!
//! The core never decodes files itself. The loader hands over raw RGBA8 data,
//! and the extractor only needs random access to single pixels.

use crate::types::Rgb;

/// One RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Pixel {
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 255 }
    }
}

/// Row-major pixel grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// A bitmap filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![pixel; len],
        }
    }

    /// Build from tightly packed RGBA8 bytes.
    ///
    /// Returns `None` if the buffer length does not match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        let len = (width as usize) * (height as usize);
        if data.len() != len * 4 {
            return None;
        }
        let pixels = data
            .chunks_exact(4)
            .map(|p| Pixel {
                rgb: Rgb::new(p[0], p[1], p[2]),
                alpha: p[3],
            })
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.pixels[i] = pixel;
                true
            }
            None => false,
        }
    }
}
