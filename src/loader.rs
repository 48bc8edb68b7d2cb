//! Image decoding and scaling into a [`Bitmap`].

use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use log::debug;

use crate::core::Bitmap;

/// How to size a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageScale {
    /// Fixed factors for each axis.
    Factor { x: f32, y: f32 },
    /// Largest size that fits `width x height`, keeping the image's aspect
    /// ratio after squashing rows by `aspect`.
    Fit { width: u32, height: u32, aspect: f32 },
}

impl ImageScale {
    /// Target dimensions for an image of `width x height`.
    pub fn dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let (fx, fy) = match *self {
            ImageScale::Factor { x, y } => (x, y),
            ImageScale::Fit {
                width: vw,
                height: vh,
                aspect,
            } => {
                let f = (vw as f32 / width as f32).min(vh as f32 / (height as f32 * aspect));
                (f, f * aspect)
            }
        };
        let w = (width as f32 * fx).round().max(1.0) as u32;
        let h = (height as f32 * fy).round().max(1.0) as u32;
        (w, h)
    }
}

/// Decode `path` and scale it.
pub fn load_bitmap(path: &Path, scale: ImageScale) -> Result<Bitmap> {
    let started = Instant::now();
    let img = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?;
    debug!(
        "decoded {} ({}x{}) in {:?}",
        path.display(),
        img.width(),
        img.height(),
        started.elapsed()
    );
    to_bitmap(img, scale)
}

/// Scale an already decoded image and convert it to RGBA.
pub fn to_bitmap(img: DynamicImage, scale: ImageScale) -> Result<Bitmap> {
    let (w, h) = scale.dimensions(img.width(), img.height());
    if w == 0 || h == 0 {
        return Ok(Bitmap::default());
    }
    let img = if (w, h) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(w, h, FilterType::Triangle)
    };
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Bitmap::from_rgba8(w, h, rgba.as_raw()).ok_or_else(|| anyhow!("image buffer size mismatch"))
}
