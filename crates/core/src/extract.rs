//! Threshold extraction - turns a bitmap into a [`TargetGrid`].
//!
//! The bitmap is sampled once per grid cell, at the cell's top-left pixel
//! `(column * cell_size, row * cell_size)`. Each column is scanned top to
//! bottom, so every queue comes out ascending and duplicate-free; consumption
//! relies on that order.

use crate::bitmap::{Bitmap, Pixel};
use crate::targets::TargetGrid;
use crate::types::{Rgb, DEFAULT_THRESHOLD};

/// Samples with alpha below this are treated as background.
pub const MIN_ALPHA: u8 = 128;

/// Which sampled pixels become targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Luminance above `threshold`, or at/below it when `invert` is set.
    Brightness { threshold: u8, invert: bool },
    /// Edges of the brightness mask: the sample's class differs from the
    /// sample one cell to the left or one cell above.
    Lines { threshold: u8 },
    /// Every channel within `tolerance` of `color`.
    IsolateColor { color: Rgb, tolerance: u8 },
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Brightness {
            threshold: DEFAULT_THRESHOLD,
            invert: false,
        }
    }
}

/// Scan `bitmap` and collect target rows per column.
///
/// An empty bitmap (or `cell_size == 0`) yields an empty grid.
pub fn extract(bitmap: &Bitmap, cell_size: u32, predicate: Predicate) -> TargetGrid {
    let mut grid = TargetGrid::new();
    if bitmap.is_empty() || cell_size == 0 {
        return grid;
    }

    let step = cell_size as usize;
    for (col, x) in (0..bitmap.width()).step_by(step).enumerate() {
        for (row, y) in (0..bitmap.height()).step_by(step).enumerate() {
            if selects(bitmap, x, y, cell_size, predicate) {
                grid.push(col as i32, row as i32);
            }
        }
    }

    grid
}

fn selects(bitmap: &Bitmap, x: u32, y: u32, cell_size: u32, predicate: Predicate) -> bool {
    let Some(px) = bitmap.get(x, y) else {
        return false;
    };
    if px.alpha < MIN_ALPHA {
        return false;
    }

    match predicate {
        Predicate::Brightness { threshold, invert } => is_bright(px, threshold) != invert,
        Predicate::Lines { threshold } => {
            let here = is_bright(px, threshold);
            let differs = |nx: Option<u32>, ny: Option<u32>| match (nx, ny) {
                (Some(nx), Some(ny)) => bitmap
                    .get(nx, ny)
                    .map(|n| n.alpha >= MIN_ALPHA && is_bright(n, threshold))
                    .is_some_and(|there| there != here),
                _ => false,
            };
            differs(x.checked_sub(cell_size), Some(y)) || differs(Some(x), y.checked_sub(cell_size))
        }
        Predicate::IsolateColor { color, tolerance } => {
            let near = |a: u8, b: u8| a.abs_diff(b) <= tolerance;
            near(px.rgb.r, color.r) && near(px.rgb.g, color.g) && near(px.rgb.b, color.b)
        }
    }
}

#[inline]
fn is_bright(px: Pixel, threshold: u8) -> bool {
    px.rgb.luminance() > threshold
}
