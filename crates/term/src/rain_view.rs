//! RainView: maps a `core::RainScene` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One grid cell is one terminal character. The scene grid is centred in the
//! viewport when the terminal is larger than the grid (e.g. after a resize).

use crate::core::{Glyph, RainScene, RandomSource};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Colors used by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub head: Rgb,
    pub trail: Rgb,
    pub placed: Rgb,
    pub display: Rgb,
    pub status: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            head: Rgb::new(210, 255, 210),
            trail: Rgb::new(0, 255, 70),
            placed: Rgb::new(235, 255, 235),
            display: Rgb::WHITE,
            status: Rgb::new(120, 200, 120),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RainView {
    palette: Palette,
}

impl RainView {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Grid cell `(0, 0)` in terminal coordinates.
    pub fn origin<R: RandomSource>(&self, scene: &RainScene<R>, viewport: Viewport) -> (i32, i32) {
        let cfg = scene.config();
        let x = (viewport.width as i32 - cfg.cols as i32).max(0) / 2;
        let y = (viewport.height as i32 - cfg.rows as i32).max(0) / 2;
        (x, y)
    }

    /// Render one frame on top of what `fb` already shows.
    ///
    /// The previous contents are darkened by the scene's fade alpha first, so
    /// callers keep one framebuffer alive across frames to get trails.
    pub fn render_into<R: RandomSource>(
        &self,
        scene: &RainScene<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fade(scene.fade_alpha());

        let (ox, oy) = self.origin(scene, viewport);
        let cell_size = scene.config().cell_size;
        let rows = scene.config().rows as i32;

        for column in scene.columns() {
            for (i, glyph) in column.glyphs().iter().enumerate() {
                let style = if i == 0 {
                    CellStyle::new(self.palette.head, true)
                } else {
                    CellStyle::new(self.palette.trail.scaled(glyph.intensity), false)
                };
                draw_glyph(fb, glyph, cell_size, rows, (ox, oy), style);
            }
        }

        let placed = CellStyle::new(self.palette.placed, true);
        for glyph in scene.placed_glyphs() {
            draw_glyph(fb, glyph, cell_size, rows, (ox, oy), placed);
        }

        let display = CellStyle::new(self.palette.display, false);
        for glyph in scene.display_glyphs() {
            draw_glyph(fb, glyph, cell_size, rows, (ox, oy), display);
        }

        if scene.is_paused() {
            let y = viewport.height as i32 - 1;
            let style = CellStyle::new(self.palette.status, true);
            fb.put_str(0, y, "PAUSED  [enter] resume  [q] quit", style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R: RandomSource>(&self, scene: &RainScene<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }
}

fn draw_glyph(
    fb: &mut FrameBuffer,
    glyph: &Glyph,
    cell_size: u32,
    rows: i32,
    origin: (i32, i32),
    style: CellStyle,
) {
    let row = glyph.grid_row(cell_size);
    if row < 0 || row >= rows {
        return;
    }
    fb.put_char(origin.0 + glyph.column, origin.1 + row, glyph.symbol, style);
}
