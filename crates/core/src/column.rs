//! RainColumn - a falling chain of glyphs anchored to one grid column.
//!
//! The chain is stored head first. Glyph `i` always sits `i` cells above the
//! head, so the chain moves as one piece:
//!
//! - every tick each glyph falls by the column's fall speed (pixels);
//! - once the tail has left the bottom of the viewport the whole chain wraps to
//!   a random start above the top edge;
//! - brightness is a function of chain position, recomputed every tick.
//!
//! Docking is decided by the scheduler; the column only provides [`RainColumn::dock`].
//! Docked glyphs are kept in a separate list and are never touched again.

use arrayvec::ArrayVec;

use crate::glyph::{random_symbol, Glyph};
use crate::rng::RandomSource;
use crate::types::{MAX_TRAIL_LEN, SYMBOL_SWAP_ODDS};

/// Viewport geometry shared by every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMetrics {
    /// Pixels per grid cell.
    pub cell_size: u32,
    /// Viewport height in grid rows.
    pub rows: u32,
}

impl ColumnMetrics {
    pub fn new(cell_size: u32, rows: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            rows,
        }
    }

    #[inline]
    pub fn cell(&self) -> i32 {
        self.cell_size as i32
    }

    /// Viewport height in pixels.
    #[inline]
    pub fn height_px(&self) -> i32 {
        (self.rows * self.cell_size) as i32
    }
}

#[derive(Debug, Clone)]
pub struct RainColumn {
    column: i32,
    fall_speed: u32,
    metrics: ColumnMetrics,
    glyphs: ArrayVec<Glyph, MAX_TRAIL_LEN>,
    placed: Vec<Glyph>,
    recycles: u32,
}

impl RainColumn {
    /// Build a chain of `trail_len` glyphs whose head starts at `head_pixel_row`.
    pub fn new<R: RandomSource>(
        column: i32,
        head_pixel_row: i32,
        trail_len: usize,
        fall_speed: u32,
        metrics: ColumnMetrics,
        rng: &mut R,
    ) -> Self {
        let len = trail_len.clamp(1, MAX_TRAIL_LEN);
        let mut glyphs = ArrayVec::new();
        for _ in 0..len {
            glyphs.push(Glyph::new(column, 0, random_symbol(rng)));
        }
        let mut col = Self {
            column,
            fall_speed,
            metrics,
            glyphs,
            placed: Vec::new(),
            recycles: 0,
        };
        col.seat_chain(head_pixel_row);
        col
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    pub fn fall_speed(&self) -> u32 {
        self.fall_speed
    }

    pub fn metrics(&self) -> ColumnMetrics {
        self.metrics
    }

    /// Falling glyphs, head first.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Glyphs docked in this column, in docking order.
    pub fn placed(&self) -> &[Glyph] {
        &self.placed
    }

    /// Number of times the chain wrapped back above the viewport.
    pub fn recycles(&self) -> u32 {
        self.recycles
    }

    pub fn head(&self) -> Option<&Glyph> {
        self.glyphs.first()
    }

    /// The head's grid row (floor of its pixel row).
    pub fn head_row(&self) -> Option<i32> {
        self.head().map(|g| g.grid_row(self.metrics.cell_size))
    }

    fn tail(&self) -> Option<&Glyph> {
        self.glyphs.last()
    }

    /// Advance the chain by one tick. Returns true if it wrapped.
    pub fn tick<R: RandomSource>(&mut self, rng: &mut R) -> bool {
        for g in self.glyphs.iter_mut() {
            g.fall(self.fall_speed);
        }

        let wrapped = match self.tail() {
            Some(tail) => tail.pixel_row > self.metrics.height_px(),
            None => false,
        };
        if wrapped {
            self.recycles = self.recycles.wrapping_add(1);
            self.respawn(rng);
        }

        self.refresh_intensity();

        for (i, g) in self.glyphs.iter_mut().enumerate() {
            if i == 0 || rng.one_in(SYMBOL_SWAP_ODDS) {
                g.reroll(rng);
            }
        }

        wrapped
    }

    /// Freeze the head at grid `row`, keep it as a placed glyph, and restart
    /// the chain above the viewport.
    ///
    /// Returns the placed glyph.
    pub fn dock<R: RandomSource>(&mut self, row: i32, rng: &mut R) -> Option<Glyph> {
        let mut glyph = *self.head()?;
        glyph.place(row, self.metrics.cell_size);
        self.placed.push(glyph);

        if let Some(head) = self.glyphs.first_mut() {
            head.reroll(rng);
        }
        self.respawn(rng);
        self.refresh_intensity();
        Some(glyph)
    }

    /// Move the head to a random row above the viewport, `1..=rows` cells up.
    pub fn respawn<R: RandomSource>(&mut self, rng: &mut R) {
        let cells_up = rng.range_inclusive(1, self.metrics.rows.max(1) as i32);
        self.seat_chain(-cells_up * self.metrics.cell());
    }

    fn seat_chain(&mut self, head_pixel_row: i32) {
        let cell = self.metrics.cell();
        for (i, g) in self.glyphs.iter_mut().enumerate() {
            g.pixel_row = head_pixel_row - (i as i32) * cell;
        }
        self.refresh_intensity();
    }

    fn refresh_intensity(&mut self) {
        let len = self.glyphs.len().max(1) as u32;
        for (i, g) in self.glyphs.iter_mut().enumerate() {
            g.intensity = (255 * (len - i as u32) / len) as u8;
        }
    }
}
