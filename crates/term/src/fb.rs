//! Framebuffer of glyph cells.
//!
//! The rain is drawn on black, so a cell only carries its character, a
//! foreground color and a bold flag. The buffer persists between frames; the
//! fade overlay darkens what is already there before new glyphs are drawn.

pub use crate::types::Rgb;

/// Foreground below this brightness is treated as faded out.
pub const VISIBILITY_FLOOR: u8 = 24;

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bold: bool) -> Self {
        Self { fg, bold }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::BLACK,
            bold: false,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: CellStyle::new(Rgb::BLACK, false),
    };

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, blanking it if the size changed.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::BLANK);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Cell at `(x, y)`; `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Coordinates outside the buffer are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            self.put_char(x + i as i32, y, ch, style);
        }
    }

    /// Darken every cell by `alpha / 255` (the translucent black overlay).
    ///
    /// Cells whose color drops under [`VISIBILITY_FLOOR`] are blanked.
    pub fn fade(&mut self, alpha: u8) {
        let keep = u8::MAX - alpha;
        for cell in self.cells.iter_mut() {
            if cell.is_blank() {
                continue;
            }
            let fg = cell.style.fg.scaled(keep);
            if fg.max_channel() < VISIBILITY_FLOOR {
                *cell = Cell::BLANK;
            } else {
                cell.style = CellStyle::new(fg, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        let style = CellStyle::new(Rgb::WHITE, false);
        fb.put_char(-1, 0, 'x', style);
        fb.put_char(3, 0, 'x', style);
        fb.put_char(0, 2, 'x', style);
        assert!(fb.cells().iter().all(Cell::is_blank));
        assert_eq!(fb.get(-1, 0), None);
    }

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(1, 0, "abc", CellStyle::new(Rgb::WHITE, false));
        assert_eq!(fb.get(1, 0).unwrap().ch, 'a');
        assert_eq!(fb.get(2, 0).unwrap().ch, 'b');
    }

    #[test]
    fn fade_darkens_then_blanks() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.put_char(0, 0, 'A', CellStyle::new(Rgb::new(0, 200, 0), true));

        fb.fade(128);
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, 'A');
        assert!(cell.style.fg.g < 200);
        assert!(!cell.style.bold);

        for _ in 0..8 {
            fb.fade(128);
        }
        assert!(fb.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn zero_alpha_keeps_color() {
        let mut fb = FrameBuffer::new(1, 1);
        let style = CellStyle::new(Rgb::new(10, 250, 40), false);
        fb.put_char(0, 0, 'A', style);
        fb.fade(0);
        assert_eq!(fb.get(0, 0).unwrap().style, style);
    }

    #[test]
    fn resize_blanks_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(0, 0, 'A', CellStyle::new(Rgb::WHITE, false));
        fb.resize(3, 3);
        assert!(fb.cells().iter().all(Cell::is_blank));
        assert_eq!(fb.cells().len(), 9);
    }
}
