//! Glyph - one animated symbol cell.

use crate::rng::RandomSource;

/// Symbols the rain is drawn from: half-width katakana, digits and a few
/// latin capitals. All of them occupy a single terminal column.
pub const SYMBOLS: &[char] = &[
    'ｦ', 'ｧ', 'ｨ', 'ｩ', 'ｪ', 'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ',
    'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ',
    'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ',
    'ﾝ', '0', '1', '2', '3', '4', '5', '7', '8', '9', 'Z', 'T', 'H', 'E', ':', '=', '*', '+',
    '<', '>',
];

pub fn random_symbol<R: RandomSource>(rng: &mut R) -> char {
    SYMBOLS[rng.next_range(SYMBOLS.len() as u32) as usize]
}

/// A single symbol in a falling chain, or frozen in place once docked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub column: i32,
    /// Continuous vertical position in pixels; may be negative above the viewport.
    pub pixel_row: i32,
    /// 255 = head brightness, lower values fade towards the tail.
    pub intensity: u8,
    pub symbol: char,
    pub placed: bool,
}

impl Glyph {
    pub fn new(column: i32, pixel_row: i32, symbol: char) -> Self {
        Self {
            column,
            pixel_row,
            intensity: u8::MAX,
            symbol,
            placed: false,
        }
    }

    /// A glyph frozen at grid cell `(column, row)`.
    pub fn placed_at(column: i32, row: i32, cell_size: u32, symbol: char) -> Self {
        Self {
            column,
            pixel_row: row * cell_size as i32,
            intensity: u8::MAX,
            symbol,
            placed: true,
        }
    }

    /// Grid row containing `pixel_row` (floor division, so negative rows stay
    /// negative).
    #[inline]
    pub fn grid_row(&self, cell_size: u32) -> i32 {
        self.pixel_row.div_euclid(cell_size.max(1) as i32)
    }

    /// Freeze at grid `row`. Placed glyphs never move again.
    pub fn place(&mut self, row: i32, cell_size: u32) {
        self.pixel_row = row * cell_size as i32;
        self.intensity = u8::MAX;
        self.placed = true;
    }

    /// Advance by `distance` pixels. No-op for placed glyphs.
    pub fn fall(&mut self, distance: u32) {
        if !self.placed {
            self.pixel_row += distance as i32;
        }
    }

    pub fn reroll<R: RandomSource>(&mut self, rng: &mut R) {
        self.symbol = random_symbol(rng);
    }
}
