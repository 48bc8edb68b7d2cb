//! Shared types and constants for the digital rain workspace.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the core engine, the terminal view and the start-up code alike.
//!
//! # Grid and pixel space
//!
//! The viewport is a grid of square cells. One cell is `cell_size` virtual
//! pixels wide and tall; the terminal draws one glyph per cell. Falling glyphs
//! move through pixel space so they can fall slower than one cell per tick.
//!
//! # Timing and fade constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 30 | Frame (and tick) rate limit |
//! | `DEFAULT_CELL_SIZE` | 8 | Virtual pixels per grid cell |
//! | `DEFAULT_FALL_SPEED_MIN` | 2 | Slowest column, pixels per tick |
//! | `DEFAULT_FALL_SPEED_MAX` | 4 | Fastest column, pixels per tick |
//! | `STARTING_ALPHA` | 20 | Initial fade overlay opacity |
//! | `ALPHA_LIMIT` | 180 | Fade overlay stops increasing here |
//! | `FADE_ADJUSTMENT` | 4 | Opacity added per fade step |
//! | `FADE_RATE_TICKS` | 15 | Ticks between fade steps |
//!
//! # Examples
//!
//! ```
//! use digital_rain_types::{Modes, ModeError};
//!
//! let modes = Modes { accumulation: true, display_only: true, ..Modes::default() };
//! assert_eq!(modes.validate(), Err(ModeError::AccumulationAndDisplayOnly));
//! ```

use std::fmt;

/// Virtual pixels per grid cell.
pub const DEFAULT_CELL_SIZE: u32 = 8;

/// Frame rate limit (one logical tick per frame).
pub const DEFAULT_FPS: u32 = 30;

/// Slowest per-column fall speed in pixels per tick.
pub const DEFAULT_FALL_SPEED_MIN: u32 = 2;

/// Fastest per-column fall speed in pixels per tick.
pub const DEFAULT_FALL_SPEED_MAX: u32 = 4;

/// Default number of glyphs in a falling chain.
pub const DEFAULT_TRAIL_LEN: usize = 12;

/// Upper bound for the chain length (fixed-capacity storage).
pub const MAX_TRAIL_LEN: usize = 32;

/// Default luminance threshold for brightness and line modes.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Initial fade overlay opacity.
pub const STARTING_ALPHA: u8 = 20;

/// Fade overlay opacity ceiling.
pub const ALPHA_LIMIT: u8 = 180;

/// Opacity added per fade step.
pub const FADE_ADJUSTMENT: u8 = 4;

/// Ticks between fade steps.
pub const FADE_RATE_TICKS: u32 = 15;

/// A trailing glyph swaps its symbol with probability `1 / SYMBOL_SWAP_ODDS` per tick.
pub const SYMBOL_SWAP_ODDS: u32 = 20;

/// Width-to-height ratio of a terminal character cell.
///
/// Images are squashed vertically by this factor so they keep their proportions
/// once every sampled cell becomes one terminal character.
pub const CELL_ASPECT: f32 = 0.5;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    ///
    /// ```
    /// use digital_rain_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
    /// assert_eq!(Rgb::from_hex("00FF00"), Some(Rgb::new(0, 255, 0)));
    /// assert_eq!(Rgb::from_hex("#fff"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Integer Rec. 601 luma in `0..=255`.
    pub fn luminance(&self) -> u8 {
        let l = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        (l / 1000) as u8
    }

    /// Scale every channel by `num / 255`.
    pub fn scaled(&self, num: u8) -> Self {
        let f = |c: u8| ((c as u16 * num as u16) / 255) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Largest channel value.
    pub fn max_channel(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

/// User actions recognised by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause or resume all tick-driven animation
    TogglePause,
    /// End the loop after the current frame
    Quit,
}

/// Continuation signal returned by one step of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Behaviour and image-processing mode flags, fixed at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    /// Falling heads dock onto target cells and assemble the image
    pub accumulation: bool,
    /// Target cells are drawn directly as shimmering static glyphs
    pub display_only: bool,
    /// Select the outline of the brightness mask instead of its area
    pub draw_lines: bool,
    /// Select pixels matching one isolated color
    pub single_color: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            accumulation: true,
            display_only: false,
            draw_lines: false,
            single_color: false,
        }
    }
}

impl Modes {
    /// Reject mutually exclusive combinations.
    pub fn validate(&self) -> Result<(), ModeError> {
        if self.accumulation && self.display_only {
            return Err(ModeError::AccumulationAndDisplayOnly);
        }
        if self.draw_lines && self.single_color {
            return Err(ModeError::LinesAndSingleColor);
        }
        Ok(())
    }
}

/// Conflicting mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
    AccumulationAndDisplayOnly,
    LinesAndSingleColor,
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::AccumulationAndDisplayOnly => {
                write!(f, "accumulation and display-only modes cannot both be enabled")
            }
            ModeError::LinesAndSingleColor => write!(
                f,
                "only one image processing mode can be selected (draw-lines or single-color)"
            ),
        }
    }
}

impl std::error::Error for ModeError {}
