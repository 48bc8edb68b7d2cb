//! Terminal rendering for the digital rain.
//!
//! A small, game-oriented rendering layer: the scene is drawn into a
//! framebuffer of glyph cells which is then diffed and flushed to the terminal.
//! It avoids widget/layout libraries entirely.
//!
//! - [`fb`]: persistent framebuffer with the fade overlay
//! - [`rain_view`]: pure mapping from a `RainScene` to the framebuffer
//! - [`renderer`]: crossterm output (alternate screen, diffed frames)
//! - [`pacer`]: frame-rate limited tick source

pub mod fb;
pub mod pacer;
pub mod rain_view;
pub mod renderer;

pub use digital_rain_core as core;
pub use digital_rain_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use pacer::FramePacer;
pub use rain_view::{Palette, RainView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
