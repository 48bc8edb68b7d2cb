//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Action`]. The effect only
//! knows two actions: toggle pause and quit.

pub mod map;

pub use digital_rain_types as types;

pub use map::{handle_key_event, should_quit};
