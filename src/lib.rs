//! Digital rain (workspace facade crate).
//!
//! The engine, terminal layer, input mapping and shared types live in dedicated
//! crates under `crates/` and are re-exported here as
//! `digital_rain::{core, term, input, types}`. Start-up concerns that only the
//! binary needs (command line, config file, image decoding) live in this crate.

pub mod config;
pub mod loader;

pub use digital_rain_core as core;
pub use digital_rain_input as input;
pub use digital_rain_term as term;
pub use digital_rain_types as types;
