//! Digital rain engine - pure, deterministic, and testable
//!
//! This crate turns an image into per-column target queues and drives the
//! falling glyph columns that paint those targets. It has no terminal or file
//! I/O; randomness is injected through [`RandomSource`], so a seeded run is
//! fully reproducible.
//!
//! # Module Structure
//!
//! - [`bitmap`]: decoded RGBA pixels handed over by the loader
//! - [`extract`]: threshold extraction of target cells from a bitmap
//! - [`targets`]: per-column ascending target queues with one-shot translation
//! - [`glyph`]: a single symbol cell, falling or placed
//! - [`column`]: falling glyph chains with wrap-around
//! - [`scheduler`]: docks column heads onto their next target
//! - [`fade`]: fade-in schedule of the translucent overlay
//! - [`scene`]: orchestrates all of the above, one tick per frame
//! - [`rng`]: seedable random sources
//!
//! # Example
//!
//! ```
//! use digital_rain_core::{extract, Bitmap, Pixel, Predicate, RainScene, SceneConfig, SimpleRng};
//! use digital_rain_core::types::Rgb;
//!
//! // A 4x4 white square, sampled every 2 pixels.
//! let bitmap = Bitmap::filled(4, 4, Pixel::opaque(Rgb::WHITE));
//! let mut targets = extract(&bitmap, 2, Predicate::default());
//! assert_eq!(targets.remaining(), 4);
//!
//! let mut config = SceneConfig::new(10, 10);
//! config.cell_size = 2;
//! config.fall_speed_min = 1;
//! config.fall_speed_max = 2;
//! digital_rain_core::centre_targets(&mut targets, (4, 4), &config);
//!
//! let mut scene = RainScene::new(config, targets, SimpleRng::new(7));
//! while !scene.is_complete() {
//!     scene.tick();
//! }
//! assert_eq!(scene.placed_glyphs().count(), 4);
//! ```

pub mod bitmap;
pub mod column;
pub mod extract;
pub mod fade;
pub mod glyph;
pub mod rng;
pub mod scene;
pub mod scheduler;
pub mod targets;

pub use digital_rain_types as types;

pub use bitmap::{Bitmap, Pixel};
pub use column::{ColumnMetrics, RainColumn};
pub use extract::{extract, Predicate};
pub use fade::FadeIn;
pub use glyph::{random_symbol, Glyph, SYMBOLS};
pub use rng::{RandomSource, SimpleRng};
pub use scene::{centre_targets, RainScene, SceneConfig, TickReport};
pub use scheduler::schedule;
pub use targets::{centering_offset, TargetGrid};
