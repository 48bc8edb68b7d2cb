//! Start-up configuration: command line, optional JSON file, validation.
//!
//! The result is one immutable [`RainConfig`] that is built before any
//! terminal state is touched. Everything that can be wrong with it (conflicting
//! modes, out-of-range numbers, unreadable config file) is reported here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::core::{FadeIn, Predicate, SceneConfig};
use crate::loader::ImageScale;
use crate::types::{
    Modes, Rgb, ALPHA_LIMIT, CELL_ASPECT, DEFAULT_CELL_SIZE, DEFAULT_FALL_SPEED_MAX,
    DEFAULT_FALL_SPEED_MIN, DEFAULT_FPS, DEFAULT_THRESHOLD, DEFAULT_TRAIL_LEN, FADE_ADJUSTMENT,
    FADE_RATE_TICKS, MAX_TRAIL_LEN, STARTING_ALPHA,
};

/// Digital rain that reassembles an image out of falling glyphs.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "digital-rain", version, about)]
pub struct Args {
    /// Image to reconstruct
    pub image: PathBuf,

    /// JSON config file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dock falling glyphs onto the image (default unless --display-only)
    #[arg(long, conflicts_with = "no_accumulate")]
    pub accumulate: bool,

    /// Plain rain, no image reconstruction
    #[arg(long)]
    pub no_accumulate: bool,

    /// Draw the image directly as shimmering static glyphs
    #[arg(long)]
    pub display_only: bool,

    /// Use the outline of the image instead of its bright area
    #[arg(long)]
    pub draw_lines: bool,

    /// Only use pixels matching --isolate-color
    #[arg(long)]
    pub single_color: bool,

    /// Color for --single-color, as #rrggbb
    #[arg(long, value_name = "HEX")]
    pub isolate_color: Option<String>,

    /// Per-channel tolerance for --single-color
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Luminance threshold (0-255)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Select dark pixels instead of bright ones (brightness mode only)
    #[arg(long, conflicts_with_all = ["draw_lines", "single_color"])]
    pub invert: bool,

    /// Image scale factor (default: fit the terminal)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Virtual pixels per glyph cell
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Slowest fall speed, pixels per tick (default 2, capped at the cell size)
    #[arg(long)]
    pub fall_speed_min: Option<u32>,

    /// Fastest fall speed, pixels per tick (default 4, capped at the cell size)
    #[arg(long)]
    pub fall_speed_max: Option<u32>,

    /// Frame rate limit
    #[arg(long)]
    pub fps: Option<u32>,

    /// Glyphs per falling chain
    #[arg(long)]
    pub trail: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// On-disk configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// `None` means on, unless display-only is set.
    pub accumulation: Option<bool>,
    pub display_only: bool,
    pub draw_lines: bool,
    pub single_color: bool,
    /// `#rrggbb`
    pub isolate_color: String,
    pub color_tolerance: u8,
    pub threshold: u8,
    pub invert: bool,
    /// `None` fits the image to the terminal.
    pub img_scale: Option<f32>,
    pub cell_size: u32,
    pub fps: u32,
    pub trail_len: usize,
    /// `None` uses the default speeds, capped at `cell_size`.
    pub fall_speed_min: Option<u32>,
    pub fall_speed_max: Option<u32>,
    pub starting_alpha: u8,
    pub alpha_limit: u8,
    pub fade_adjustment: u8,
    pub fade_rate_ticks: u32,
}

impl Default for FileConfig {
    fn default() -> Self {
        let modes = Modes::default();
        Self {
            accumulation: None,
            display_only: modes.display_only,
            draw_lines: modes.draw_lines,
            single_color: modes.single_color,
            isolate_color: "#ffffff".to_string(),
            color_tolerance: 0,
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            img_scale: None,
            cell_size: DEFAULT_CELL_SIZE,
            fps: DEFAULT_FPS,
            trail_len: DEFAULT_TRAIL_LEN,
            fall_speed_min: None,
            fall_speed_max: None,
            starting_alpha: STARTING_ALPHA,
            alpha_limit: ALPHA_LIMIT,
            fade_adjustment: FADE_ADJUSTMENT,
            fade_rate_ticks: FADE_RATE_TICKS,
        }
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply command-line overrides.
    fn merge_args(&mut self, args: &Args) {
        self.display_only |= args.display_only;
        if args.accumulate {
            self.accumulation = Some(true);
        }
        if args.no_accumulate {
            self.accumulation = Some(false);
        }
        self.draw_lines |= args.draw_lines;
        self.single_color |= args.single_color;
        self.invert |= args.invert;

        if let Some(hex) = &args.isolate_color {
            self.isolate_color = hex.clone();
        }
        if let Some(v) = args.tolerance {
            self.color_tolerance = v;
        }
        if let Some(v) = args.threshold {
            self.threshold = v;
        }
        if args.scale.is_some() {
            self.img_scale = args.scale;
        }
        if let Some(v) = args.cell_size {
            self.cell_size = v;
        }
        if args.fall_speed_min.is_some() {
            self.fall_speed_min = args.fall_speed_min;
        }
        if args.fall_speed_max.is_some() {
            self.fall_speed_max = args.fall_speed_max;
        }
        if let Some(v) = args.fps {
            self.fps = v;
        }
        if let Some(v) = args.trail {
            self.trail_len = v;
        }
    }
}

/// Validated, immutable run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub image: PathBuf,
    pub modes: Modes,
    pub predicate: Predicate,
    pub img_scale: Option<f32>,
    pub cell_size: u32,
    pub fps: u32,
    pub trail_len: usize,
    pub fall_speed_min: u32,
    pub fall_speed_max: u32,
    pub fade: FadeIn,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl RainConfig {
    /// Parse a full command line (including the program name).
    ///
    /// Usage errors (missing or extra image argument, unknown flags) are
    /// returned as errors instead of exiting the process.
    pub fn parse_from<I, T>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args = Args::try_parse_from(argv)?;
        Self::from_args(args)
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let mut file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        file.merge_args(&args);
        Self::build(args.image, file, args.seed, args.log_file)
    }

    /// Turn merged file settings into a validated config.
    pub fn build(
        image: PathBuf,
        file: FileConfig,
        seed: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Result<Self> {
        // Display-only replaces the default; only an explicit setting conflicts.
        let modes = Modes {
            accumulation: file.accumulation.unwrap_or(!file.display_only),
            display_only: file.display_only,
            draw_lines: file.draw_lines,
            single_color: file.single_color,
        };
        modes.validate()?;
        if file.invert && (modes.draw_lines || modes.single_color) {
            bail!("invert only applies to brightness mode, not draw-lines or single-color");
        }

        let predicate = if modes.single_color {
            let Some(color) = Rgb::from_hex(&file.isolate_color) else {
                bail!("invalid isolate color {:?}, expected #rrggbb", file.isolate_color);
            };
            Predicate::IsolateColor {
                color,
                tolerance: file.color_tolerance,
            }
        } else if modes.draw_lines {
            Predicate::Lines {
                threshold: file.threshold,
            }
        } else {
            Predicate::Brightness {
                threshold: file.threshold,
                invert: file.invert,
            }
        };

        let fall_speed_max = file
            .fall_speed_max
            .unwrap_or(DEFAULT_FALL_SPEED_MAX.min(file.cell_size));
        let fall_speed_min = file
            .fall_speed_min
            .unwrap_or(DEFAULT_FALL_SPEED_MIN.min(fall_speed_max));

        let config = Self {
            image,
            modes,
            predicate,
            img_scale: file.img_scale,
            cell_size: file.cell_size,
            fps: file.fps,
            trail_len: file.trail_len,
            fall_speed_min,
            fall_speed_max,
            fade: FadeIn::new(
                file.starting_alpha,
                file.alpha_limit,
                file.fade_adjustment,
                file.fade_rate_ticks,
            ),
            seed,
            log_file,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges.
    ///
    /// Fall speeds are capped at one cell per tick so a head passes through
    /// every grid row; docking compares rows for exact equality.
    pub fn validate(&self) -> Result<()> {
        self.modes.validate()?;
        if self.cell_size == 0 {
            bail!("cell size must be at least 1");
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }
        if self.trail_len == 0 || self.trail_len > MAX_TRAIL_LEN {
            bail!("trail length must be between 1 and {MAX_TRAIL_LEN}");
        }
        if self.fall_speed_min == 0 || self.fall_speed_min > self.fall_speed_max {
            bail!(
                "fall speed range {}..={} is empty",
                self.fall_speed_min,
                self.fall_speed_max
            );
        }
        if self.fall_speed_max > self.cell_size {
            bail!(
                "fall speed {} exceeds cell size {}; heads would skip rows",
                self.fall_speed_max,
                self.cell_size
            );
        }
        if let Some(scale) = self.img_scale {
            if !(scale.is_finite() && scale > 0.0) {
                bail!("image scale must be a positive number");
            }
        }
        Ok(())
    }

    /// Scene parameters for a terminal of `cols x rows` characters.
    pub fn scene_config(&self, cols: u32, rows: u32) -> SceneConfig {
        SceneConfig {
            cols,
            rows,
            cell_size: self.cell_size,
            trail_len: self.trail_len,
            fall_speed_min: self.fall_speed_min,
            fall_speed_max: self.fall_speed_max,
            modes: self.modes,
            fade: self.fade,
        }
    }

    /// How the loader should size the image for a viewport of `viewport_px` pixels.
    pub fn image_scale(&self, viewport_px: (u32, u32)) -> ImageScale {
        match self.img_scale {
            Some(factor) => ImageScale::Factor {
                x: factor,
                y: factor * CELL_ASPECT,
            },
            None => ImageScale::Fit {
                width: viewport_px.0,
                height: viewport_px.1,
                aspect: CELL_ASPECT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = RainConfig::parse_from(["digital-rain", "cat.png"]).unwrap();
        assert_eq!(cfg.image, PathBuf::from("cat.png"));
        assert!(cfg.modes.accumulation);
        assert!(!cfg.modes.display_only);
        assert_eq!(
            cfg.predicate,
            Predicate::Brightness {
                threshold: DEFAULT_THRESHOLD,
                invert: false
            }
        );
    }

    #[test]
    fn display_only_alone_disables_accumulation() {
        let cfg = RainConfig::parse_from(["digital-rain", "a.png", "--display-only"]).unwrap();
        assert!(cfg.modes.display_only);
        assert!(!cfg.modes.accumulation);
    }

    #[test]
    fn single_color_builds_isolate_predicate() {
        let cfg = RainConfig::parse_from([
            "digital-rain",
            "a.png",
            "--single-color",
            "--isolate-color",
            "#ff0000",
            "--tolerance",
            "12",
        ])
        .unwrap();
        assert_eq!(
            cfg.predicate,
            Predicate::IsolateColor {
                color: Rgb::new(255, 0, 0),
                tolerance: 12
            }
        );
    }

    #[test]
    fn bad_isolate_color_is_rejected() {
        let err = RainConfig::parse_from([
            "digital-rain",
            "a.png",
            "--single-color",
            "--isolate-color",
            "red",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("isolate color"));
    }

    #[test]
    fn small_cell_size_caps_default_fall_speeds() {
        for cell in 1..=3u32 {
            let cs = cell.to_string();
            let cfg =
                RainConfig::parse_from(["digital-rain", "a.png", "--cell-size", cs.as_str()])
                    .unwrap();
            assert_eq!(cfg.cell_size, cell);
            assert!(cfg.fall_speed_min >= 1);
            assert!(cfg.fall_speed_min <= cfg.fall_speed_max);
            assert!(cfg.fall_speed_max <= cell);
        }
    }

    #[test]
    fn fall_speed_flags_are_applied() {
        let cfg = RainConfig::parse_from([
            "digital-rain",
            "a.png",
            "--fall-speed-min",
            "1",
            "--fall-speed-max",
            "6",
        ])
        .unwrap();
        assert_eq!((cfg.fall_speed_min, cfg.fall_speed_max), (1, 6));
    }

    #[test]
    fn explicit_fall_speed_above_cell_size_is_rejected() {
        let err = RainConfig::parse_from([
            "digital-rain",
            "a.png",
            "--cell-size",
            "2",
            "--fall-speed-max",
            "3",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("exceeds cell size"));
    }

    #[test]
    fn accumulate_and_no_accumulate_conflict() {
        let argv = ["digital-rain", "a.png", "--accumulate", "--no-accumulate"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn invert_outside_brightness_mode_is_rejected() {
        let argv = ["digital-rain", "a.png", "--invert", "--draw-lines"];
        assert!(Args::try_parse_from(argv).is_err());
        let file = FileConfig {
            invert: true,
            single_color: true,
            ..FileConfig::default()
        };
        let err = RainConfig::build("a.png".into(), file, None, None).unwrap_err();
        assert!(err.to_string().contains("invert"));
    }

    #[test]
    fn file_values_are_overridden_by_flags() {
        let mut file = FileConfig {
            threshold: 10,
            fps: 12,
            ..FileConfig::default()
        };
        let args = Args {
            image: "a.png".into(),
            threshold: Some(200),
            ..Args::default()
        };
        file.merge_args(&args);
        assert_eq!(file.threshold, 200);
        assert_eq!(file.fps, 12);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "draw_lines": true, "fps": 24 }"#).unwrap();
        assert!(file.draw_lines);
        assert_eq!(file.fps, 24);
        assert_eq!(file.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(file.accumulation, None);
    }

    #[test]
    fn image_scale_applies_cell_aspect() {
        let mut cfg = RainConfig::parse_from(["digital-rain", "a.png", "--scale", "2"]).unwrap();
        assert_eq!(cfg.image_scale((80, 80)), ImageScale::Factor { x: 2.0, y: 1.0 });
        cfg.img_scale = None;
        assert_eq!(
            cfg.image_scale((80, 40)),
            ImageScale::Fit {
                width: 80,
                height: 40,
                aspect: CELL_ASPECT
            }
        );
    }
}
