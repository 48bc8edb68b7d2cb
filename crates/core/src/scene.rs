//! RainScene - owns every piece of effect state and advances it one tick at a time.
//!
//! Per tick, unless paused:
//! 1. every column falls (and wraps when it leaves the viewport);
//! 2. in accumulation mode, the scheduler docks heads onto pending targets;
//! 3. in display-only mode, every display glyph picks a new symbol.
//!
//! The fade overlay keeps progressing while paused.

use log::{debug, info};

use crate::column::{ColumnMetrics, RainColumn};
use crate::fade::FadeIn;
use crate::glyph::{random_symbol, Glyph};
use crate::rng::{RandomSource, SimpleRng};
use crate::scheduler::schedule;
use crate::targets::{centering_offset, TargetGrid};
use crate::types::{
    Action, Flow, Modes, DEFAULT_CELL_SIZE, DEFAULT_FALL_SPEED_MAX, DEFAULT_FALL_SPEED_MIN,
    DEFAULT_TRAIL_LEN,
};

/// Immutable scene parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Viewport width in grid columns.
    pub cols: u32,
    /// Viewport height in grid rows.
    pub rows: u32,
    pub cell_size: u32,
    pub trail_len: usize,
    /// Per-column fall speeds are drawn from `fall_speed_min..=fall_speed_max` (pixels per tick).
    pub fall_speed_min: u32,
    pub fall_speed_max: u32,
    pub modes: Modes,
    pub fade: FadeIn,
}

impl SceneConfig {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cell_size: DEFAULT_CELL_SIZE,
            trail_len: DEFAULT_TRAIL_LEN,
            fall_speed_min: DEFAULT_FALL_SPEED_MIN,
            fall_speed_max: DEFAULT_FALL_SPEED_MAX,
            modes: Modes::default(),
            fade: FadeIn::default(),
        }
    }

    /// Viewport size in pixels.
    pub fn viewport_px(&self) -> (u32, u32) {
        (self.cols * self.cell_size, self.rows * self.cell_size)
    }

    pub fn metrics(&self) -> ColumnMetrics {
        ColumnMetrics::new(self.cell_size, self.rows)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub docked: usize,
    pub recycled: usize,
    pub shimmered: usize,
}

/// Centre `targets` (extracted from an image of `image_px` pixels) in the
/// viewport and drop everything that ends up outside it.
///
/// Returns the `(dx, dy)` offset in cells, or `None` if the grid had already
/// been translated (it is still clipped).
pub fn centre_targets(
    targets: &mut TargetGrid,
    image_px: (u32, u32),
    config: &SceneConfig,
) -> Option<(i32, i32)> {
    let (dx, dy) = centering_offset(config.viewport_px(), image_px, config.cell_size);
    let applied = targets.translate(dx, dy);
    if applied {
        debug!("translated targets by ({dx}, {dy}) cells");
    }
    targets.retain_within(config.cols as i32, config.rows as i32);
    applied.then_some((dx, dy))
}

pub struct RainScene<R: RandomSource = SimpleRng> {
    config: SceneConfig,
    targets: TargetGrid,
    columns: Vec<RainColumn>,
    display: Vec<Glyph>,
    fade: FadeIn,
    paused: bool,
    ticks: u64,
    rng: R,
}

impl<R: RandomSource> RainScene<R> {
    /// Build one column per viewport column and, in display-only mode, one
    /// static glyph per target.
    ///
    /// `targets` should already be positioned in viewport cells (see [`centre_targets`]).
    pub fn new(config: SceneConfig, targets: TargetGrid, mut rng: R) -> Self {
        let metrics = config.metrics();
        let speed_lo = config.fall_speed_min.max(1) as i32;
        let speed_hi = config.fall_speed_max.max(config.fall_speed_min).max(1) as i32;

        let columns = (0..config.cols as i32)
            .map(|c| {
                let start_row = rng.range_inclusive(0, config.rows.max(1) as i32 - 1);
                let speed = rng.range_inclusive(speed_lo, speed_hi) as u32;
                RainColumn::new(
                    c,
                    start_row * metrics.cell(),
                    config.trail_len,
                    speed,
                    metrics,
                    &mut rng,
                )
            })
            .collect();

        let display = if config.modes.display_only {
            targets
                .iter()
                .map(|(c, r)| Glyph::placed_at(c, r, config.cell_size, random_symbol(&mut rng)))
                .collect()
        } else {
            Vec::new()
        };

        info!(
            "scene {}x{} cells, {} targets in {} columns",
            config.cols,
            config.rows,
            targets.remaining(),
            targets.column_count()
        );

        Self {
            config,
            targets,
            columns,
            display,
            fade: config.fade,
            paused: false,
            ticks: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetGrid {
        &self.targets
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// Static glyphs of display-only mode (empty otherwise).
    pub fn display_glyphs(&self) -> &[Glyph] {
        &self.display
    }

    /// Every docked glyph across all columns.
    pub fn placed_glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.columns.iter().flat_map(|c| c.placed().iter())
    }

    pub fn fade_alpha(&self) -> u8 {
        self.fade.alpha()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Accumulation finished: every target has been docked.
    pub fn is_complete(&self) -> bool {
        self.config.modes.accumulation && !self.targets.has_remaining_targets()
    }

    pub fn apply_action(&mut self, action: Action) -> Flow {
        match action {
            Action::TogglePause => {
                self.paused = !self.paused;
                debug!("paused = {}", self.paused);
                Flow::Continue
            }
            Action::Quit => Flow::Quit,
        }
    }

    /// Advance the scene by one frame.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        self.fade.tick();

        let mut report = TickReport::default();
        if self.paused {
            return report;
        }

        for col in self.columns.iter_mut() {
            if col.tick(&mut self.rng) {
                report.recycled += 1;
            }
        }

        let modes = self.config.modes;
        if modes.accumulation && self.targets.has_remaining_targets() {
            report.docked = schedule(&mut self.columns, &mut self.targets, &mut self.rng);
            if report.docked > 0 && !self.targets.has_remaining_targets() {
                info!("image complete after {} ticks", self.ticks);
            }
        } else if modes.display_only {
            for g in self.display.iter_mut() {
                g.reroll(&mut self.rng);
            }
            report.shimmered = self.display.len();
        }

        report
    }
}
