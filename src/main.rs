//! Digital rain runner (default binary).
//!
//! Decodes the image, extracts target cells, then drives the rain scene at a
//! fixed frame rate on the alternate screen until the user quits.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use digital_rain::config::{Args, RainConfig};
use digital_rain::core::{centre_targets, extract, RainScene};
use digital_rain::input::handle_key_event;
use digital_rain::loader;
use digital_rain::term::{FrameBuffer, FramePacer, RainView, TerminalRenderer, Viewport};
use digital_rain::types::Flow;

const TITLE: &str = "digital-rain";

fn main() -> Result<()> {
    // Configuration problems are reported before the terminal is touched.
    let config = RainConfig::from_args(Args::parse())?;
    init_logging(&config)?;

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let scene_config = config.scene_config(cols as u32, rows as u32);

    let scale = config.image_scale(scene_config.viewport_px());
    let bitmap = loader::load_bitmap(&config.image, scale)?;
    let started = Instant::now();
    let mut targets = extract(&bitmap, config.cell_size, config.predicate);
    debug!("extracted {} targets in {:?}", targets.remaining(), started.elapsed());

    let image_px = (bitmap.width(), bitmap.height());
    if let Some((dx, dy)) = centre_targets(&mut targets, image_px, &scene_config) {
        debug!("centred image by ({dx}, {dy}) cells");
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");
    let mut scene = RainScene::new(scene_config, targets, StdRng::seed_from_u64(seed));

    let mut term = TerminalRenderer::new();
    term.enter(TITLE)?;

    let result = run(&mut term, &mut scene, config.fps);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `--log-file` when given; stderr would tear the alternate screen,
/// so without a file only warnings are printed.
fn init_logging(config: &RainConfig) -> Result<()> {
    let default_filter = if config.log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, scene: &mut RainScene<StdRng>, fps: u32) -> Result<()> {
    let view = RainView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut pacer = FramePacer::new(fps);
    let clock = Instant::now();

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;
        if pacer.should_tick(now_ms) {
            scene.tick();
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(scene, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }

        // Input with timeout until next frame.
        let now_ms = clock.elapsed().as_millis() as u64;
        let timeout = Duration::from_millis(pacer.timeout_ms(now_ms));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = handle_key_event(key) {
                    if scene.apply_action(action) == Flow::Quit {
                        info!("quit after {} ticks", scene.tick_count());
                        return Ok(());
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
