use digital_rain::core::types::{Modes, Rgb};
use digital_rain::core::{FadeIn, RainScene, SceneConfig, SimpleRng, TargetGrid};
use digital_rain::term::{FrameBuffer, RainView, Viewport};

fn display_only_config(cols: u32, rows: u32) -> SceneConfig {
    SceneConfig {
        modes: Modes {
            accumulation: false,
            display_only: true,
            ..Modes::default()
        },
        cell_size: 2,
        fall_speed_min: 1,
        fall_speed_max: 2,
        ..SceneConfig::new(cols, rows)
    }
}

#[test]
fn display_glyphs_are_drawn_on_their_cells() {
    let mut targets = TargetGrid::new();
    targets.push(1, 1);
    targets.push(4, 2);
    let scene = RainScene::new(display_only_config(6, 4), targets, SimpleRng::new(11));

    let fb = RainView::default().render(&scene, Viewport::new(6, 4));
    for glyph in scene.display_glyphs() {
        let cell = fb.get(glyph.column, glyph.grid_row(2)).unwrap();
        assert_eq!(cell.ch, glyph.symbol);
        assert_eq!(cell.style.fg, Rgb::WHITE);
    }
}

#[test]
fn display_only_without_targets_draws_no_image_cells() {
    let scene = RainScene::new(display_only_config(8, 6), TargetGrid::new(), SimpleRng::new(3));
    let fb = RainView::default().render(&scene, Viewport::new(8, 6));
    assert!(fb.cells().iter().all(|c| c.style.fg != Rgb::WHITE));
}

#[test]
fn trails_fade_out_across_frames() {
    let mut cfg = SceneConfig::new(1, 1);
    cfg.fade = FadeIn::new(200, 200, 0, 1);
    let scene = RainScene::new(cfg, TargetGrid::new(), SimpleRng::new(1));
    let view = RainView::default();

    // One stale bright cell outside the 1x1 grid: nothing redraws it.
    let mut fb = FrameBuffer::new(3, 3);
    fb.put_char(2, 2, 'x', digital_rain::term::CellStyle::new(Rgb::WHITE, false));

    view.render_into(&scene, Viewport::new(3, 3), &mut fb);
    let once = fb.get(2, 2).unwrap();
    assert_eq!(once.ch, 'x');
    assert!(once.style.fg.r < 255);

    for _ in 0..5 {
        view.render_into(&scene, Viewport::new(3, 3), &mut fb);
    }
    assert!(fb.get(2, 2).unwrap().is_blank());
}

#[test]
fn grid_is_centred_in_a_larger_terminal() {
    let mut targets = TargetGrid::new();
    targets.push(0, 0);
    let scene = RainScene::new(display_only_config(4, 2), targets, SimpleRng::new(5));

    let fb = RainView::default().render(&scene, Viewport::new(10, 6));
    let glyph = scene.display_glyphs()[0];
    assert_eq!(fb.get(3, 2).unwrap().ch, glyph.symbol);
}
