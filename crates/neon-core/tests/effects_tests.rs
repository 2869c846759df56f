// Host-side tests for the peripheral effects: glitch parameters, uniform
// packing, backdrop drift, card tilt, loading bar and keyed timers.

use neon_core::backdrop::{mote_fill, Backdrop};
use neon_core::glitch::GlitchState;
use neon_core::loading::{LoadingBar, LoadingPhase};
use neon_core::parallax::{card_tilt, rest_transform, tilt_transform, Tilt};
use neon_core::timers::{ToggleId, ToggleTimers};
use neon_core::tween::Ease;
use neon_core::uniforms::{MeshUniforms, PostUniforms, SceneUniforms, MAX_POINT_LIGHTS};
use neon_core::*;
use std::time::Duration;

#[test]
fn glitch_goes_wild_on_first_frame_then_settles() {
    let mut g = GlitchState::new(7);
    let first = g.next_frame();
    assert!(!first.bypass);
    assert!((first.col_s - 0.05).abs() < f32::EPSILON);
    assert!(first.amount >= 0.0 && first.amount < 1.0 / 30.0);

    let second = g.next_frame();
    assert!(!second.bypass);
    assert_eq!(second.col_s, 0.0);
    assert!(second.seed_x.abs() <= 0.3);

    // past the first fifth of the cycle the pass bypasses
    let trigger = g.trigger();
    let mut saw_bypass = false;
    for _ in 2..trigger {
        saw_bypass |= g.next_frame().bypass;
    }
    assert!(saw_bypass);
}

#[test]
fn uniform_layouts_are_vec4_aligned() {
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<MeshUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 64);
}

#[test]
fn scene_uniforms_pack_ambient_and_point_lights() {
    let mut store = SceneStore::new(Viewport::new(800, 600, 1.0));
    store.populate(&SceneConfig::default()).unwrap();
    let u = SceneUniforms::from_store(&store, 1.5, 600);
    // ambient 0x00ffff * 0.5
    assert_eq!(&u.ambient[..3], &[0.0, 0.5, 0.5]);
    // primary + three neon
    assert_eq!(u.params[1] as usize, 4);
    assert_eq!(u.params[0], 1.5);
    assert_eq!(u.lights[0].position_range, [0.0, 10.0, 10.0, 100.0]);
    assert_eq!(u.lights[1].position_range[3], 50.0);
    assert!(MAX_POINT_LIGHTS >= 4);
}

#[test]
fn post_uniforms_zero_glitch_on_bypass() {
    let bloom = BloomParams::default();
    let mut g = GlitchState::new(1);
    let wild = g.next_frame();
    let u = PostUniforms::new([800.0, 600.0], 2.0, &bloom)
        .with_blur_dir([1.0, 0.0])
        .with_glitch(&wild);
    assert_eq!(u.bloom, [1.0, 0.0, 1.5, 0.85]);
    assert_eq!(u.glitch[3], 0.05);

    let mut bypass = wild;
    bypass.bypass = true;
    let u = u.with_glitch(&bypass);
    assert_eq!(u.glitch, [0.0; 4]);
}

#[test]
fn backdrop_motes_stay_inside_after_steps() {
    let mut b = Backdrop::new(100, 320.0, 240.0, 3);
    assert_eq!(b.motes().len(), 100);
    for _ in 0..5000 {
        b.step();
    }
    assert_eq!(b.motes().len(), 100);
    for m in b.motes() {
        assert!(m.x >= 0.0 && m.x <= 320.0);
        assert!(m.y >= 0.0 && m.y <= 240.0);
        assert!(m.vx.abs() <= 0.25 && m.vy.abs() <= 0.25);
        assert!(m.opacity < 0.5 && m.size < 2.0);
    }
}

#[test]
fn backdrop_respawns_inside_a_shrunk_canvas() {
    let mut b = Backdrop::new(50, 1000.0, 1000.0, 9);
    b.resize(10.0, 10.0);
    b.step();
    for m in b.motes() {
        assert!(m.x <= 10.0 + 0.25 && m.y <= 10.0 + 0.25);
    }
    assert_eq!(mote_fill(0.25), "rgba(0, 247, 255, 0.25)");
}

#[test]
fn card_tilt_is_zero_at_center_and_full_at_edges() {
    let rect = (100.0, 100.0, 200.0, 100.0);
    assert_eq!(card_tilt(rect, 200.0, 150.0), Tilt::default());
    let corner = card_tilt(rect, 100.0, 100.0);
    assert_eq!(corner.rotate_x, -15.0);
    assert_eq!(corner.rotate_y, 15.0);
    assert_eq!(card_tilt((0.0, 0.0, 0.0, 0.0), 5.0, 5.0), Tilt::default());
    assert_eq!(
        tilt_transform(corner),
        "perspective(1000px) rotateX(-15deg) rotateY(15deg) translateZ(30px)"
    );
    assert_eq!(
        rest_transform(),
        "perspective(1000px) rotateX(0) rotateY(0) translateZ(0)"
    );
}

#[test]
fn loading_bar_fills_in_ten_steps() {
    let mut bar = LoadingBar::default();
    assert_eq!(bar.transform(), "scaleX(0)");
    let mut became_full = 0;
    for _ in 0..9 {
        assert!(!bar.step());
    }
    if bar.step() {
        became_full += 1;
    }
    assert_eq!(became_full, 1);
    assert_eq!(bar.phase(), LoadingPhase::Full);
    assert_eq!(bar.transform(), "scaleX(1)");
    assert!(!bar.step());
    bar.hide();
    assert_eq!(bar.phase(), LoadingPhase::Hidden);
}

#[test]
fn keyed_timer_replaces_pending_deadline() {
    let mut timers = ToggleTimers::new();
    timers.schedule(ToggleId::Glitch, Duration::from_millis(200), false);
    timers.schedule(ToggleId::Glitch, Duration::from_millis(350), false);
    assert!(timers.drain_due(Duration::from_millis(300)).is_empty());
    let fired = timers.drain_due(Duration::from_millis(350));
    assert_eq!(fired.len(), 1);
    assert!(timers.is_empty());

    timers.schedule(ToggleId::Glitch, Duration::from_millis(10), false);
    assert!(timers.cancel(ToggleId::Glitch).is_some());
    assert!(timers.drain_due(Duration::from_secs(1)).is_empty());
}

#[test]
fn ease_out_is_monotonic_and_bounded() {
    let mut prev = Ease::QuadOut.apply(0.0);
    assert_eq!(prev, 0.0);
    for i in 1..=100 {
        let v = Ease::QuadOut.apply(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(Ease::QuadOut.apply(1.0), 1.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}

#[test]
fn sound_cues_match_asset_table() {
    assert_eq!(SoundCue::Hover.path(), "sounds/hover.mp3");
    assert!(SoundCue::Ambient.looped());
    assert!(!SoundCue::Click.looped());
    for cue in SoundCue::ALL {
        assert!((0.2..=0.5).contains(&cue.volume()));
    }
}

#[test]
fn ambient_requested_before_load_starts_when_buffer_arrives() {
    let mut gate = PlayOnce::default();
    // first click lands while the file is still decoding
    assert!(!gate.request(false));
    assert_eq!(gate.state(), OnceState::Waiting);
    assert!(!gate.request(false));
    assert!(gate.loaded());
    assert_eq!(gate.state(), OnceState::Started);
    // later clicks and a repeated load never start it twice
    assert!(!gate.request(true));
    assert!(!gate.loaded());
}

#[test]
fn ambient_starts_once_when_already_loaded() {
    let mut gate = PlayOnce::default();
    assert!(!gate.loaded());
    assert_eq!(gate.state(), OnceState::Idle);
    assert!(gate.request(true));
    assert!(!gate.request(true));
}
