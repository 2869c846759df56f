// Host-side tests for the input reactor: resize, pointer transitions, clicks.

use glam::Vec3;
use neon_core::input::pointer_ndc;
use neon_core::*;
use std::cell::RefCell;
use std::time::Duration;

#[derive(Default)]
struct CueLog {
    played: RefCell<Vec<SoundCue>>,
}

impl AudioSink for CueLog {
    fn play(&self, cue: SoundCue) {
        self.played.borrow_mut().push(cue);
    }
    fn stop(&self, _cue: SoundCue) {}
}

fn make_scheduler() -> FrameScheduler {
    let config = SceneConfig {
        particle_count: 64,
        ..SceneConfig::default()
    };
    FrameScheduler::new(&config, Viewport::new(1000, 500, 1.0)).unwrap()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn resize_twice_is_idempotent() {
    let mut sched = make_scheduler();
    sched.resize(800, 600, 1.0);
    let aspect_once = sched.store.camera.aspect;
    let size_once = sched.pipeline.size();
    sched.resize(800, 600, 1.0);
    assert_eq!(sched.store.camera.aspect, aspect_once);
    assert_eq!(sched.pipeline.size(), size_once);
    assert!((sched.store.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert_eq!(sched.pipeline.size(), (800, 600));
}

#[test]
fn resize_caps_pixel_ratio_and_clamps_zero_sizes() {
    let mut sched = make_scheduler();
    sched.resize(400, 300, 3.0);
    assert_eq!(sched.store.viewport.pixel_ratio, 2.0);
    assert_eq!(sched.store.viewport.drawing_buffer_size(), (800, 600));

    sched.resize(0, 0, 1.0);
    assert_eq!(sched.pipeline.size(), (1, 1));
    assert!(sched.store.camera.aspect.is_finite());
}

#[test]
fn resize_event_dispatches_like_the_handler() {
    let mut sched = make_scheduler();
    sched.dispatch(
        InputEvent::Resize {
            width: 640,
            height: 480,
            device_pixel_ratio: 1.0,
        },
        &SilentSink,
        Duration::ZERO,
    );
    assert_eq!(sched.pipeline.size(), (640, 480));
    assert_eq!(sched.store.viewport.width, 640);
}

#[test]
fn pointer_ndc_maps_corners_and_center() {
    let vp = Viewport::new(200, 100, 1.0);
    assert_eq!(pointer_ndc(&vp, 0.0, 0.0), glam::Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(&vp, 200.0, 100.0), glam::Vec2::new(1.0, -1.0));
    assert_eq!(pointer_ndc(&vp, 100.0, 50.0), glam::Vec2::new(0.0, 0.0));
}

#[test]
fn pointer_move_eases_camera_toward_target_over_one_second() {
    let mut sched = make_scheduler();
    // top-right corner -> ndc (1, 1) -> target (2, 2, 5)
    sched.dispatch(
        InputEvent::PointerMove { x: 1000.0, y: 0.0 },
        &SilentSink,
        Duration::ZERO,
    );
    sched.advance(ms(500));
    let mid = sched.store.camera.position;
    assert!(mid.x > 0.0 && mid.x < 2.0);
    // quadratic ease-out is past halfway at t = 0.5
    assert!((mid.x - 1.5).abs() < 1e-4);
    assert_eq!(mid.z, 5.0);

    sched.advance(ms(1000));
    assert_eq!(sched.store.camera.position, Vec3::new(2.0, 2.0, 5.0));
    assert!(sched.reactor.camera_transition().is_none());
}

#[test]
fn second_pointer_move_retargets_without_snapping() {
    let mut sched = make_scheduler();
    let first = InputEvent::PointerMove { x: 1000.0, y: 0.0 }; // -> (2, 2)
    let second = InputEvent::PointerMove { x: 0.0, y: 500.0 }; // -> (-2, -2)

    sched.dispatch(first, &SilentSink, Duration::ZERO);
    sched.advance(ms(300));
    let before = sched.store.camera.position;

    sched.dispatch(second, &SilentSink, ms(300));
    let t = sched.reactor.camera_transition().expect("one active transition");
    assert_eq!(t.target(), Vec3::new(-2.0, -2.0, 5.0));

    // the next frame continues from where the camera was, not from a jump
    sched.advance(ms(316));
    let after = sched.store.camera.position;
    assert!((after - before).length() < 0.2);

    let mut max_x = after.x;
    for step in 0..=80 {
        sched.advance(ms(316 + step * 16));
        max_x = max_x.max(sched.store.camera.position.x);
    }
    // never reached the first target
    assert!(max_x < 2.0);
    assert_eq!(sched.store.camera.position, Vec3::new(-2.0, -2.0, 5.0));
}

#[test]
fn click_enables_glitch_and_plays_click_cue() {
    let mut sched = make_scheduler();
    let audio = CueLog::default();
    sched.dispatch(InputEvent::Click, &audio, ms(1000));
    assert!(sched.pipeline.glitch_enabled());
    assert_eq!(audio.played.borrow().as_slice(), &[SoundCue::Click]);
}

#[test]
fn isolated_click_disables_glitch_no_earlier_than_200ms() {
    let mut sched = make_scheduler();
    sched.dispatch(InputEvent::Click, &SilentSink, ms(1000));

    sched.advance(ms(1016));
    assert!(sched.pipeline.glitch_enabled());
    sched.advance(ms(1199));
    assert!(sched.pipeline.glitch_enabled());
    sched.advance(ms(1200));
    assert!(!sched.pipeline.glitch_enabled());
    assert!(sched.reactor.timers().is_empty());
}

#[test]
fn second_click_restarts_the_glitch_timer() {
    let mut sched = make_scheduler();
    sched.dispatch(InputEvent::Click, &SilentSink, ms(1000));
    sched.advance(ms(1150));
    sched.dispatch(InputEvent::Click, &SilentSink, ms(1150));

    // the first deadline was cancelled
    sched.advance(ms(1250));
    assert!(sched.pipeline.glitch_enabled());
    sched.advance(ms(1350));
    assert!(!sched.pipeline.glitch_enabled());
}

#[test]
fn click_without_audio_still_toggles_glitch() {
    let mut sched = make_scheduler();
    sched.dispatch(InputEvent::Click, &SilentSink, Duration::ZERO);
    assert!(sched.pipeline.glitch_enabled());
}
