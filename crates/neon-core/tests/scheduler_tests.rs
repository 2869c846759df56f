// Host-side tests for the frame scheduler, animators and pass chain.

use neon_core::pipeline::{PassContext, PassError, PassExecutor, PassKind};
use neon_core::*;
use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Default)]
struct RecordingExecutor {
    resizes: Vec<(u32, u32)>,
    passes: Vec<PassKind>,
    presents: usize,
    fail_on: Option<PassKind>,
}

impl PassExecutor for RecordingExecutor {
    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn execute(&mut self, pass: PassKind, _ctx: &PassContext<'_>) -> Result<(), PassError> {
        if self.fail_on == Some(pass) {
            return Err(PassError::Failed {
                pass,
                reason: "injected".into(),
            });
        }
        self.passes.push(pass);
        Ok(())
    }

    fn present(&mut self) -> Result<(), PassError> {
        self.presents += 1;
        Ok(())
    }
}

fn make_scheduler() -> FrameScheduler {
    FrameScheduler::new(&SceneConfig::default(), Viewport::new(1280, 720, 1.0))
        .expect("default config is valid")
}

#[test]
fn first_tick_at_zero_spins_outer_sphere_and_places_neon_lights() {
    let mut sched = make_scheduler();
    let mut exec = RecordingExecutor::default();
    sched.tick(Duration::ZERO, &mut exec);

    let outer = sched
        .store
        .mesh(sched.handles.outer_sphere.unwrap())
        .unwrap();
    assert!((outer.transform.rotation.x - 0.001).abs() < 1e-7);
    assert!((outer.transform.rotation.y - 0.002).abs() < 1e-7);

    let inner = sched
        .store
        .mesh(sched.handles.inner_sphere.unwrap())
        .unwrap();
    assert!((inner.transform.rotation.x + 0.002).abs() < 1e-7);
    assert!((inner.transform.rotation.y + 0.001).abs() < 1e-7);

    let neon = sched.store.neon_lights();
    assert_eq!(neon.len(), 3);
    let expected = (TAU / 3.0).sin() * 10.0;
    assert!((neon[1].position.x - expected).abs() < 1e-4);
    assert!((neon[1].position.x - 8.660).abs() < 1e-3);
}

#[test]
fn rotation_accumulates_per_tick_without_wrapping() {
    let mut sched = make_scheduler();
    for i in 0..1000 {
        sched.advance(Duration::from_millis(i * 16));
    }
    let outer = sched
        .store
        .mesh(sched.handles.outer_sphere.unwrap())
        .unwrap();
    assert!((outer.transform.rotation.x - 1.0).abs() < 1e-3);
    assert!((outer.transform.rotation.y - 2.0).abs() < 1e-3);
    assert_eq!(sched.ticks(), 1000);
}

#[test]
fn animators_run_in_fixed_order() {
    let sched = make_scheduler();
    assert_eq!(
        sched.animator_names(),
        vec!["rotation", "particles", "light_orbit"]
    );
}

#[test]
fn light_orbit_replay_matches_fresh_advance() {
    let mut stepped = make_scheduler();
    for ms in (0..=2500).step_by(16) {
        stepped.advance(Duration::from_millis(ms));
    }
    stepped.advance(Duration::from_millis(2517));

    let mut fresh = make_scheduler();
    fresh.advance(Duration::from_millis(2517));

    let a = stepped.store.neon_lights();
    let b = fresh.store.neon_lights();
    assert_eq!(a.len(), b.len());
    for (la, lb) in a.iter().zip(b.iter()) {
        assert_eq!(la.position, lb.position);
    }
}

#[test]
fn neon_light_height_is_untouched_by_orbit() {
    let mut sched = make_scheduler();
    let before: Vec<f32> = sched
        .store
        .neon_lights()
        .iter()
        .map(|l| l.position.y)
        .collect();
    sched.advance(Duration::from_secs(3));
    let after: Vec<f32> = sched
        .store
        .neon_lights()
        .iter()
        .map(|l| l.position.y)
        .collect();
    assert_eq!(before, after);
}

#[test]
fn particle_buffer_length_is_fixed() {
    let mut sched = make_scheduler();
    for i in 0..50 {
        sched.advance(Duration::from_millis(i * 16));
    }
    let cloud = sched.store.particles().next().unwrap();
    assert_eq!(cloud.count(), PARTICLE_COUNT);
    assert_eq!(cloud.positions().len(), 3 * PARTICLE_COUNT);
    assert_eq!(cloud.colors().len(), 3 * PARTICLE_COUNT);
    assert_eq!(cloud.sizes().len(), PARTICLE_COUNT);
}

#[test]
fn particle_height_depends_only_on_time_and_x() {
    let mut a = make_scheduler();
    let mut b = make_scheduler();
    for i in 0..30 {
        a.advance(Duration::from_millis(i * 33));
    }
    b.advance(Duration::from_millis(29 * 33));
    let pa = a.store.particles().next().unwrap().positions().to_vec();
    let pb = b.store.particles().next().unwrap().positions().to_vec();
    assert_eq!(pa, pb);

    // displacement stays within the wave amplitude
    let cloud = a.store.particles().next().unwrap();
    for (i, base) in cloud.base_y().iter().enumerate() {
        let y = cloud.positions()[i * 3 + 1];
        assert!((y - base).abs() <= PARTICLE_WAVE_AMPLITUDE + 1e-6);
    }
}

#[test]
fn particle_animator_marks_buffer_dirty_every_tick() {
    let mut sched = make_scheduler();
    for cloud in sched.store.particles_mut() {
        assert!(cloud.take_dirty());
        assert!(!cloud.is_dirty());
    }
    sched.advance(Duration::from_millis(16));
    assert!(sched.store.particles().all(|c| c.is_dirty()));

    // a full tick hands the buffer to the executor and clears the flag
    let mut exec = RecordingExecutor::default();
    sched.tick(Duration::from_millis(32), &mut exec);
    assert!(sched.store.particles().all(|c| !c.is_dirty()));
}

#[test]
fn animators_are_no_ops_on_an_empty_store() {
    let mut store = SceneStore::new(Viewport::new(100, 100, 1.0));
    let t = FrameTime {
        elapsed_secs: 1.0,
        tick: 0,
    };
    ParticleAnimator.advance(&mut store, t);
    LightOrbitAnimator.advance(&mut store, t);
    assert!(store.is_empty());
}

#[test]
fn render_runs_enabled_passes_in_order_and_presents() {
    let mut sched = make_scheduler();
    let mut exec = RecordingExecutor::default();
    let report = sched.tick(Duration::ZERO, &mut exec);
    assert_eq!(exec.passes, vec![PassKind::Base, PassKind::Bloom]);
    assert_eq!(report.executed.as_slice(), &[PassKind::Base, PassKind::Bloom]);
    assert!(report.presented);
    assert_eq!(exec.presents, 1);

    sched.pipeline.set_glitch_enabled(true);
    exec.passes.clear();
    sched.tick(Duration::from_millis(16), &mut exec);
    assert_eq!(
        exec.passes,
        vec![PassKind::Base, PassKind::Bloom, PassKind::Glitch]
    );
}

#[test]
fn failing_pass_is_skipped_and_loop_continues() {
    let mut sched = make_scheduler();
    let mut exec = RecordingExecutor {
        fail_on: Some(PassKind::Bloom),
        ..Default::default()
    };
    let report = sched.tick(Duration::ZERO, &mut exec);
    assert_eq!(report.failed.as_slice(), &[PassKind::Bloom]);
    assert_eq!(report.executed.as_slice(), &[PassKind::Base]);
    assert!(report.presented);

    let report = sched.tick(Duration::from_millis(16), &mut exec);
    assert_eq!(report.executed.as_slice(), &[PassKind::Base]);
    assert_eq!(sched.ticks(), 2);
}

#[test]
fn executor_is_resized_only_when_drawing_buffer_changes() {
    let mut sched = make_scheduler();
    let mut exec = RecordingExecutor::default();
    sched.tick(Duration::ZERO, &mut exec);
    sched.tick(Duration::from_millis(16), &mut exec);
    assert_eq!(exec.resizes, vec![(1280, 720)]);

    sched.resize(800, 600, 2.0);
    sched.tick(Duration::from_millis(32), &mut exec);
    sched.resize(800, 600, 2.0);
    sched.tick(Duration::from_millis(48), &mut exec);
    assert_eq!(exec.resizes, vec![(1280, 720), (1600, 1200)]);
}

#[test]
fn pass_order_is_fixed_with_glitch_disabled_by_default() {
    let pipeline = RenderPipeline::new(10, 10);
    let kinds: Vec<PassKind> = pipeline.passes().iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PassKind::Base, PassKind::Bloom, PassKind::Glitch]);
    assert!(!pipeline.glitch_enabled());
    assert_eq!(*pipeline.bloom(), BloomParams::default());
    assert!((pipeline.bloom().strength - 1.5).abs() < f32::EPSILON);
}
