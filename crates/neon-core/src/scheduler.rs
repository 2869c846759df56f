use crate::animators::{
    Animator, FrameTime, LightOrbitAnimator, ParticleAnimator, RotationAnimator,
};
use crate::config::{SceneConfig, SceneError};
use crate::constants::{INNER_SPIN_PER_TICK, OUTER_SPIN_PER_TICK};
use crate::input::{InputEvent, InputReactor};
use crate::pipeline::{FrameReport, PassExecutor, RenderPipeline};
use crate::scene::{SceneHandles, SceneStore, Viewport};
use crate::sound::AudioSink;
use glam::Vec3;
use std::time::Duration;

/// Owns the scene and drives one tick per display refresh:
/// input update → animators (rotation, particles, light orbit) → render.
pub struct FrameScheduler {
    pub store: SceneStore,
    pub pipeline: RenderPipeline,
    pub reactor: InputReactor,
    pub handles: SceneHandles,
    animators: Vec<Box<dyn Animator>>,
    ticks: u64,
}

impl FrameScheduler {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Result<Self, SceneError> {
        let mut store = SceneStore::new(viewport);
        let handles = store.populate(config)?;

        let mut rotation = RotationAnimator::new();
        if let Some(id) = handles.outer_sphere {
            rotation = rotation.with_spin(
                id,
                Vec3::new(OUTER_SPIN_PER_TICK[0], OUTER_SPIN_PER_TICK[1], 0.0),
            );
        }
        if let Some(id) = handles.inner_sphere {
            rotation = rotation.with_spin(
                id,
                Vec3::new(INNER_SPIN_PER_TICK[0], INNER_SPIN_PER_TICK[1], 0.0),
            );
        }
        let animators: Vec<Box<dyn Animator>> = vec![
            Box::new(rotation),
            Box::new(ParticleAnimator),
            Box::new(LightOrbitAnimator),
        ];

        Ok(Self {
            store,
            pipeline: RenderPipeline::new(viewport.width, viewport.height),
            reactor: InputReactor::new(),
            handles,
            animators,
            ticks: 0,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn animator_names(&self) -> Vec<&'static str> {
        self.animators.iter().map(|a| a.name()).collect()
    }

    /// One tick without drawing.
    pub fn advance(&mut self, elapsed: Duration) -> FrameTime {
        let time = FrameTime {
            elapsed_secs: elapsed.as_secs_f64(),
            tick: self.ticks,
        };
        self.reactor
            .update(&mut self.store, &mut self.pipeline, elapsed);
        for animator in self.animators.iter_mut() {
            animator.advance(&mut self.store, time);
        }
        self.ticks += 1;
        time
    }

    /// One full tick: advance, then run the pass chain.
    pub fn tick(&mut self, elapsed: Duration, executor: &mut impl PassExecutor) -> FrameReport {
        let time = self.advance(elapsed);
        let physical = self.store.viewport.drawing_buffer_size();
        let report = self
            .pipeline
            .render(&self.store, time, physical, executor);
        // the executor uploaded whatever was dirty during the base pass
        for cloud in self.store.particles_mut() {
            cloud.take_dirty();
        }
        report
    }

    pub fn dispatch(&mut self, event: InputEvent, audio: &dyn AudioSink, now: Duration) {
        self.reactor
            .dispatch(event, &mut self.store, &mut self.pipeline, audio, now);
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) {
        self.reactor.on_resize(
            &mut self.store,
            &mut self.pipeline,
            width,
            height,
            device_pixel_ratio,
        );
    }
}
