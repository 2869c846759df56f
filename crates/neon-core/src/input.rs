//! Input reactor: turns resize, pointer and click events into scene changes.
//!
//! Resize applies immediately. Pointer moves drive a single retargetable
//! camera transition. Clicks pulse the glitch pass through a keyed timer.
//! Deferred work is advanced by [`InputReactor::update`] at the start of
//! every frame tick.

use crate::constants::{CAMERA_PARALLAX_SCALE, CAMERA_TRANSITION, GLITCH_PULSE};
use crate::pipeline::RenderPipeline;
use crate::scene::{SceneStore, Viewport};
use crate::sound::{AudioSink, SoundCue};
use crate::timers::{ToggleId, ToggleTimers};
use crate::tween::{Ease, Transition};
use glam::{Vec2, Vec3};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// New window size in CSS pixels.
    Resize {
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    },
    /// Pointer position in CSS pixels relative to the window.
    PointerMove { x: f32, y: f32 },
    Click,
}

/// Map window coordinates to normalized device coordinates in [-1, 1],
/// y pointing up.
#[inline]
pub fn pointer_ndc(viewport: &Viewport, x: f32, y: f32) -> Vec2 {
    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    Vec2::new(
        ((x / w) * 2.0 - 1.0).clamp(-1.0, 1.0),
        (-(y / h) * 2.0 + 1.0).clamp(-1.0, 1.0),
    )
}

#[derive(Debug, Default)]
pub struct InputReactor {
    camera_transition: Option<Transition>,
    timers: ToggleTimers,
}

impl InputReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(
        &mut self,
        event: InputEvent,
        store: &mut SceneStore,
        pipeline: &mut RenderPipeline,
        audio: &dyn AudioSink,
        now: Duration,
    ) {
        match event {
            InputEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => self.on_resize(store, pipeline, width, height, device_pixel_ratio),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(store, x, y, now),
            InputEvent::Click => self.on_click(pipeline, audio, now),
        }
    }

    pub fn on_resize(
        &mut self,
        store: &mut SceneStore,
        pipeline: &mut RenderPipeline,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    ) {
        let viewport = Viewport::new(width, height, device_pixel_ratio);
        store.viewport = viewport;
        store.camera.aspect = viewport.aspect();
        pipeline.resize(viewport.width, viewport.height);
        log::debug!(
            "[input] resize {}x{} @{:.2}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
    }

    pub fn on_pointer_move(&mut self, store: &SceneStore, x: f32, y: f32, now: Duration) {
        let ndc = pointer_ndc(&store.viewport, x, y);
        let current = store.camera.position;
        let target = Vec3::new(
            ndc.x * CAMERA_PARALLAX_SCALE,
            ndc.y * CAMERA_PARALLAX_SCALE,
            current.z,
        );
        match &mut self.camera_transition {
            Some(t) => t.retarget(target, now),
            None => {
                self.camera_transition = Some(Transition::new(
                    current,
                    target,
                    now,
                    CAMERA_TRANSITION,
                    Ease::QuadOut,
                ))
            }
        }
    }

    pub fn on_click(&mut self, pipeline: &mut RenderPipeline, audio: &dyn AudioSink, now: Duration) {
        audio.play(SoundCue::Click);
        pipeline.set_glitch_enabled(true);
        self.timers
            .schedule(ToggleId::Glitch, now + GLITCH_PULSE, false);
    }

    /// Advance deferred work: step the camera transition and fire due timers.
    pub fn update(&mut self, store: &mut SceneStore, pipeline: &mut RenderPipeline, now: Duration) {
        if let Some(t) = &self.camera_transition {
            store.camera.position = t.sample(now);
            if t.is_finished(now) {
                self.camera_transition = None;
            }
        }
        for toggle in self.timers.drain_due(now) {
            match toggle.id {
                ToggleId::Glitch => pipeline.set_glitch_enabled(toggle.value),
            }
        }
    }

    pub fn camera_transition(&self) -> Option<&Transition> {
        self.camera_transition.as_ref()
    }

    pub fn timers(&self) -> &ToggleTimers {
        &self.timers
    }
}
