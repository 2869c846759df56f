use crate::constants::{NEON_ORBIT_RADIUS, PARTICLE_WAVE_AMPLITUDE};
use crate::scene::{ObjectId, SceneStore};
use glam::Vec3;
use smallvec::SmallVec;

/// Clock handed to every animator for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene started.
    pub elapsed_secs: f64,
    /// Number of ticks completed before this one.
    pub tick: u64,
}

pub trait Animator {
    fn name(&self) -> &'static str;
    fn advance(&mut self, store: &mut SceneStore, time: FrameTime);
}

/// Spins meshes by a fixed angle per tick. Frame-rate dependent on purpose.
#[derive(Clone, Debug, Default)]
pub struct RotationAnimator {
    spins: SmallVec<[(ObjectId, Vec3); 2]>,
}

impl RotationAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spin(mut self, id: ObjectId, per_tick: Vec3) -> Self {
        self.spins.push((id, per_tick));
        self
    }
}

impl Animator for RotationAnimator {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn advance(&mut self, store: &mut SceneStore, _time: FrameTime) {
        for (id, delta) in &self.spins {
            if let Some(mesh) = store.mesh_mut(*id) {
                mesh.transform.rotation += *delta;
            }
        }
    }
}

/// Ripples particle heights as a function of absolute time and their x.
#[derive(Clone, Debug, Default)]
pub struct ParticleAnimator;

impl Animator for ParticleAnimator {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn advance(&mut self, store: &mut SceneStore, time: FrameTime) {
        let t = time.elapsed_secs;
        for cloud in store.particles_mut() {
            let n = cloud.count();
            for i in 0..n {
                let base_y = cloud.base_y()[i];
                let p = &mut cloud.positions_mut()[i * 3..i * 3 + 3];
                let wave = (t + p[0] as f64).sin() as f32;
                p[1] = base_y + wave * PARTICLE_WAVE_AMPLITUDE;
            }
            cloud.mark_dirty();
        }
    }
}

/// Moves neon lights around a horizontal circle. Absolute-time based, so the
/// position at a given timestamp does not depend on earlier frames.
#[derive(Clone, Debug, Default)]
pub struct LightOrbitAnimator;

impl LightOrbitAnimator {
    /// Orbit position (x, z) for a light with the given phase at time `t`.
    pub fn orbit_xz(t: f64, phase: f32) -> (f32, f32) {
        let a = t + phase as f64;
        (
            (a.sin() * NEON_ORBIT_RADIUS as f64) as f32,
            (a.cos() * NEON_ORBIT_RADIUS as f64) as f32,
        )
    }
}

impl Animator for LightOrbitAnimator {
    fn name(&self) -> &'static str {
        "light_orbit"
    }

    fn advance(&mut self, store: &mut SceneStore, time: FrameTime) {
        for light in store.lights_mut() {
            if let Some(slot) = light.orbit {
                let (x, z) = Self::orbit_xz(time.elapsed_secs, slot.phase());
                light.position.x = x;
                light.position.z = z;
            }
        }
    }
}
