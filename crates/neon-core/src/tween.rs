use glam::Vec3;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out: fast start, gentle landing.
    QuadOut,
}

impl Ease {
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::QuadOut => 1.0 - (1.0 - p) * (1.0 - p),
        }
    }
}

/// A retargetable transition of a 3D value.
///
/// Retargeting starts a fresh segment from wherever the value currently is,
/// so there is never more than one segment in flight and the value never
/// jumps.
#[derive(Clone, Debug)]
pub struct Transition {
    from: Vec3,
    to: Vec3,
    started: Duration,
    duration: Duration,
    ease: Ease,
}

impl Transition {
    pub fn new(from: Vec3, to: Vec3, now: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
            ease,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_sub(self.started).as_secs_f32();
        (t / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Duration) -> Vec3 {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.ease.apply(p))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Aim at `to` from the value sampled at `now`, restarting the clock.
    pub fn retarget(&mut self, to: Vec3, now: Duration) {
        self.from = self.sample(now);
        self.to = to;
        self.started = now;
    }
}
