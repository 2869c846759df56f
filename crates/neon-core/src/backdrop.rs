//! Flat particle drift behind the 3D canvas.

use rand::prelude::*;

pub const BACKDROP_PARTICLES: usize = 100;
pub const BACKDROP_MAX_SIZE: f32 = 2.0;
pub const BACKDROP_MAX_SPEED: f32 = 0.25;
pub const BACKDROP_MAX_OPACITY: f32 = 0.5;
pub const BACKDROP_RGB: [u8; 3] = [0, 247, 255];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
}

impl Mote {
    fn spawn(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            size: rng.gen::<f32>() * BACKDROP_MAX_SIZE,
            vx: (rng.gen::<f32>() - 0.5) * 2.0 * BACKDROP_MAX_SPEED,
            vy: (rng.gen::<f32>() - 0.5) * 2.0 * BACKDROP_MAX_SPEED,
            opacity: rng.gen::<f32>() * BACKDROP_MAX_OPACITY,
        }
    }

    fn outside(&self, width: f32, height: f32) -> bool {
        self.x < 0.0 || self.x > width || self.y < 0.0 || self.y > height
    }
}

pub struct Backdrop {
    motes: Vec<Mote>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl Backdrop {
    pub fn new(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let motes = (0..count)
            .map(|_| Mote::spawn(&mut rng, width, height))
            .collect();
        Self {
            motes,
            width,
            height,
            rng,
        }
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Existing motes keep their positions; ones now outside respawn on
    /// their next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Move every mote by its velocity; motes leaving the canvas respawn.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for m in self.motes.iter_mut() {
            m.x += m.vx;
            m.y += m.vy;
            if m.outside(w, h) {
                *m = Mote::spawn(&mut self.rng, w, h);
            }
        }
    }
}

/// CSS fill colour for a mote.
pub fn mote_fill(opacity: f32) -> String {
    let [r, g, b] = BACKDROP_RGB;
    format!("rgba({}, {}, {}, {})", r, g, b, opacity)
}
