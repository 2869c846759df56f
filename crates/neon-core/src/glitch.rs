//! Per-frame parameters for the glitch pass.
//!
//! Every `trigger` frames the effect goes "wild" (large offset, strong
//! colour split); for the first fifth of each cycle it jitters lightly; the
//! rest of the cycle passes the image through.

use rand::prelude::*;
use std::f32::consts::PI;

const TRIGGER_MIN_FRAMES: u32 = 120;
const TRIGGER_MAX_FRAMES: u32 = 240;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchParams {
    pub bypass: bool,
    pub amount: f32,
    pub angle: f32,
    pub seed: f32,
    pub seed_x: f32,
    pub seed_y: f32,
    pub distortion_x: f32,
    pub distortion_y: f32,
    pub col_s: f32,
}

pub struct GlitchState {
    rng: StdRng,
    frame: u32,
    trigger: u32,
}

impl GlitchState {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let trigger = rng.gen_range(TRIGGER_MIN_FRAMES..TRIGGER_MAX_FRAMES);
        Self {
            rng,
            frame: 0,
            trigger,
        }
    }

    pub fn trigger(&self) -> u32 {
        self.trigger
    }

    /// Parameters for the next glitched frame.
    pub fn next_frame(&mut self) -> GlitchParams {
        let phase = self.frame % self.trigger;
        let params = if phase == 0 {
            let p = GlitchParams {
                bypass: false,
                amount: self.rng.gen::<f32>() / 30.0,
                angle: self.rng.gen_range(-PI..PI),
                seed: self.rng.gen::<f32>(),
                seed_x: self.rng.gen_range(-1.0..1.0),
                seed_y: self.rng.gen_range(-1.0..1.0),
                distortion_x: self.rng.gen::<f32>(),
                distortion_y: self.rng.gen::<f32>(),
                col_s: 0.05,
            };
            self.frame = 0;
            self.trigger = self
                .rng
                .gen_range(TRIGGER_MIN_FRAMES..TRIGGER_MAX_FRAMES);
            p
        } else if phase < self.trigger / 5 {
            GlitchParams {
                bypass: false,
                amount: self.rng.gen::<f32>() / 90.0,
                angle: self.rng.gen_range(-PI..PI),
                seed: self.rng.gen::<f32>(),
                seed_x: self.rng.gen_range(-0.3..0.3),
                seed_y: self.rng.gen_range(-0.3..0.3),
                distortion_x: self.rng.gen::<f32>(),
                distortion_y: self.rng.gen::<f32>(),
                col_s: 0.0,
            }
        } else {
            GlitchParams {
                bypass: true,
                ..GlitchParams::default()
            }
        };
        self.frame += 1;
        params
    }
}
