//! Scene construction parameters.

use crate::constants::{PARTICLE_COUNT, PARTICLE_SIZE, PARTICLE_SPREAD};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("particle count must be positive")]
    EmptyParticleCloud,
    #[error("{field} must be finite and positive, got {value}")]
    InvalidDimension { field: &'static str, value: f32 },
    #[error("neon light count must be between 1 and {max}, got {count}")]
    NeonCount { count: usize, max: usize },
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub particle_spread: f32,
    pub particle_size: f32,
    pub neon_lights: usize,
    /// Seed for particle placement and colours.
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            particle_spread: PARTICLE_SPREAD,
            particle_size: PARTICLE_SIZE,
            neon_lights: crate::constants::NEON_COLORS.len(),
            seed: 42,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.particle_count == 0 {
            return Err(SceneError::EmptyParticleCloud);
        }
        for (field, value) in [
            ("particle_spread", self.particle_spread),
            ("particle_size", self.particle_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SceneError::InvalidDimension { field, value });
            }
        }
        let max = crate::constants::NEON_COLORS.len();
        if self.neon_lights == 0 || self.neon_lights > max {
            return Err(SceneError::NeonCount {
                count: self.neon_lights,
                max,
            });
        }
        Ok(())
    }
}
