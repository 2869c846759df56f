use std::time::Duration;

// Shared scene tuning constants used by the core and the web frontend.

// Camera
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 5.0];
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const PARTICLE_SPREAD: f32 = 50.0; // edge length of the spawn cube
pub const PARTICLE_SIZE: f32 = 0.1;
pub const PARTICLE_OPACITY: f32 = 0.8;
pub const PARTICLE_SIZE_ATTR_MAX: f32 = 2.0;
pub const PARTICLE_WAVE_AMPLITUDE: f32 = 0.01;

// Holographic spheres
pub const OUTER_SPHERE_RADIUS: f32 = 2.0;
pub const OUTER_SPHERE_DETAIL: u32 = 4;
pub const OUTER_SPHERE_COLOR: u32 = 0x00ffff;
pub const OUTER_SPHERE_OPACITY: f32 = 0.3;
pub const INNER_SPHERE_RADIUS: f32 = 1.8;
pub const INNER_SPHERE_DETAIL: u32 = 2;
pub const INNER_SPHERE_COLOR: u32 = 0xff00ff;
pub const INNER_SPHERE_OPACITY: f32 = 0.1;

// Per-tick spin (radians); x then y
pub const OUTER_SPIN_PER_TICK: [f32; 2] = [0.001, 0.002];
pub const INNER_SPIN_PER_TICK: [f32; 2] = [-0.002, -0.001];

// Grid floor
pub const GRID_SIZE: f32 = 100.0;
pub const GRID_DIVISIONS: u32 = 100;
pub const GRID_COLOR: u32 = 0x00ffff;
pub const GRID_Y: f32 = -5.0;

// Lights
pub const AMBIENT_COLOR: u32 = 0x00ffff;
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const PRIMARY_LIGHT_COLOR: u32 = 0x00ffff;
pub const PRIMARY_LIGHT_INTENSITY: f32 = 2.0;
pub const PRIMARY_LIGHT_RANGE: f32 = 100.0;
pub const PRIMARY_LIGHT_POSITION: [f32; 3] = [0.0, 10.0, 10.0];
pub const NEON_COLORS: [u32; 3] = [0xff00ff, 0x00ffff, 0xff0066];
pub const NEON_INTENSITY: f32 = 2.0;
pub const NEON_RANGE: f32 = 50.0;
pub const NEON_ORBIT_RADIUS: f32 = 10.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.85;

// Interaction
pub const CAMERA_PARALLAX_SCALE: f32 = 2.0; // ndc -> world units
pub const CAMERA_TRANSITION: Duration = Duration::from_secs(1);
pub const GLITCH_PULSE: Duration = Duration::from_millis(200);

/// Convert a packed `0xRRGGBB` colour to linear-ish `[r, g, b]` in 0..1.
#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
