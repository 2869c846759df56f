// Browser-side selectors and render tuning. Scene tuning lives in
// `neon_core::constants`. No web-sys types here so host tests can include it.

// DOM hooks
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";
pub const HOVER_CARD_SELECTOR: &str = ".hover-card";
pub const GLITCH_TEXT_SELECTOR: &str = ".glitch-effect";
pub const HASH_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const INTERACTIVE_SELECTOR: &str = "a, button, .hover-card";

// 2D backdrop canvas, drawn behind the WebGPU canvas. CSS size follows the
// window; the backing store is set separately in CSS pixels.
pub const BACKDROP_Z_INDEX: &str = "-2";
pub const BACKDROP_STYLES: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", BACKDROP_Z_INDEX),
    ("pointer-events", "none"),
];

// Scene clear colour (linear), matches the page background
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Offscreen targets: scene HDR, half-res bloom ping-pong, post output
pub const BLOOM_DOWNSCALE: u32 = 2;

// Particle billboards are rendered as two triangles per instance
pub const BILLBOARD_VERTICES: u32 = 6;

/// Half-resolution size of the bloom buffers for a drawing buffer.
#[inline]
pub fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    (
        (width.max(1) / BLOOM_DOWNSCALE).max(1),
        (height.max(1) / BLOOM_DOWNSCALE).max(1),
    )
}

/// Seed for the core RNGs from a `Math.random()` sample in [0, 1).
#[inline]
pub fn seed_from_unit(sample: f64) -> u64 {
    (sample.clamp(0.0, 1.0) * u32::MAX as f64) as u64
}
