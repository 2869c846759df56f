//! GPU-facing uniform layouts. Every struct is a whole number of `vec4`s so
//! the WGSL side can declare them without padding surprises.

use crate::glitch::GlitchParams;
use crate::pipeline::BloomParams;
use crate::scene::{LightKind, SceneStore, Transform, WireMesh};

pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightPacked {
    /// xyz position, w range
    pub position_range: [f32; 4],
    /// rgb colour, w intensity
    pub color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// rgb pre-multiplied by intensity
    pub ambient: [f32; 4],
    pub lights: [PointLightPacked; MAX_POINT_LIGHTS],
    /// x elapsed seconds, y point light count, z viewport height (px)
    pub params: [f32; 4],
}

impl SceneUniforms {
    pub fn from_store(store: &SceneStore, elapsed_secs: f32, height_px: u32) -> Self {
        let mut ambient = [0.0_f32; 3];
        let mut lights = [PointLightPacked::default(); MAX_POINT_LIGHTS];
        let mut count = 0usize;
        for light in store.lights() {
            match light.kind {
                LightKind::Ambient => {
                    for c in 0..3 {
                        ambient[c] += light.color[c] * light.intensity;
                    }
                }
                LightKind::Point { range } => {
                    if count == MAX_POINT_LIGHTS {
                        continue;
                    }
                    let p = light.position;
                    lights[count] = PointLightPacked {
                        position_range: [p.x, p.y, p.z, range],
                        color_intensity: [
                            light.color[0],
                            light.color[1],
                            light.color[2],
                            light.intensity,
                        ],
                    };
                    count += 1;
                }
            }
        }
        let cam = store.camera.position;
        Self {
            view_proj: store.camera.view_projection().to_cols_array_2d(),
            camera_pos: [cam.x, cam.y, cam.z, 1.0],
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            lights,
            params: [elapsed_secs, count as f32, height_px as f32, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub model: [[f32; 4]; 4],
    /// rgb colour, w opacity
    pub color: [f32; 4],
    /// x: 1.0 when lit
    pub flags: [f32; 4],
}

impl MeshUniforms {
    pub fn new(transform: &Transform, color: [f32; 3], opacity: f32, lit: bool) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            color: [color[0], color[1], color[2], opacity],
            flags: [if lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    pub fn from_mesh(mesh: &WireMesh) -> Self {
        Self::new(
            &mesh.transform,
            mesh.material.color,
            mesh.material.opacity,
            mesh.material.lit,
        )
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsUniforms {
    /// x world size, y opacity
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    /// xy resolution, z time, w bloom radius
    pub frame: [f32; 4],
    /// xy blur direction, z bloom strength, w threshold
    pub bloom: [f32; 4],
    /// x amount, y angle, z seed, w colour split
    pub glitch: [f32; 4],
    /// xy distortion, zw seed offsets
    pub glitch_shift: [f32; 4],
}

impl PostUniforms {
    pub fn new(resolution: [f32; 2], time: f32, bloom: &BloomParams) -> Self {
        Self {
            frame: [resolution[0], resolution[1], time, bloom.radius],
            bloom: [0.0, 0.0, bloom.strength, bloom.threshold],
            ..Self::default()
        }
    }

    pub fn with_blur_dir(mut self, dir: [f32; 2]) -> Self {
        self.bloom[0] = dir[0];
        self.bloom[1] = dir[1];
        self
    }

    pub fn with_glitch(mut self, g: &GlitchParams) -> Self {
        if g.bypass {
            self.glitch = [0.0; 4];
            self.glitch_shift = [0.0; 4];
        } else {
            self.glitch = [g.amount, g.angle, g.seed, g.col_s];
            self.glitch_shift = [g.distortion_x, g.distortion_y, g.seed_x, g.seed_y];
        }
        self
    }
}
