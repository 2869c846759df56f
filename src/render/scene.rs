use super::helpers;
use super::targets::OFFSCREEN_FORMAT;
use crate::constants::BILLBOARD_VERTICES;
use fnv::FnvHashMap;
use neon_core::geometry::{LineGeometry, LineVertex};
use neon_core::uniforms::{MeshUniforms, PointsUniforms, SceneUniforms};
use neon_core::{ObjectId, ParticleCloud, SceneObject, SceneStore};
use wgpu;
use wgpu::util::DeviceExt;

struct LineBatch {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct PointBatch {
    positions: wgpu::Buffer,
    attributes: wgpu::Buffer,
    count: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// GPU mirror of the scene store. Buffers are created the first time an
/// object is seen and dropped once it leaves the store.
pub(crate) struct SceneResources {
    object_bgl: wgpu::BindGroupLayout,
    scene_uniform: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    lines_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    lines: FnvHashMap<ObjectId, LineBatch>,
    points: FnvHashMap<ObjectId, PointBatch>,
}

const LINE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
// rgb colour + size multiplier
const PARTICLE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let lines_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(super::LINES_WGSL.into()),
        });
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(super::POINTS_WGSL.into()),
        });
        let vis = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let scene_bgl = helpers::uniform_layout(device, "scene_bgl", vis);
        let object_bgl = helpers::uniform_layout(device, "object_bgl", vis);
        let scene_uniform =
            helpers::uniform_buffer(device, "scene_uniforms", std::mem::size_of::<SceneUniforms>());
        let scene_bind_group =
            helpers::uniform_bind_group(device, "scene_bg", &scene_bgl, &scene_uniform);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let lines_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lines_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &lines_shader,
                entry_point: Some("vs_lines"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &LINE_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &lines_shader,
                entry_point: Some("fs_lines"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: OFFSCREEN_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let points_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &points_shader,
                entry_point: Some("vs_points"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: 12,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &POSITION_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: 16,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &PARTICLE_ATTRS,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &points_shader,
                entry_point: Some("fs_points"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: OFFSCREEN_FORMAT,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            object_bgl,
            scene_uniform,
            scene_bind_group,
            lines_pipeline,
            points_pipeline,
            lines: FnvHashMap::default(),
            points: FnvHashMap::default(),
        }
    }

    fn line_batch(&self, device: &wgpu::Device, geometry: &LineGeometry) -> LineBatch {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line_vertices"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform =
            helpers::uniform_buffer(device, "mesh_uniforms", std::mem::size_of::<MeshUniforms>());
        let bind_group = helpers::uniform_bind_group(device, "mesh_bg", &self.object_bgl, &uniform);
        LineBatch {
            vertices,
            vertex_count: geometry.vertices.len() as u32,
            uniform,
            bind_group,
        }
    }

    fn point_batch(&self, device: &wgpu::Device, cloud: &ParticleCloud) -> PointBatch {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_positions"),
            contents: bytemuck::cast_slice(cloud.positions()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let packed: Vec<[f32; 4]> = cloud
            .colors()
            .chunks_exact(3)
            .zip(cloud.sizes())
            .map(|(c, s)| [c[0], c[1], c[2], *s])
            .collect();
        let attributes = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_attributes"),
            contents: bytemuck::cast_slice(&packed),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform = helpers::uniform_buffer(
            device,
            "points_uniforms",
            std::mem::size_of::<PointsUniforms>(),
        );
        let bind_group =
            helpers::uniform_bind_group(device, "points_bg", &self.object_bgl, &uniform);
        PointBatch {
            positions,
            attributes,
            count: cloud.count() as u32,
            uniform,
            bind_group,
        }
    }

    /// Bring GPU buffers in line with the store and upload per-frame data.
    pub(crate) fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        store: &SceneStore,
        frame: &SceneUniforms,
    ) {
        queue.write_buffer(&self.scene_uniform, 0, bytemuck::bytes_of(frame));

        let mut live: Vec<ObjectId> = Vec::with_capacity(store.len());
        for (id, object) in store.objects() {
            live.push(id);
            match object {
                SceneObject::Sphere(mesh) => {
                    if !self.lines.contains_key(&id) {
                        let batch = self.line_batch(device, &mesh.geometry);
                        self.lines.insert(id, batch);
                    }
                    if let Some(batch) = self.lines.get(&id) {
                        let u = MeshUniforms::from_mesh(mesh);
                        queue.write_buffer(&batch.uniform, 0, bytemuck::bytes_of(&u));
                    }
                }
                SceneObject::Grid(grid) => {
                    if !self.lines.contains_key(&id) {
                        let batch = self.line_batch(device, &grid.geometry);
                        self.lines.insert(id, batch);
                    }
                    if let Some(batch) = self.lines.get(&id) {
                        let m = &grid.material;
                        let u = MeshUniforms::new(&grid.transform, m.color, m.opacity, m.lit);
                        queue.write_buffer(&batch.uniform, 0, bytemuck::bytes_of(&u));
                    }
                }
                SceneObject::Particles(cloud) => {
                    let fresh = !self.points.contains_key(&id);
                    if fresh {
                        let batch = self.point_batch(device, cloud);
                        self.points.insert(id, batch);
                    }
                    if let Some(batch) = self.points.get(&id) {
                        if cloud.is_dirty() && !fresh {
                            queue.write_buffer(
                                &batch.positions,
                                0,
                                bytemuck::cast_slice(cloud.positions()),
                            );
                        }
                        let u = PointsUniforms {
                            params: [cloud.material.size, cloud.material.opacity, 0.0, 0.0],
                        };
                        queue.write_buffer(&batch.uniform, 0, bytemuck::bytes_of(&u));
                    }
                }
                // lights only feed the scene uniforms
                SceneObject::Light(_) => {}
            }
        }
        self.lines.retain(|id, _| live.contains(id));
        self.points.retain(|id, _| live.contains(id));
    }

    /// Draw every object in store order into `target`.
    pub(crate) fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        store: &SceneStore,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.scene_bind_group, &[]);

        rpass.set_pipeline(&self.lines_pipeline);
        for (id, _) in store.objects() {
            if let Some(batch) = self.lines.get(&id) {
                rpass.set_bind_group(1, &batch.bind_group, &[]);
                rpass.set_vertex_buffer(0, batch.vertices.slice(..));
                rpass.draw(0..batch.vertex_count, 0..1);
            }
        }

        // particles last so they add on top of the wireframes
        rpass.set_pipeline(&self.points_pipeline);
        for (id, _) in store.objects() {
            if let Some(batch) = self.points.get(&id) {
                rpass.set_bind_group(1, &batch.bind_group, &[]);
                rpass.set_vertex_buffer(0, batch.positions.slice(..));
                rpass.set_vertex_buffer(1, batch.attributes.slice(..));
                rpass.draw(0..BILLBOARD_VERTICES, 0..batch.count);
            }
        }
    }
}
