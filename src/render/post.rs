use super::helpers;
use super::targets::{RenderTargets, Target, OFFSCREEN_FORMAT};
use neon_core::uniforms::PostUniforms;
use wgpu;

/// One post stage's uniforms. Each stage owns its buffer so every write
/// made while encoding a frame survives until submit.
pub(crate) struct PostStage {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl PostStage {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer =
            helpers::uniform_buffer(device, label, std::mem::size_of::<PostUniforms>());
        let bind_group = helpers::uniform_bind_group(device, label, layout, &buffer);
        Self { buffer, bind_group }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, u: &PostUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(u));
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl_tex: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
    pub(crate) glitch_pipeline: wgpu::RenderPipeline,
    pub(crate) copy_pipeline: wgpu::RenderPipeline,
    pub(crate) bright: PostStage,
    pub(crate) blur_h: PostStage,
    pub(crate) blur_v: PostStage,
    pub(crate) composite: PostStage,
    pub(crate) glitch: PostStage,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl_tex = helpers::texture_layout(device, "post_bgl_tex");
    let bgl_uniform =
        helpers::uniform_layout(device, "post_bgl_uniform", wgpu::ShaderStages::FRAGMENT);

    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_single"),
        bind_group_layouts: &[&bgl_tex, &bgl_uniform],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl_tex, &bgl_uniform, &bgl_tex],
        push_constant_ranges: &[],
    });
    let pl_copy = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_copy"),
        bind_group_layouts: &[&bgl_tex],
        push_constant_ranges: &[],
    });

    let pipeline = |layout: &wgpu::PipelineLayout, entry: &str, format: wgpu::TextureFormat| {
        helpers::make_post_pipeline(device, layout, post_shader, entry, format, None)
    };
    let bright_pipeline = pipeline(&pl_single, "fs_bright", OFFSCREEN_FORMAT);
    let blur_pipeline = pipeline(&pl_single, "fs_blur", OFFSCREEN_FORMAT);
    let composite_pipeline = pipeline(&pl_composite, "fs_composite", OFFSCREEN_FORMAT);
    let glitch_pipeline = pipeline(&pl_single, "fs_glitch", OFFSCREEN_FORMAT);
    let copy_pipeline = pipeline(&pl_copy, "fs_copy", swap_format);

    PostResources {
        bright: PostStage::new(device, &bgl_uniform, "post_bright"),
        blur_h: PostStage::new(device, &bgl_uniform, "post_blur_h"),
        blur_v: PostStage::new(device, &bgl_uniform, "post_blur_v"),
        composite: PostStage::new(device, &bgl_uniform, "post_composite"),
        glitch: PostStage::new(device, &bgl_uniform, "post_glitch"),
        bgl_tex,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
        glitch_pipeline,
        copy_pipeline,
    }
}

/// Texture+sampler bind groups for every offscreen target. Rebuilt
/// whenever the targets are recreated.
pub(crate) struct SourceBindGroups {
    groups: [wgpu::BindGroup; 5],
}

impl SourceBindGroups {
    pub(crate) fn new(
        device: &wgpu::Device,
        post: &PostResources,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
    ) -> Self {
        let make = |target: Target| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("post_source"),
                layout: &post.bgl_tex,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(targets.view(target)),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        Self {
            groups: [
                make(Target::Hdr),
                make(Target::BloomA),
                make(Target::BloomB),
                make(Target::PostA),
                make(Target::PostB),
            ],
        }
    }

    pub(crate) fn get(&self, target: Target) -> &wgpu::BindGroup {
        let i = match target {
            Target::Hdr => 0,
            Target::BloomA => 1,
            Target::BloomB => 2,
            Target::PostA => 3,
            Target::PostB => 4,
        };
        &self.groups[i]
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    groups: &[&wgpu::BindGroup],
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
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
    r.set_pipeline(pipeline);
    for (i, g) in groups.iter().enumerate() {
        r.set_bind_group(i as u32, *g, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}
