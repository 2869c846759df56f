use crate::constants::{bloom_size, CLEAR_COLOR};
use neon_core::glitch::GlitchState;
use neon_core::pipeline::{PassContext, PassError, PassExecutor, PassKind};
use neon_core::uniforms::{PostUniforms, SceneUniforms};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
use targets::{RenderTargets, Target};

// Shaders bundled as string constants
pub(crate) static LINES_WGSL: &str = concat!(
    include_str!("../shaders/scene_common.wgsl"),
    include_str!("../shaders/lines.wgsl")
);
pub(crate) static POINTS_WGSL: &str = concat!(
    include_str!("../shaders/scene_common.wgsl"),
    include_str!("../shaders/points.wgsl")
);
pub(crate) static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

fn clear_color() -> wgpu::Color {
    let [r, g, b, a] = CLEAR_COLOR;
    wgpu::Color { r, g, b, a }
}

/// Command encoder for the frame being built; created by the first pass.
fn frame_encoder<'e>(
    slot: &'e mut Option<wgpu::CommandEncoder>,
    device: &wgpu::Device,
) -> &'e mut wgpu::CommandEncoder {
    slot.get_or_insert_with(|| {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        })
    })
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    sources: post::SourceBindGroups,
    scene: scene::SceneResources,
    glitch: GlitchState,

    encoder: Option<wgpu::CommandEncoder>,
    /// Buffer holding the output of the last pass that ran this frame.
    current: Target,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, glitch_seed: u64) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let targets = RenderTargets::new(&device, width, height);
        let sources = post::SourceBindGroups::new(&device, &post, &linear_sampler, &targets);
        let scene = scene::SceneResources::new(&device);
        log::info!("[gpu] surface {:?} {}x{}", format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            sources,
            scene,
            glitch: GlitchState::new(glitch_seed),
            encoder: None,
            current: Target::Hdr,
            width,
            height,
        })
    }

    fn base_pass(&mut self, ctx: &PassContext<'_>) -> Result<(), PassError> {
        let frame = SceneUniforms::from_store(ctx.store, ctx.time.elapsed_secs as f32, self.height);
        self.scene
            .sync(&self.device, &self.queue, ctx.store, &frame);
        let encoder = frame_encoder(&mut self.encoder, &self.device);
        self.scene
            .draw(encoder, &self.targets.hdr_view, clear_color(), ctx.store);
        self.current = Target::Hdr;
        Ok(())
    }

    /// Bright pass → horizontal blur → vertical blur at half resolution,
    /// then composite over the scene.
    fn bloom_pass(&mut self, ctx: &PassContext<'_>) -> Result<(), PassError> {
        let time = ctx.time.elapsed_secs as f32;
        let (bw, bh) = bloom_size(self.width, self.height);
        let half = PostUniforms::new([bw as f32, bh as f32], time, ctx.bloom);
        let full = PostUniforms::new([self.width as f32, self.height as f32], time, ctx.bloom);
        self.post.bright.write(&self.queue, &half);
        self.post
            .blur_h
            .write(&self.queue, &half.with_blur_dir([1.0, 0.0]));
        self.post
            .blur_v
            .write(&self.queue, &half.with_blur_dir([0.0, 1.0]));
        self.post.composite.write(&self.queue, &full);

        let source = self.current;
        let output = source.next_post();
        let black = wgpu::Color::BLACK;
        let encoder = frame_encoder(&mut self.encoder, &self.device);
        post::blit(
            encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            black,
            &self.post.bright_pipeline,
            &[self.sources.get(source), &self.post.bright.bind_group],
        );
        post::blit(
            encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            black,
            &self.post.blur_pipeline,
            &[
                self.sources.get(Target::BloomA),
                &self.post.blur_h.bind_group,
            ],
        );
        post::blit(
            encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            black,
            &self.post.blur_pipeline,
            &[
                self.sources.get(Target::BloomB),
                &self.post.blur_v.bind_group,
            ],
        );
        post::blit(
            encoder,
            "composite",
            self.targets.view(output),
            black,
            &self.post.composite_pipeline,
            &[
                self.sources.get(source),
                &self.post.composite.bind_group,
                self.sources.get(Target::BloomA),
            ],
        );
        self.current = output;
        Ok(())
    }

    fn glitch_pass(&mut self, ctx: &PassContext<'_>) -> Result<(), PassError> {
        let params = self.glitch.next_frame();
        let u = PostUniforms::new(
            [self.width as f32, self.height as f32],
            ctx.time.elapsed_secs as f32,
            ctx.bloom,
        )
        .with_glitch(&params);
        self.post.glitch.write(&self.queue, &u);

        let source = self.current;
        let output = source.next_post();
        let encoder = frame_encoder(&mut self.encoder, &self.device);
        post::blit(
            encoder,
            "glitch",
            self.targets.view(output),
            wgpu::Color::BLACK,
            &self.post.glitch_pipeline,
            &[self.sources.get(source), &self.post.glitch.bind_group],
        );
        self.current = output;
        Ok(())
    }
}

impl PassExecutor for GpuState<'_> {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        // Recreate offscreen render targets and the bind groups that sample them
        self.targets = RenderTargets::new(&self.device, width, height);
        self.sources = post::SourceBindGroups::new(
            &self.device,
            &self.post,
            &self.linear_sampler,
            &self.targets,
        );
        log::debug!("[gpu] resized to {}x{}", width, height);
    }

    fn execute(&mut self, pass: PassKind, ctx: &PassContext<'_>) -> Result<(), PassError> {
        match pass {
            PassKind::Base => self.base_pass(ctx),
            PassKind::Bloom => self.bloom_pass(ctx),
            PassKind::Glitch => self.glitch_pass(ctx),
        }
    }

    fn present(&mut self) -> Result<(), PassError> {
        let source = std::mem::replace(&mut self.current, Target::Hdr);
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(e) => {
                // drop the half-built frame; the next one starts clean
                self.encoder = None;
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.surface.configure(&self.device, &self.config);
                }
                return Err(PassError::Surface(format!("{:?}", e)));
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = frame_encoder(&mut self.encoder, &self.device);
        post::blit(
            encoder,
            "present",
            &view,
            clear_color(),
            &self.post.copy_pipeline,
            &[self.sources.get(source)],
        );
        if let Some(encoder) = self.encoder.take() {
            self.queue.submit(Some(encoder.finish()));
        }
        frame.present();
        Ok(())
    }
}
