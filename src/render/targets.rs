use super::helpers;
use crate::constants::bloom_size;
use wgpu;

pub(crate) const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Which offscreen buffer currently holds the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Hdr,
    BloomA,
    BloomB,
    PostA,
    PostB,
}

impl Target {
    /// Post output to write next when reading from `self`.
    pub(crate) fn next_post(self) -> Target {
        match self {
            Target::PostA => Target::PostB,
            _ => Target::PostA,
        }
    }
}

/// Offscreen color targets for the pass chain.
///
/// - `hdr` holds the lit scene in Rgba16Float.
/// - `bloom_*` are half-res buffers for bright-pass and blur.
/// - `post_*` ping-pong between composite and glitch; the last written one
///   is copied to the swapchain on present.
pub(crate) struct RenderTargets {
    _textures: [wgpu::Texture; 5],
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) post_a_view: wgpu::TextureView,
    pub(crate) post_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (bw, bh) = bloom_size(width, height);
        let make = |label: &str, w: u32, h: u32| {
            helpers::create_color_texture(device, label, w, h, OFFSCREEN_FORMAT, usage)
        };
        let (hdr, hdr_view) = make("hdr_tex", width, height);
        let (bloom_a, bloom_a_view) = make("bloom_a", bw, bh);
        let (bloom_b, bloom_b_view) = make("bloom_b", bw, bh);
        let (post_a, post_a_view) = make("post_a", width, height);
        let (post_b, post_b_view) = make("post_b", width, height);
        Self {
            _textures: [hdr, bloom_a, bloom_b, post_a, post_b],
            hdr_view,
            bloom_a_view,
            bloom_b_view,
            post_a_view,
            post_b_view,
        }
    }

    pub(crate) fn view(&self, target: Target) -> &wgpu::TextureView {
        match target {
            Target::Hdr => &self.hdr_view,
            Target::BloomA => &self.bloom_a_view,
            Target::BloomB => &self.bloom_b_view,
            Target::PostA => &self.post_a_view,
            Target::PostB => &self.post_b_view,
        }
    }
}
