//! Linear post-processing chain: Base → Bloom → Glitch.
//!
//! The chain only decides *which* passes run and in what order. Drawing is
//! delegated to a [`PassExecutor`], which the web frontend implements on top
//! of wgpu and tests implement with a recorder.

use crate::animators::FrameTime;
use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::scene::SceneStore;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Base,
    Bloom,
    Glitch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pass {
    pub kind: PassKind,
    pub enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("render surface unavailable: {0}")]
    Surface(String),
    #[error("{pass:?} pass failed: {reason}")]
    Failed { pass: PassKind, reason: String },
}

/// Everything a pass may read while it runs.
pub struct PassContext<'a> {
    pub store: &'a SceneStore,
    pub time: FrameTime,
    pub size: (u32, u32),
    pub bloom: &'a BloomParams,
}

pub trait PassExecutor {
    /// Recreate size-dependent buffers. Called only when the size changed.
    fn resize(&mut self, width: u32, height: u32);
    fn execute(&mut self, pass: PassKind, ctx: &PassContext<'_>) -> Result<(), PassError>;
    /// Show whatever the last successful pass produced.
    fn present(&mut self) -> Result<(), PassError>;
}

/// What happened during one `render` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub executed: SmallVec<[PassKind; 3]>,
    pub failed: SmallVec<[PassKind; 3]>,
    pub presented: bool,
}

pub struct RenderPipeline {
    passes: SmallVec<[Pass; 3]>,
    bloom: BloomParams,
    size: (u32, u32),
    /// Size last handed to the executor; `None` until the first render.
    executor_size: Option<(u32, u32)>,
}

impl RenderPipeline {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            passes: smallvec![
                Pass {
                    kind: PassKind::Base,
                    enabled: true,
                },
                Pass {
                    kind: PassKind::Bloom,
                    enabled: true,
                },
                Pass {
                    kind: PassKind::Glitch,
                    enabled: false,
                },
            ],
            bloom: BloomParams::default(),
            size: (width.max(1), height.max(1)),
            executor_size: None,
        }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn bloom(&self) -> &BloomParams {
        &self.bloom
    }

    /// Logical buffer size in CSS pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
    }

    pub fn is_enabled(&self, kind: PassKind) -> bool {
        self.passes
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| p.enabled)
            .unwrap_or(false)
    }

    pub fn glitch_enabled(&self) -> bool {
        self.is_enabled(PassKind::Glitch)
    }

    pub fn set_glitch_enabled(&mut self, enabled: bool) {
        if let Some(p) = self.passes.iter_mut().find(|p| p.kind == PassKind::Glitch) {
            p.enabled = enabled;
        }
    }

    /// Run every enabled pass in order, then present.
    ///
    /// `physical_size` is the drawing-buffer size the executor should use;
    /// it is forwarded to [`PassExecutor::resize`] whenever it changes.
    pub fn render(
        &mut self,
        store: &SceneStore,
        time: FrameTime,
        physical_size: (u32, u32),
        executor: &mut impl PassExecutor,
    ) -> FrameReport {
        if self.executor_size != Some(physical_size) {
            executor.resize(physical_size.0, physical_size.1);
            self.executor_size = Some(physical_size);
        }
        let ctx = PassContext {
            store,
            time,
            size: physical_size,
            bloom: &self.bloom,
        };
        let mut report = FrameReport::default();
        for pass in self.passes.iter().filter(|p| p.enabled) {
            match executor.execute(pass.kind, &ctx) {
                Ok(()) => report.executed.push(pass.kind),
                Err(e) => {
                    log::warn!("[pipeline] skipping {:?}: {}", pass.kind, e);
                    report.failed.push(pass.kind);
                }
            }
        }
        match executor.present() {
            Ok(()) => report.presented = true,
            Err(e) => log::warn!("[pipeline] present failed: {}", e),
        }
        report
    }
}
