use crate::constants::BACKDROP_STYLES;
use crate::dom;
use neon_core::backdrop::{mote_fill, Backdrop, BACKDROP_PARTICLES};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Full-window 2D canvas of drifting motes behind the WebGPU canvas.
pub struct BackdropLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    motes: Backdrop,
}

impl BackdropLayer {
    pub fn create(document: &web::Document, size: (u32, u32), seed: u64) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let el: &web::HtmlElement = canvas.as_ref();
        for (property, value) in BACKDROP_STYLES {
            dom::set_style(el, property, value);
        }
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;
        body.append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        canvas.set_width(size.0);
        canvas.set_height(size.1);
        let motes = Backdrop::new(BACKDROP_PARTICLES, size.0 as f32, size.1 as f32, seed);
        Ok(Self { canvas, ctx, motes })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
        self.motes.resize(width as f32, height as f32);
    }

    #[allow(deprecated)]
    pub fn frame(&mut self) {
        self.motes.step();
        let (w, h) = self.motes.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        for m in self.motes.motes() {
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(m.x as f64, m.y as f64, m.size as f64, 0.0, TAU);
            self.ctx
                .set_fill_style(&JsValue::from_str(&mote_fill(m.opacity)));
            self.ctx.fill();
        }
    }
}
