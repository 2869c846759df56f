use crate::backdrop::BackdropLayer;
use crate::dom;
use crate::render;
use instant::Instant;
use neon_core::FrameScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scheduler: Rc<RefCell<FrameScheduler>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub backdrop: Option<Rc<RefCell<BackdropLayer>>>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed();

        if let Some(b) = &self.backdrop {
            b.borrow_mut().frame();
        }

        let Ok(mut sched) = self.scheduler.try_borrow_mut() else {
            return;
        };
        dom::sync_canvas_backing_size(&self.canvas, sched.store.viewport.drawing_buffer_size());
        match &mut self.gpu {
            Some(gpu) => {
                let report = sched.tick(elapsed, gpu);
                if !report.presented {
                    log::debug!("[frame] tick {} not presented", sched.ticks());
                }
            }
            // keep animating so state stays consistent if the GPU comes back
            None => {
                sched.advance(elapsed);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    glitch_seed: u64,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, glitch_seed).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
