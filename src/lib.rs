#![cfg(target_arch = "wasm32")]
use instant::Instant;
use neon_core::{FrameScheduler, SceneConfig, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod backdrop;
mod constants;
mod dom;
mod effects;
mod events;
mod frame;
mod render;

use constants::{seed_from_unit, CANVAS_SELECTOR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neon-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let seed = seed_from_unit(js_sys::Math::random());
    let config = SceneConfig {
        seed,
        ..SceneConfig::default()
    };
    let (width, height, dpr) = dom::window_metrics(&window);
    let scheduler = Rc::new(RefCell::new(FrameScheduler::new(
        &config,
        Viewport::new(width, height, dpr),
    )?));
    let viewport = scheduler.borrow().store.viewport;
    dom::sync_canvas_backing_size(&canvas, viewport.drawing_buffer_size());

    // Audio: buffers stream in; until then cues are silent
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let sounds = audio::SoundBank::new(audio_ctx)?;
    sounds.load_all();

    effects::wire_all(&document, &sounds);

    let backdrop =
        match backdrop::BackdropLayer::create(&document, (viewport.width, viewport.height), seed.rotate_left(17)) {
            Ok(b) => Some(Rc::new(RefCell::new(b))),
            Err(e) => {
                log::warn!("backdrop disabled: {:?}", e);
                None
            }
        };

    let started = Instant::now();
    events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        scheduler: scheduler.clone(),
        sounds: sounds.clone(),
        backdrop: backdrop.clone(),
        started,
    });

    // Initialize WebGPU; without it the page keeps its DOM effects
    let gpu = frame::init_gpu(&canvas, seed.rotate_left(29)).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scheduler,
        gpu,
        canvas,
        backdrop,
        started,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
