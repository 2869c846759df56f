use crate::audio::SoundBank;
use crate::backdrop::BackdropLayer;
use crate::dom;
use instant::Instant;
use neon_core::{FrameScheduler, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct InputWiring {
    pub window: web::Window,
    pub scheduler: Rc<RefCell<FrameScheduler>>,
    pub sounds: SoundBank,
    pub backdrop: Option<Rc<RefCell<BackdropLayer>>>,
    pub started: Instant,
}

/// Forward window resize, pointer moves and clicks to the scheduler. The
/// handlers run between animation frames, so the scheduler borrow never
/// overlaps a tick.
pub fn wire_input_handlers(w: InputWiring) {
    let InputWiring {
        window,
        scheduler,
        sounds,
        backdrop,
        started,
    } = w;
    let target: &web::EventTarget = window.as_ref();

    {
        let scheduler = scheduler.clone();
        let sounds = sounds.clone();
        let win = window.clone();
        dom::listen(target, "resize", move |_: web::Event| {
            let (width, height, device_pixel_ratio) = dom::window_metrics(&win);
            let event = InputEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            };
            if let Ok(mut s) = scheduler.try_borrow_mut() {
                s.dispatch(event, &sounds, started.elapsed());
            }
            if let Some(b) = &backdrop {
                b.borrow_mut().resize(width, height);
            }
        });
    }

    {
        let scheduler = scheduler.clone();
        let sounds = sounds.clone();
        dom::listen(target, "pointermove", move |ev: web::MouseEvent| {
            let event = InputEvent::PointerMove {
                x: ev.client_x() as f32,
                y: ev.client_y() as f32,
            };
            if let Ok(mut s) = scheduler.try_borrow_mut() {
                s.dispatch(event, &sounds, started.elapsed());
            }
        });
    }

    dom::listen(target, "click", move |_: web::MouseEvent| {
        if let Ok(mut s) = scheduler.try_borrow_mut() {
            s.dispatch(InputEvent::Click, &sounds, started.elapsed());
        }
    });
}
