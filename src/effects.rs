use crate::audio::SoundBank;
use crate::constants::*;
use crate::dom;
use neon_core::loading::{LoadingBar, LOADING_HIDE_DELAY, LOADING_INTERVAL};
use neon_core::parallax::{card_tilt, rest_transform, tilt_transform};
use neon_core::{AudioSink, SoundCue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire every page-level effect that lives outside the WebGPU canvas.
pub fn wire_all(document: &web::Document, sounds: &SoundBank) {
    wire_card_tilt(document);
    wire_interaction_sounds(document, sounds);
    wire_ambient_start(document, sounds);
    set_glitch_text(document);
    wire_smooth_scroll(document, sounds);
    start_loading_bar(document);
}

fn wire_card_tilt(document: &web::Document) {
    let doc = document.clone();
    dom::listen(document.as_ref(), "mousemove", move |ev: web::MouseEvent| {
        let (px, py) = (ev.client_x() as f32, ev.client_y() as f32);
        for card in dom::query_all(&doc, HOVER_CARD_SELECTOR) {
            let r = card.get_bounding_client_rect();
            let tilt = card_tilt(
                (r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32),
                px,
                py,
            );
            dom::set_style(&card, "transform", &tilt_transform(tilt));
        }
    });

    let doc = document.clone();
    dom::listen(document.as_ref(), "mouseleave", move |_: web::Event| {
        let rest = rest_transform();
        for card in dom::query_all(&doc, HOVER_CARD_SELECTOR) {
            dom::set_style(&card, "transform", &rest);
        }
    });
}

fn wire_interaction_sounds(document: &web::Document, sounds: &SoundBank) {
    for el in dom::query_all(document, INTERACTIVE_SELECTOR) {
        let hover = sounds.clone();
        dom::listen(el.as_ref(), "mouseenter", move |_: web::Event| {
            hover.play(SoundCue::Hover)
        });
        let click = sounds.clone();
        dom::listen(el.as_ref(), "click", move |_: web::Event| {
            click.play(SoundCue::Click)
        });
    }
}

/// The ambient loop starts with the first click anywhere, once.
fn wire_ambient_start(document: &web::Document, sounds: &SoundBank) {
    let sounds = sounds.clone();
    dom::listen(document.as_ref(), "click", move |_: web::Event| {
        sounds.play_once(SoundCue::Ambient)
    });
}

fn set_glitch_text(document: &web::Document) {
    for el in dom::query_all(document, GLITCH_TEXT_SELECTOR) {
        let text = el.text_content().unwrap_or_default();
        let _ = el.set_attribute("data-text", &text);
    }
}

fn wire_smooth_scroll(document: &web::Document, sounds: &SoundBank) {
    for anchor in dom::query_all(document, HASH_LINK_SELECTOR) {
        let doc = document.clone();
        let sounds = sounds.clone();
        let link = anchor.clone();
        dom::listen(anchor.as_ref(), "click", move |ev: web::Event| {
            ev.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            // a bare "#" is not a valid selector
            let target = doc.query_selector(&href).ok().flatten();
            if let Some(target) = target {
                sounds.play(SoundCue::Click);
                let opts = web::ScrollIntoViewOptions::new();
                opts.set_behavior(web::ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        });
    }
}

fn start_loading_bar(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(el) = dom::query_all(document, LOADING_BAR_SELECTOR).into_iter().next() else {
        log::debug!("[loading] no {} on the page", LOADING_BAR_SELECTOR);
        return;
    };
    let bar = Rc::new(RefCell::new(LoadingBar::default()));
    dom::set_style(&el, "transform", &bar.borrow().transform());

    let interval_id = Rc::new(Cell::new(None::<i32>));
    let interval_for_tick = interval_id.clone();
    let tick = Closure::wrap(Box::new(move || {
        let became_full = bar.borrow_mut().step();
        dom::set_style(&el, "transform", &bar.borrow().transform());
        if !became_full {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        if let Some(id) = interval_for_tick.take() {
            w.clear_interval_with_handle(id);
        }
        let el = el.clone();
        let bar = bar.clone();
        let hide = Closure::once_into_js(move || {
            bar.borrow_mut().hide();
            dom::set_style(&el, "opacity", "0");
            dom::set_style(&el, "display", "none");
        });
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.unchecked_ref(),
            LOADING_HIDE_DELAY.as_millis() as i32,
        );
    }) as Box<dyn FnMut()>);
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        LOADING_INTERVAL.as_millis() as i32,
    ) {
        Ok(id) => interval_id.set(Some(id)),
        Err(e) => log::warn!("[loading] setInterval failed: {:?}", e),
    }
    tick.forget();
}
