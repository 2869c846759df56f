use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Every element matching `selector`, skipping non-element nodes.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Window size in CSS pixels and the raw device pixel ratio.
pub fn window_metrics(window: &web::Window) -> (u32, u32, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (
        width.max(1.0) as u32,
        height.max(1.0) as u32,
        window.device_pixel_ratio(),
    )
}

/// Match the canvas backing store to the drawing-buffer size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: (u32, u32)) {
    if canvas.width() != size.0 {
        canvas.set_width(size.0.max(1));
    }
    if canvas.height() != size.1 {
        canvas.set_height(size.1.max(1));
    }
}
