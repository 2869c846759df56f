// Host-side tests for the browser constants.
// The main crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn bloom_buffers_are_half_resolution() {
    assert_eq!(bloom_size(1920, 1080), (960, 540));
    assert_eq!(bloom_size(801, 601), (400, 300));
}

#[test]
fn bloom_size_never_collapses_to_zero() {
    assert_eq!(bloom_size(0, 0), (1, 1));
    assert_eq!(bloom_size(1, 3), (1, 1));
    assert_eq!(bloom_size(4000, 0), (2000, 1));
}

#[test]
fn seeds_span_the_u32_range() {
    assert_eq!(seed_from_unit(0.0), 0);
    assert_eq!(seed_from_unit(1.0), u32::MAX as u64);
    assert!(seed_from_unit(0.5) > 0);
    // out of range samples are clamped rather than wrapping
    assert_eq!(seed_from_unit(-3.0), 0);
    assert_eq!(seed_from_unit(7.0), u32::MAX as u64);
}

#[test]
fn selectors_target_the_page_markup() {
    assert_eq!(CANVAS_SELECTOR, "canvas.webgl");
    assert!(HASH_LINK_SELECTOR.contains("href^=\"#\""));
    assert!(INTERACTIVE_SELECTOR.contains(HOVER_CARD_SELECTOR));
    assert!(INTERACTIVE_SELECTOR.split(", ").any(|s| s == "button"));
}

#[test]
fn billboard_is_two_triangles() {
    assert_eq!(BILLBOARD_VERTICES % 3, 0);
    assert_eq!(BILLBOARD_VERTICES / 3, 2);
}

#[test]
fn backdrop_canvas_covers_the_window_behind_the_scene() {
    let style = |name: &str| {
        BACKDROP_STYLES
            .iter()
            .find(|(p, _)| *p == name)
            .map(|(_, v)| *v)
    };
    assert_eq!(style("position"), Some("fixed"));
    assert_eq!(style("width"), Some("100%"));
    assert_eq!(style("height"), Some("100%"));
    assert_eq!(style("z-index"), Some(BACKDROP_Z_INDEX));
    assert_eq!(style("pointer-events"), Some("none"));
}
