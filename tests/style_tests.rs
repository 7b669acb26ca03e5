// Host-side tests for canvas presentation helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use style::*;

#[test]
fn fill_style_is_white_with_flake_opacity() {
    assert_eq!(flake_fill_style(0.5), "rgba(255, 255, 255, 0.5)");
    assert_eq!(flake_fill_style(1.0), "rgba(255, 255, 255, 1)");
}

#[test]
fn fill_style_clamps_opacity() {
    assert_eq!(flake_fill_style(1.7), "rgba(255, 255, 255, 1)");
    assert_eq!(flake_fill_style(-0.2), "rgba(255, 255, 255, 0)");
}

#[test]
fn overlay_canvas_never_blocks_input() {
    let lookup = |key: &str| {
        CANVAS_STYLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    };
    assert_eq!(lookup("pointer-events"), Some("none"));
    assert_eq!(lookup("position"), Some("fixed"));
    assert_eq!(lookup("width"), Some("100%"));
    assert_eq!(lookup("height"), Some("100%"));
}

#[test]
fn event_names_are_distinct() {
    assert_ne!(CHANGE_EVENT, CONTROL_CHANGE_EVENT);
    assert_eq!(percent_label(42), "42%");
}
