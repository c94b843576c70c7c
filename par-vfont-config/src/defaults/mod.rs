//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a config field, and by the matching `Default` impl.

use crate::color::Color;

// ── Font ───────────────────────────────────────────────────────────────────

pub fn face_index() -> u32 {
    0
}

pub fn font_size() -> u32 {
    16
}

// ── Colors ─────────────────────────────────────────────────────────────────

pub fn text_color() -> Color {
    Color::from_argb(0xFFFF_FFFF)
}

pub fn background_color() -> Color {
    Color::from_argb(0xFF00_0000)
}

// ── Canvas ─────────────────────────────────────────────────────────────────

pub fn canvas_width() -> u32 {
    640
}

pub fn canvas_height() -> u32 {
    120
}

// ── Rasterization ──────────────────────────────────────────────────────────

pub fn hinting() -> bool {
    true
}

pub fn antialias() -> bool {
    true
}
