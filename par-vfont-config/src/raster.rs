//! Glyph rasterization settings shared between config and the render crate.

use serde::{Deserialize, Serialize};

/// Controls how the rasterizer turns outlines into coverage masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSettings {
    /// Apply hinting to outlines before scan conversion.
    #[serde(default = "crate::defaults::hinting")]
    pub hinting: bool,

    /// Produce 8-bit anti-aliased coverage. When disabled, coverage is
    /// thresholded into a 1-bit mono mask.
    #[serde(default = "crate::defaults::antialias")]
    pub antialias: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            hinting: crate::defaults::hinting(),
            antialias: crate::defaults::antialias(),
        }
    }
}
