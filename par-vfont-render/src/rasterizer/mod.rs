//! Boundary to the font rasterization library.
//!
//! A `GlyphRasterizer` value is one rasterizer instance. It opens faces,
//! configures their pixel size and turns code points into coverage masks.
//! Each `VFont` owns its own instance, so separate handles share no mutable
//! state and can be used from separate threads.

pub mod swash_backend;

use std::path::Path;

use crate::error::RenderError;

/// Layout of a glyph coverage mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// One bit per pixel, most significant bit first.
    Mono,
    /// One byte of coverage (0-255) per pixel.
    Gray,
}

/// A rendered glyph, borrowed from the rasterizer until its next call.
#[derive(Debug, Clone, Copy)]
pub struct GlyphBitmap<'a> {
    /// Mask width in pixels.
    pub width: usize,
    /// Mask height in pixels.
    pub rows: usize,
    /// Bytes between the starts of consecutive rows.
    pub pitch: usize,
    pub mode: PixelMode,
    /// Horizontal offset from the pen position to the mask's left edge.
    pub left: i32,
    /// Distance from the baseline up to the mask's top edge.
    pub top: i32,
    /// Horizontal advance in 26.6 fixed point.
    pub advance_x: i32,
    pub buffer: &'a [u8],
}

impl GlyphBitmap<'_> {
    /// Advance rounded down to whole pixels.
    pub fn advance_pixels(&self) -> i32 {
        self.advance_x >> 6
    }
}

/// The font rasterization library behind a `VFont`.
pub trait GlyphRasterizer {
    /// A loaded font face. Dropped before the rasterizer that opened it.
    type Face;

    /// Load face `face_index` (0 for the first face of a collection).
    fn open_face(&mut self, path: &Path, face_index: u32) -> Result<Self::Face, RenderError>;

    /// Make the face map Unicode code points to glyphs.
    fn select_unicode_charmap(&mut self, face: &mut Self::Face) -> Result<(), RenderError>;

    /// Configure the face's pixel size; width is derived from it.
    fn set_pixel_size(&mut self, face: &mut Self::Face, size: u32) -> Result<(), RenderError>;

    /// Load and rasterize one code point.
    ///
    /// Missing glyphs are errors; the caller skips them.
    fn render_glyph<'a>(
        &'a mut self,
        face: &'a mut Self::Face,
        codepoint: u32,
    ) -> Result<GlyphBitmap<'a>, RenderError>;

    /// Advance of one code point in 26.6 fixed point.
    fn advance(&mut self, face: &mut Self::Face, codepoint: u32) -> Result<i32, RenderError> {
        self.render_glyph(face, codepoint).map(|glyph| glyph.advance_x)
    }
}
