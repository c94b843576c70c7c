//! Typed error types for par-vfont-render.
//!
//! Construction and reconfiguration failures are reported through
//! `RenderError`. Per-glyph failures use the same type internally but are
//! never surfaced from `VFont::render_text`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    // -----------------------------------------------------------------------
    // Handle construction
    // -----------------------------------------------------------------------
    /// No font path was given.
    #[error("Font path is empty")]
    EmptyPath,

    /// The rasterizer instance could not be created.
    ///
    /// `SwashRasterizer` construction cannot fail; this is returned by
    /// `GlyphRasterizer` backends whose library initialisation can.
    #[error("Rasterizer initialisation failed: {0}")]
    RasterizerInit(String),

    /// The font file could not be read from disk.
    #[error("Font file read failed for '{}': {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font data could not be parsed, or the face index does not exist.
    #[error("Invalid font data in '{}' (face index {face_index})", path.display())]
    InvalidFont { path: PathBuf, face_index: u32 },

    /// The face has no Unicode character map.
    #[error("Font face has no Unicode character map")]
    NoUnicodeCharmap,

    // -----------------------------------------------------------------------
    // Sizing
    // -----------------------------------------------------------------------
    /// Pixel sizes must be positive.
    #[error("Invalid pixel size: {0}")]
    InvalidSize(u32),

    /// The rasterizer rejected the pixel size.
    #[error("Pixel size {size} is out of range (max {max})")]
    SizeOutOfRange { size: u32, max: u32 },

    // -----------------------------------------------------------------------
    // Glyphs
    // -----------------------------------------------------------------------
    /// The face has no glyph for this code point.
    #[error("No glyph for U+{0:04X}")]
    GlyphNotFound(u32),

    /// The glyph exists but could not be rasterized.
    #[error("Glyph rasterization failed for U+{0:04X}")]
    GlyphRender(u32),

    // -----------------------------------------------------------------------
    // Pixel buffer
    // -----------------------------------------------------------------------
    /// Row stride is smaller than the row width.
    #[error("Invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },

    /// The pixel slice is too short for the declared dimensions.
    #[error("Pixel buffer too small: expected {expected} pixels, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}
