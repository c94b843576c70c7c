//! TrueType font handle and ARGB text rasterization for par-vfont.
//!
//! This crate provides:
//! - `VFont`, an owning handle over one rasterizer instance and one loaded
//!   font face, with a runtime-adjustable pixel size
//! - Single-line UTF-8 text rendering into a caller-owned ARGB buffer
//! - A bounds-checked `PixelBuffer` view over that buffer
//! - A `GlyphRasterizer` boundary with a swash-backed implementation
//!
//! # Architecture
//!
//! Outline decoding, hinting and scan conversion belong to the rasterizer.
//! The handle only decodes UTF-8, walks a pen along the baseline using each
//! glyph's advance, and alpha-blends the returned coverage masks onto the
//! buffer. Glyphs that cannot be produced are skipped without advancing the
//! pen.

pub mod blend;
pub mod error;
pub mod font_handle;
pub mod pixel_buffer;
pub mod rasterizer;
pub mod utf8;

// Re-export main types for convenience
pub use error::RenderError;
pub use font_handle::discovery::{FontSource, find_system_font};
pub use font_handle::{TextExtent, VFont};
pub use par_vfont_config::RasterSettings;
pub use pixel_buffer::PixelBuffer;
pub use rasterizer::swash_backend::{SwashFace, SwashRasterizer};
pub use rasterizer::{GlyphBitmap, GlyphRasterizer, PixelMode};
