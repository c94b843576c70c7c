//! The font handle: one rasterizer instance, one face, one current size.
//!
//! A `VFont` is either fully constructed or never returned. Resources
//! acquired during construction are released on every failure path, and
//! on drop the face is released before the rasterizer that opened it.
//!
//! A handle is not meant for concurrent use; the rasterizer keeps the
//! current size and the last rendered glyph as mutable state. Give each
//! thread its own handle.

pub mod discovery;

use std::path::Path;

use par_vfont_config::RasterSettings;

use crate::blend::composite_glyph;
use crate::error::RenderError;
use crate::pixel_buffer::PixelBuffer;
use crate::rasterizer::GlyphRasterizer;
use crate::rasterizer::swash_backend::SwashRasterizer;
use crate::utf8::code_points;

/// Horizontal extent of a measured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    /// Sum of whole-pixel advances; the pen ends at `x + width`.
    pub width: i64,
    /// Number of code points that contributed an advance.
    pub glyphs: usize,
}

/// A loaded font face with a runtime-adjustable pixel size.
pub struct VFont<R: GlyphRasterizer = SwashRasterizer> {
    // Fields drop in declaration order: face first, then its rasterizer.
    face: R::Face,
    rasterizer: R,
    current_size: u32,
}

impl VFont<SwashRasterizer> {
    /// Load the first face of the font at `path` at `size` pixels.
    pub fn open(path: impl AsRef<Path>, size: u32) -> Result<Self, RenderError> {
        Self::open_face(path, 0, size)
    }

    /// Load face `face_index` of a font collection.
    pub fn open_face(
        path: impl AsRef<Path>,
        face_index: u32,
        size: u32,
    ) -> Result<Self, RenderError> {
        Self::open_with_settings(path, face_index, size, RasterSettings::default())
    }

    /// Load a face with explicit hinting / anti-aliasing settings.
    pub fn open_with_settings(
        path: impl AsRef<Path>,
        face_index: u32,
        size: u32,
        settings: RasterSettings,
    ) -> Result<Self, RenderError> {
        Self::open_with(
            || SwashRasterizer::with_settings(settings),
            path.as_ref(),
            face_index,
            size,
        )
    }
}

impl<R: GlyphRasterizer> VFont<R> {
    /// Create a handle over a fresh rasterizer built by `new_rasterizer`.
    ///
    /// Arguments are validated before the rasterizer is created. If the
    /// face fails to load, the rasterizer is dropped before returning.
    pub fn open_with<F>(
        new_rasterizer: F,
        path: &Path,
        face_index: u32,
        size: u32,
    ) -> Result<Self, RenderError>
    where
        F: FnOnce() -> Result<R, RenderError>,
    {
        if path.as_os_str().is_empty() {
            return Err(RenderError::EmptyPath);
        }
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }

        let mut rasterizer = new_rasterizer()?;

        let mut face = rasterizer.open_face(path, face_index).map_err(|e| {
            log::warn!("Failed to load font {:?} (face {}): {}", path, face_index, e);
            e
        })?;

        if let Err(e) = rasterizer.select_unicode_charmap(&mut face) {
            log::warn!("No Unicode charmap selected for {:?}: {}", path, e);
        }

        rasterizer.set_pixel_size(&mut face, size)?;

        log::debug!(
            "Opened font {:?} (face {}) at {}px",
            path,
            face_index,
            size
        );

        Ok(Self {
            face,
            rasterizer,
            current_size: size,
        })
    }

    /// The pixel size the rasterizer is currently configured for.
    pub fn current_size(&self) -> u32 {
        self.current_size
    }

    /// Change the pixel size.
    ///
    /// Requesting the current size succeeds without touching the rasterizer.
    /// On failure the handle keeps its previous size.
    pub fn set_size(&mut self, size: u32) -> Result<(), RenderError> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        if size == self.current_size {
            return Ok(());
        }

        self.rasterizer.set_pixel_size(&mut self.face, size)?;
        log::debug!("Font size changed {} -> {}", self.current_size, size);
        self.current_size = size;
        Ok(())
    }

    /// Apply a per-call size override (`None` or `Some(0)` keeps the current size).
    fn apply_size_override(&mut self, size: Option<u32>) {
        let Some(size) = size.filter(|&s| s > 0) else {
            return;
        };
        if let Err(e) = self.set_size(size) {
            log::warn!(
                "Size override {} rejected, keeping {}px: {}",
                size,
                self.current_size,
                e
            );
        }
    }

    /// Render one line of UTF-8 text with its baseline at `y`.
    ///
    /// The pen starts at `x` and advances by each glyph's whole-pixel
    /// advance. Malformed UTF-8 and code points the face cannot render are
    /// skipped; skipped glyphs do not advance the pen. The alpha channel of
    /// `color` is ignored and every written pixel comes out opaque.
    ///
    /// A `size` other than `None`/`Some(0)` changes the handle's size exactly
    /// as `set_size` would, and the change persists after the call.
    pub fn render_text(
        &mut self,
        text: impl AsRef<[u8]>,
        buffer: &mut PixelBuffer<'_>,
        x: i32,
        y: i32,
        color: u32,
        size: Option<u32>,
    ) {
        let text = text.as_ref();
        if text.is_empty() || buffer.is_empty() {
            return;
        }

        self.apply_size_override(size);

        let mut pen_x = x as i64;
        let pen_y = y as i64;

        for codepoint in code_points(text) {
            let glyph = match self.rasterizer.render_glyph(&mut self.face, codepoint) {
                Ok(glyph) => glyph,
                Err(e) => {
                    log::trace!("Skipping U+{:04X}: {}", codepoint, e);
                    continue;
                }
            };

            let origin_x = pen_x + glyph.left as i64;
            let origin_y = pen_y - glyph.top as i64;
            composite_glyph(buffer, &glyph, origin_x, origin_y, color);

            pen_x += glyph.advance_pixels() as i64;
        }
    }

    /// Measure how far `render_text` would move the pen for `text`.
    ///
    /// Uses the same decoding and skip rules as rendering; a size override
    /// is applied and persisted the same way.
    pub fn measure_text(&mut self, text: impl AsRef<[u8]>, size: Option<u32>) -> TextExtent {
        let text = text.as_ref();
        if text.is_empty() {
            return TextExtent::default();
        }

        self.apply_size_override(size);

        let mut extent = TextExtent::default();
        for codepoint in code_points(text) {
            match self.rasterizer.advance(&mut self.face, codepoint) {
                Ok(advance) => {
                    extent.width += (advance >> 6) as i64;
                    extent.glyphs += 1;
                }
                Err(e) => log::trace!("Not measuring U+{:04X}: {}", codepoint, e),
            }
        }
        extent
    }
}

impl<R: GlyphRasterizer> Drop for VFont<R> {
    fn drop(&mut self) {
        log::debug!("Releasing font handle ({}px)", self.current_size);
    }
}
