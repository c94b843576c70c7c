//! Glyph rasterization backed by swash.

use std::fmt;
use std::path::Path;

use par_vfont_config::RasterSettings;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef, GlyphId};

use super::{GlyphBitmap, GlyphRasterizer, PixelMode};
use crate::error::RenderError;

/// Largest pixels-per-em value accepted by `set_pixel_size`.
pub const MAX_PIXEL_SIZE: u32 = u16::MAX as u32;

/// Embedded bitmap strikes first, then scalable outlines. Color sources are
/// not requested: the output is always a coverage mask.
const SOURCES: &[Source] = &[Source::Bitmap(StrikeWith::ExactSize), Source::Outline];

/// A font face loaded from disk.
///
/// Owns the file bytes and the location of the selected face inside them,
/// so a `FontRef` can be rebuilt on demand without self-borrowing.
pub struct SwashFace {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    face_index: u32,
    pixel_size: u32,
}

impl fmt::Debug for SwashFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashFace")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .field("pixel_size", &self.pixel_size)
            .finish()
    }
}

impl SwashFace {
    /// Parse face `face_index` out of `data` (TTF/OTF/TTC).
    ///
    /// Returns `None` if the data is not a font or the index does not exist.
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Option<Self> {
        let font = FontRef::from_index(&data, face_index as usize)?;
        let (offset, key) = (font.offset, font.key);
        Some(Self {
            data,
            offset,
            key,
            face_index,
            pixel_size: 0,
        })
    }

    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Index of this face within its collection file (0 for single-face files).
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Currently configured pixels per em (0 until first configured).
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Horizontal advance of `glyph_id` at the current size, in 26.6.
    ///
    /// Hinted advances snap to the nearest whole pixel so the `>> 6` pen
    /// step rounds instead of truncating.
    fn advance_26_6(&self, glyph_id: GlyphId, hinting: bool) -> i32 {
        let font = self.font_ref();
        let units_per_em = font.metrics(&[]).units_per_em.max(1) as f32;
        let scale = self.pixel_size as f32 / units_per_em;
        let advance = font.glyph_metrics(&[]).advance_width(glyph_id) * scale;
        if hinting {
            (advance.round() as i32) << 6
        } else {
            (advance * 64.0).round() as i32
        }
    }
}

/// One swash scaling context plus the scratch storage for the glyph most
/// recently rendered through it.
pub struct SwashRasterizer {
    context: ScaleContext,
    settings: RasterSettings,
    scratch: Image,
    mono: Vec<u8>,
}

impl fmt::Debug for SwashRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SwashRasterizer {
    /// Create a rasterizer with default settings (hinting, anti-aliasing).
    pub fn new() -> Result<Self, RenderError> {
        Self::with_settings(RasterSettings::default())
    }

    pub fn with_settings(settings: RasterSettings) -> Result<Self, RenderError> {
        log::debug!(
            "Creating swash rasterizer (hinting={}, antialias={})",
            settings.hinting,
            settings.antialias
        );
        Ok(Self {
            context: ScaleContext::new(),
            settings,
            scratch: Image::new(),
            mono: Vec::new(),
        })
    }

    /// The hinting and anti-aliasing switches this rasterizer renders with.
    pub fn settings(&self) -> RasterSettings {
        self.settings
    }
}

/// Threshold an 8-bit mask into a 1-bit MSB-first mask, returning its pitch.
fn pack_mono(mask: &[u8], width: usize, rows: usize, out: &mut Vec<u8>) -> usize {
    let pitch = width.div_ceil(8);
    out.clear();
    out.resize(pitch * rows, 0);
    for row in 0..rows {
        for col in 0..width {
            if mask.get(row * width + col).copied().unwrap_or(0) > 127 {
                out[row * pitch + col / 8] |= 0x80 >> (col % 8);
            }
        }
    }
    pitch
}

impl GlyphRasterizer for SwashRasterizer {
    type Face = SwashFace;

    fn open_face(&mut self, path: &Path, face_index: u32) -> Result<SwashFace, RenderError> {
        let data = std::fs::read(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} bytes of font data from {:?}", data.len(), path);

        SwashFace::from_bytes(data, face_index).ok_or_else(|| RenderError::InvalidFont {
            path: path.to_path_buf(),
            face_index,
        })
    }

    fn select_unicode_charmap(&mut self, face: &mut SwashFace) -> Result<(), RenderError> {
        // swash picks the best Unicode subtable itself; all we can check is
        // that there is a character map at all.
        let font = face.font_ref();
        if font.table(swash::tag_from_bytes(b"cmap")).is_none() {
            return Err(RenderError::NoUnicodeCharmap);
        }
        Ok(())
    }

    fn set_pixel_size(&mut self, face: &mut SwashFace, size: u32) -> Result<(), RenderError> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        if size > MAX_PIXEL_SIZE {
            return Err(RenderError::SizeOutOfRange {
                size,
                max: MAX_PIXEL_SIZE,
            });
        }
        face.pixel_size = size;
        Ok(())
    }

    fn render_glyph<'a>(
        &'a mut self,
        face: &'a mut SwashFace,
        codepoint: u32,
    ) -> Result<GlyphBitmap<'a>, RenderError> {
        let font = face.font_ref();
        let glyph_id = font.charmap().map(codepoint);
        if glyph_id == 0 {
            return Err(RenderError::GlyphNotFound(codepoint));
        }

        let mut scaler = self
            .context
            .builder(font)
            .size(face.pixel_size as f32)
            .hint(self.settings.hinting)
            .build();

        let rendered = Render::new(SOURCES)
            .format(Format::Alpha)
            .render_into(&mut scaler, glyph_id, &mut self.scratch);

        let (width, rows) = if rendered {
            if !matches!(self.scratch.content, Content::Mask) {
                return Err(RenderError::GlyphRender(codepoint));
            }
            (
                self.scratch.placement.width as usize,
                self.scratch.placement.height as usize,
            )
        } else {
            // Blank glyphs (space and friends) have an outline with no
            // points; they still advance the pen.
            match scaler.scale_outline(glyph_id) {
                Some(outline) if outline.points().is_empty() => {
                    self.scratch.data.clear();
                    self.scratch.placement.left = 0;
                    self.scratch.placement.top = 0;
                    (0, 0)
                }
                _ => return Err(RenderError::GlyphRender(codepoint)),
            }
        };

        let advance_x = face.advance_26_6(glyph_id, self.settings.hinting);
        let left = self.scratch.placement.left;
        let top = self.scratch.placement.top;

        let (mode, pitch, buffer) = if self.settings.antialias {
            (PixelMode::Gray, width, self.scratch.data.as_slice())
        } else {
            let pitch = pack_mono(&self.scratch.data, width, rows, &mut self.mono);
            (PixelMode::Mono, pitch, self.mono.as_slice())
        };

        Ok(GlyphBitmap {
            width,
            rows,
            pitch,
            mode,
            left,
            top,
            advance_x,
            buffer,
        })
    }

    fn advance(&mut self, face: &mut SwashFace, codepoint: u32) -> Result<i32, RenderError> {
        let glyph_id = face.font_ref().charmap().map(codepoint);
        if glyph_id == 0 {
            return Err(RenderError::GlyphNotFound(codepoint));
        }
        Ok(face.advance_26_6(glyph_id, self.settings.hinting))
    }
}
