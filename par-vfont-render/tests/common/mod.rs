//! Scripted rasterizer used by the integration tests.
//!
//! Every instance reports creation, teardown, face teardown and size
//! configuration into a shared `FakeLog`, so tests can check resource
//! handling without a real font.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use par_vfont_render::{GlyphBitmap, GlyphRasterizer, PixelMode, RenderError};

#[derive(Debug, Default)]
pub struct FakeLog {
    pub rasterizers_created: usize,
    pub rasterizers_dropped: usize,
    pub faces_opened: usize,
    pub faces_dropped: usize,
    pub size_calls: Vec<u32>,
    pub events: Vec<&'static str>,
}

pub type SharedLog = Arc<Mutex<FakeLog>>;

pub fn new_log() -> SharedLog {
    Arc::new(Mutex::new(FakeLog::default()))
}

#[derive(Debug, Clone)]
pub struct FakeGlyph {
    pub width: usize,
    pub rows: usize,
    pub pitch: usize,
    pub mode: PixelMode,
    pub left: i32,
    pub top: i32,
    pub advance_px: i32,
    pub buffer: Vec<u8>,
}

impl FakeGlyph {
    /// A fully covered gray rectangle sitting on the baseline.
    pub fn solid(width: usize, rows: usize, advance_px: i32) -> Self {
        Self::gray(width, rows, vec![255; width * rows], advance_px)
    }

    pub fn gray(width: usize, rows: usize, buffer: Vec<u8>, advance_px: i32) -> Self {
        Self {
            width,
            rows,
            pitch: width,
            mode: PixelMode::Gray,
            left: 0,
            top: rows as i32,
            advance_px,
            buffer,
        }
    }

    /// A mono glyph one row high; each byte covers eight pixels.
    pub fn mono_row(width: usize, bits: Vec<u8>, advance_px: i32) -> Self {
        Self {
            width,
            rows: 1,
            pitch: bits.len(),
            mode: PixelMode::Mono,
            left: 0,
            top: 1,
            advance_px,
            buffer: bits,
        }
    }

    pub fn with_bearing(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }
}

pub struct FakeFace {
    log: SharedLog,
    pub size: u32,
}

impl Drop for FakeFace {
    fn drop(&mut self) {
        let mut log = self.log.lock();
        log.faces_dropped += 1;
        log.events.push("face");
    }
}

pub struct FakeRasterizer {
    log: SharedLog,
    glyphs: HashMap<u32, FakeGlyph>,
    fail_open: bool,
    max_size: u32,
}

impl FakeRasterizer {
    pub fn new(log: &SharedLog) -> Self {
        log.lock().rasterizers_created += 1;
        Self {
            log: Arc::clone(log),
            glyphs: HashMap::new(),
            fail_open: false,
            max_size: u32::MAX,
        }
    }

    pub fn with_glyph(mut self, ch: char, glyph: FakeGlyph) -> Self {
        self.glyphs.insert(ch as u32, glyph);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Drop for FakeRasterizer {
    fn drop(&mut self) {
        let mut log = self.log.lock();
        log.rasterizers_dropped += 1;
        log.events.push("rasterizer");
    }
}

impl GlyphRasterizer for FakeRasterizer {
    type Face = FakeFace;

    fn open_face(&mut self, path: &Path, face_index: u32) -> Result<FakeFace, RenderError> {
        if self.fail_open {
            return Err(RenderError::InvalidFont {
                path: path.to_path_buf(),
                face_index,
            });
        }
        self.log.lock().faces_opened += 1;
        Ok(FakeFace {
            log: Arc::clone(&self.log),
            size: 0,
        })
    }

    fn select_unicode_charmap(&mut self, _face: &mut FakeFace) -> Result<(), RenderError> {
        Ok(())
    }

    fn set_pixel_size(&mut self, face: &mut FakeFace, size: u32) -> Result<(), RenderError> {
        self.log.lock().size_calls.push(size);
        if size > self.max_size {
            return Err(RenderError::SizeOutOfRange {
                size,
                max: self.max_size,
            });
        }
        face.size = size;
        Ok(())
    }

    fn render_glyph<'a>(
        &'a mut self,
        _face: &'a mut FakeFace,
        codepoint: u32,
    ) -> Result<GlyphBitmap<'a>, RenderError> {
        let glyph = self
            .glyphs
            .get(&codepoint)
            .ok_or(RenderError::GlyphNotFound(codepoint))?;
        Ok(GlyphBitmap {
            width: glyph.width,
            rows: glyph.rows,
            pitch: glyph.pitch,
            mode: glyph.mode,
            left: glyph.left,
            top: glyph.top,
            advance_x: glyph.advance_px << 6,
            buffer: &glyph.buffer,
        })
    }
}
