//! Alpha blending of glyph coverage onto ARGB pixels.
//!
//! The destination is always treated as opaque RGB: output alpha is forced
//! to `0xFF` and the alpha channel of the text color is ignored.

use crate::pixel_buffer::PixelBuffer;
use crate::rasterizer::{GlyphBitmap, PixelMode};

/// Blend `color` over `dst` with coverage `alpha`.
///
/// Per channel: `color * alpha / 255 + dst * (255 - alpha) / 255`, each term
/// truncated. `alpha == 0` returns `dst` untouched.
#[inline]
pub fn blend_pixel(dst: u32, color: u32, alpha: u8) -> u32 {
    if alpha == 0 {
        return dst;
    }
    let a = alpha as u32;
    let inv = 255 - a;
    let channel = |shift: u32| {
        let fg = (color >> shift) & 0xFF;
        let bg = (dst >> shift) & 0xFF;
        fg * a / 255 + bg * inv / 255
    };
    0xFF00_0000 | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Coverage of the mask pixel at `(col, row)`.
///
/// Mono masks are read MSB-first within each byte; rows are `pitch` bytes
/// apart. Reads past the end of the mask yield zero coverage.
#[inline]
pub fn coverage(glyph: &GlyphBitmap<'_>, col: usize, row: usize) -> u8 {
    let row_start = row * glyph.pitch;
    match glyph.mode {
        PixelMode::Mono => {
            let byte = glyph.buffer.get(row_start + col / 8).copied().unwrap_or(0);
            if (byte >> (7 - (col % 8))) & 1 != 0 {
                255
            } else {
                0
            }
        }
        PixelMode::Gray => glyph.buffer.get(row_start + col).copied().unwrap_or(0),
    }
}

/// Composite a glyph mask whose top-left corner sits at `(origin_x, origin_y)`.
pub fn composite_glyph(
    buffer: &mut PixelBuffer<'_>,
    glyph: &GlyphBitmap<'_>,
    origin_x: i64,
    origin_y: i64,
    color: u32,
) {
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;

    for row in 0..glyph.rows {
        let py = origin_y + row as i64;
        if py < 0 || py >= height {
            continue;
        }
        for col in 0..glyph.width {
            let px = origin_x + col as i64;
            if px < 0 || px >= width {
                continue;
            }
            let alpha = coverage(glyph, col, row);
            buffer.blend(px, py, color, alpha);
        }
    }
}
