//! Bounds-checked view over a caller-owned ARGB pixel buffer.

use crate::blend::blend_pixel;
use crate::error::RenderError;

/// A mutable view over row-major `0xAARRGGBB` pixels.
///
/// The view never owns or resizes the pixels. Every write goes through a
/// coordinate check, so glyphs placed partially or entirely off the buffer
/// only touch the pixels that land inside `[0, width) x [0, height)`.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a tightly packed buffer (`stride == width`).
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Result<Self, RenderError> {
        Self::with_stride(pixels, width, height, width)
    }

    /// Wrap a buffer whose rows are `stride` pixels apart.
    pub fn with_stride(
        pixels: &'a mut [u32],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, RenderError> {
        if stride < width {
            return Err(RenderError::InvalidStride { width, stride });
        }

        let expected = if width == 0 || height == 0 {
            0
        } else {
            stride * (height - 1) + width
        };
        if pixels.len() < expected {
            return Err(RenderError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance in pixels between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when there is no pixel to draw into.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The underlying pixels, including any row padding.
    pub fn pixels(&self) -> &[u32] {
        self.pixels
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.stride + x)
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: i64, y: i64) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Blend `color` over the pixel at `(x, y)` with coverage `alpha`.
    ///
    /// Returns `false` without touching anything when the coordinate is out
    /// of bounds or `alpha` is zero.
    pub fn blend(&mut self, x: i64, y: i64, color: u32, alpha: u8) -> bool {
        if alpha == 0 {
            return false;
        }
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = blend_pixel(self.pixels[i], color, alpha);
                true
            }
            None => false,
        }
    }

    /// Overwrite every visible pixel with `color`. Row padding is left alone.
    pub fn fill(&mut self, color: u32) {
        if self.is_empty() {
            return;
        }
        let width = self.width;
        for row in self.pixels.chunks_mut(self.stride).take(self.height) {
            row[..width].fill(color);
        }
    }
}
