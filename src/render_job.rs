//! One-shot rendering of a line of text into an image file.
//!
//! Resolves the font from command-line overrides and config, renders into
//! an ARGB canvas and converts it to RGBA for PNG output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::{Rgba, RgbaImage};
use par_vfont_config::{Color, Config, RasterSettings};
use par_vfont_render::{FontSource, PixelBuffer, TextExtent, VFont, find_system_font};

/// Font selection as given on the command line. `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub struct FontChoice {
    pub path: Option<PathBuf>,
    pub family: Option<String>,
    pub face_index: Option<u32>,
    pub size: Option<u32>,
    pub no_hinting: bool,
    pub mono: bool,
}

/// A font ready to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub source: FontSource,
    pub size: u32,
    pub settings: RasterSettings,
}

impl ResolvedFont {
    pub fn open(&self) -> Result<VFont> {
        VFont::open_with_settings(
            &self.source.path,
            self.source.face_index,
            self.size,
            self.settings,
        )
        .with_context(|| format!("Failed to open font {:?}", self.source.path))
    }
}

/// Pick the font file, face, size and raster settings.
///
/// Order: explicit path, explicit family, config path, config family, then
/// any installed font that covers Latin text.
pub fn resolve_font(choice: &FontChoice, config: &Config) -> Result<ResolvedFont> {
    let face_index = choice.face_index.unwrap_or(config.face_index);
    let family_source = |family: &str| {
        find_system_font(family).with_context(|| format!("Font family '{}' not found", family))
    };

    let source = if let Some(path) = &choice.path {
        FontSource {
            path: path.clone(),
            face_index,
        }
    } else if let Some(family) = &choice.family {
        family_source(family)?
    } else if let Some(path) = &config.font_path {
        FontSource {
            path: path.clone(),
            face_index,
        }
    } else if let Some(family) = &config.font_family {
        family_source(family)?
    } else {
        log::info!("No font configured, using first usable system font");
        par_vfont_render::font_handle::discovery::any_system_font()
            .context("No font configured and no usable system font found")?
    };

    let size = choice.size.unwrap_or(config.font_size);
    if size == 0 {
        bail!("Font size must be greater than 0");
    }

    let settings = RasterSettings {
        hinting: config.raster.hinting && !choice.no_hinting,
        antialias: config.raster.antialias && !choice.mono,
    };

    Ok(ResolvedFont {
        source,
        size,
        settings,
    })
}

/// Where the line goes on the canvas and in what colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    /// Baseline position.
    pub baseline: i32,
    pub color: Color,
    pub background: Color,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// Baseline for a line whose top edge is at `top`: `top + size`.
    pub fn baseline_from_top(top: i32, size: u32) -> i32 {
        top.saturating_add(size as i32)
    }
}

/// Render `text` onto a fresh canvas, returning its ARGB pixels.
pub fn render_canvas(font: &mut VFont, text: &str, placement: &Placement) -> Result<Vec<u32>> {
    let (width, height) = (placement.width as usize, placement.height as usize);
    let mut pixels = vec![0u32; width * height];
    let mut buffer = PixelBuffer::new(&mut pixels, width, height)?;

    buffer.fill(placement.background.argb());
    font.render_text(
        text,
        &mut buffer,
        placement.x,
        placement.baseline,
        placement.color.argb(),
        None,
    );
    Ok(pixels)
}

/// Convert `0xAARRGGBB` pixels to an RGBA image.
pub fn argb_to_image(pixels: &[u32], width: u32, height: u32) -> Result<RgbaImage> {
    if pixels.len() != (width as usize) * (height as usize) {
        bail!(
            "Pixel count {} does not match {}x{}",
            pixels.len(),
            width,
            height
        );
    }
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let p = pixels[y as usize * width as usize + x as usize];
        Rgba([(p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8])
    }))
}

/// Render and save as PNG.
pub fn render_to_file(
    font: &mut VFont,
    text: &str,
    placement: &Placement,
    output: &Path,
) -> Result<()> {
    let pixels = render_canvas(font, text, placement)?;
    let image = argb_to_image(&pixels, placement.width, placement.height)?;
    image
        .save(output)
        .with_context(|| format!("Failed to write {:?}", output))?;
    log::info!(
        "Wrote {}x{} image to {:?}",
        placement.width,
        placement.height,
        output
    );
    Ok(())
}

/// Measure the advance width of `text`.
pub fn measure(font: &mut VFont, text: &str) -> TextExtent {
    font.measure_text(text, None)
}
