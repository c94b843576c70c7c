//! Configuration system for the par-vfont text rasterizer.
//!
//! This crate provides configuration loading, saving, and default values
//! for rendering a line of text into an ARGB canvas. It includes:
//!
//! - Font selection (file path or system family, face index, pixel size)
//! - Text and background colors in 0xAARRGGBB packing
//! - Canvas dimensions for the command-line renderer
//! - Raster settings (hinting, anti-aliasing) consumed by the render crate

pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
pub mod raster;

// Re-export main types for convenience
pub use color::Color;
pub use config::Config;
pub use error::ConfigError;
pub use raster::RasterSettings;
