//! par-vfont: load a TrueType/TrueType-Collection font and rasterize UTF-8
//! text into caller-owned ARGB pixel buffers.
//!
//! The font handle and compositing live in `par-vfont-render`, settings in
//! `par-vfont-config`. This crate adds the logging bridge and the
//! command-line frontend.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod render_job;

pub use par_vfont_config as config;
pub use par_vfont_render as render;
