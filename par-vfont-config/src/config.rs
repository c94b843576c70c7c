//! The top-level `Config` struct and its YAML persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::raster::RasterSettings;

/// Rendering configuration for par-vfont.
///
/// Every field has a serde default, so an empty YAML document is a valid
/// config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Font file to load (TTF/OTF/TTC). Takes priority over `font_family`.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// System font family to look up when no `font_path` is set.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Face index within a font collection (0 = first face).
    #[serde(default = "crate::defaults::face_index")]
    pub face_index: u32,

    /// Pixel size (pixels per em).
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: u32,

    /// Text color. The alpha channel is ignored when compositing.
    #[serde(default = "crate::defaults::text_color")]
    pub text_color: Color,

    /// Canvas fill color used by the command-line renderer.
    #[serde(default = "crate::defaults::background_color")]
    pub background_color: Color,

    #[serde(default = "crate::defaults::canvas_width")]
    pub canvas_width: u32,

    #[serde(default = "crate::defaults::canvas_height")]
    pub canvas_height: u32,

    #[serde(default)]
    pub raster: RasterSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: None,
            face_index: crate::defaults::face_index(),
            font_size: crate::defaults::font_size(),
            text_color: crate::defaults::text_color(),
            background_color: crate::defaults::background_color(),
            canvas_width: crate::defaults::canvas_width(),
            canvas_height: crate::defaults::canvas_height(),
            raster: RasterSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file is not an error: defaults are returned and nothing is
    /// written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_size == 0 {
            return Err(ConfigError::Validation(
                "font_size must be greater than 0".to_string(),
            ));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if matches!(&self.font_path, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(
                "font_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-vfont")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/par-vfont on all Unix-like platforms, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-vfont")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
