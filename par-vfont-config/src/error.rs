//! Typed error variants for the par-vfont-config crate.
//!
//! Callers at the binary boundary usually hold these inside an
//! `anyhow::Error`; use `downcast_ref::<ConfigError>()` to match on a
//! specific failure mode.

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
