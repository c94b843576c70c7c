//! ARGB color values as they appear in config files and on the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A 32-bit color packed as `0xAARRGGBB`.
///
/// Serialized as `"#RRGGBB"` when fully opaque, `"#AARRGGBB"` otherwise.
/// Parsing accepts either form, with a `#` or `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ConfigError::Validation(format!("invalid color '{s}'")))?;

        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ConfigError::Validation(format!(
                "invalid color '{s}': expected RRGGBB or AARRGGBB"
            ))),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}
