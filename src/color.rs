//! 24-bit RGB color values as stored in map documents

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Error produced when a color value does not parse as a 24-bit RGB hex code
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color value '{text}'")]
pub struct ColorParseError {
    pub text: String,
}

/// A 24-bit RGB color.
///
/// Serialized to document attributes as `#rrggbb`; parsed from `#rrggbb`,
/// `0xrrggbb` or bare `rrggbb` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Create a color from a packed RGB integer. Bits above 24 are discarded.
    pub const fn new(rgb: u32) -> Self {
        Color(rgb & 0x00ff_ffff)
    }

    /// The packed RGB value
    pub const fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);
        if hex.len() != 6 {
            return Err(ColorParseError {
                text: s.to_string(),
            });
        }
        u32::from_str_radix(hex, 16)
            .map(Color::new)
            .map_err(|_| ColorParseError {
                text: s.to_string(),
            })
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_six_digits() {
        assert_eq!(Color::new(0xff0000).to_string(), "#ff0000");
        assert_eq!(Color::new(0x00002a).to_string(), "#00002a");
    }

    #[test]
    fn test_parse_accepted_prefixes() {
        assert_eq!("#0000ff".parse::<Color>().unwrap(), Color::new(0x0000ff));
        assert_eq!("0x0000ff".parse::<Color>().unwrap(), Color::new(0x0000ff));
        assert_eq!("0000ff".parse::<Color>().unwrap(), Color::new(0x0000ff));
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        assert!("#fff".parse::<Color>().is_err());
        assert!("red".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn test_high_bits_discarded() {
        assert_eq!(Color::new(0xff_ff0000).rgb(), 0xff0000);
    }
}
