//! sRGB colors for the flame palette

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit sRGB color, serialized as `"#rrggbb"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pale cream used for the dimmest embers and the skeleton outline
    pub const BASE: Rgb = Rgb::from_hex(0xfffbe0);
    /// Warm yellow for mid-tier embers
    pub const MID: Rgb = Rgb::from_hex(0xffd864);
    /// Orange-gold fill for large core embers
    pub const HOT: Rgb = Rgb::from_hex(0xffc23a);
    /// Shadow tint for non-core embers
    pub const GLOW: Rgb = Rgb::from_hex(0xffe790);
    /// Near-white shadow and haze tint for the core
    pub const CORE: Rgb = Rgb::from_hex(0xfffbe6);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Channels scaled to `[0, 1]`
    #[inline]
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let hex = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Self::from_hex(hex))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Rgb::HOT, Rgb::new(0xff, 0xc2, 0x3a));
        assert_eq!(Rgb::HOT.to_string(), "#ffc23a");
        assert_eq!("#FFC23A".parse::<Rgb>(), Ok(Rgb::HOT));
    }

    #[test]
    fn test_rejects_malformed_colors() {
        assert!("ffc23a".parse::<Rgb>().is_err());
        assert!("#ffc23".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("#+fc23a".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::MID).unwrap();
        assert_eq!(json, "\"#ffd864\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::MID);
        assert!(serde_json::from_str::<Rgb>("\"orange\"").is_err());
    }
}
