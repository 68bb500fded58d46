//! sRGB colour values as exchanged with colour-picker widgets (`#rrggbb`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("colour must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in colour: {0:?}")]
    BadDigit(String),
}

/// 8-bit sRGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components in 0..1, still sRGB encoded.
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Components in linear space, as used by the shading math.
    pub fn to_linear_f32(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !matches!(digits.len(), 3 | 6) {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        if digits.len() == 6 {
            return Ok(Rgb::from_hex(packed));
        }
        // #abc expands to #aabbcc
        let r = ((packed >> 8) & 0xf) as u8;
        let g = ((packed >> 4) & 0xf) as u8;
        let b = (packed & 0xf) as u8;
        Ok(Rgb::new(r * 17, g * 17, b * 17))
    }
}
