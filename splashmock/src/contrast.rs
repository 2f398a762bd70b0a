//! Foreground color selection for text and glyphs drawn over a background.

use std::fmt;

use serde::Serialize;

use crate::foundation::color::Rgb8;

/// Threshold on [`Rgb8::luma_milli`]: backgrounds at or above it get black ink.
const LIGHT_LUMA_MILLI: u32 = 128_000;

/// Legible ink color for a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    /// Black ink, for light backgrounds.
    Black,
    /// White ink, for dark backgrounds.
    White,
}

impl Contrast {
    /// The ink as `#rrggbb`.
    pub fn as_hex(self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::White => "#ffffff",
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Contrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick black or white ink for `color` using YIQ luma.
///
/// Absent or malformed colors (anything but 3 or 6 hex digits after an optional `#`)
/// resolve to [`Contrast::Black`]. A luma of exactly 128 is black.
pub fn resolve_contrast(color: Option<&str>) -> Contrast {
    match color.and_then(Rgb8::parse_hex) {
        Some(rgb) if rgb.luma_milli() < LIGHT_LUMA_MILLI => Contrast::White,
        _ => Contrast::Black,
    }
}

#[cfg(test)]
#[path = "../tests/unit/contrast.rs"]
mod tests;
