use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::MockError;
use crate::frame::layout::StatusGlyph;

/// Which phone the mock imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Hole-punch camera, circular icon, app name under the icon.
    Android,
    /// Notch, rounded-square icon, no app name.
    Ios,
}

impl DeviceKind {
    /// Every device, in display order.
    pub const ALL: [Self; 2] = [Self::Android, Self::Ios];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    pub(crate) fn chrome(self) -> &'static DeviceChrome {
        match self {
            Self::Android => &ANDROID,
            Self::Ios => &IOS,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(MockError::validation(format!(
                "unknown device \"{other}\" (expected android or ios)"
            ))),
        }
    }
}

/// Fixed geometry and styling for one device variant, in CSS pixels.
#[derive(Debug)]
pub(crate) struct DeviceChrome {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) bezel: f64,
    pub(crate) corner_radius: f64,
    pub(crate) status_time: &'static str,
    pub(crate) status_inset_x: f64,
    pub(crate) status_inset_y: f64,
    pub(crate) status_font_size: f64,
    pub(crate) status_font_weight: u16,
    pub(crate) status_opacity: f64,
    pub(crate) status_glyphs: &'static [StatusGlyph],
    pub(crate) status_glyph_size: f64,
    pub(crate) status_glyph_gap: f64,
    pub(crate) icon_size: f64,
    pub(crate) icon_corner_radius: Option<f64>,
    pub(crate) icon_backdrop: bool,
    pub(crate) shows_name: bool,
    pub(crate) indicator_width: f64,
    pub(crate) indicator_bottom: f64,
    pub(crate) indicator_fill: &'static str,
}

static ANDROID: DeviceChrome = DeviceChrome {
    width: 300.0,
    height: 600.0,
    bezel: 8.0,
    corner_radius: 32.0,
    status_time: "12:00",
    status_inset_x: 16.0,
    status_inset_y: 8.0,
    status_font_size: 12.0,
    status_font_weight: 500,
    status_opacity: 0.8,
    status_glyphs: &[StatusGlyph::Wifi, StatusGlyph::Battery],
    status_glyph_size: 14.0,
    status_glyph_gap: 8.0,
    icon_size: 112.0,
    icon_corner_radius: None,
    icon_backdrop: false,
    shows_name: true,
    indicator_width: 64.0,
    indicator_bottom: 12.0,
    indicator_fill: "#6b7280",
};

static IOS: DeviceChrome = DeviceChrome {
    width: 300.0,
    height: 600.0,
    bezel: 14.0,
    corner_radius: 48.0,
    status_time: "9:41",
    status_inset_x: 24.0,
    status_inset_y: 8.0,
    status_font_size: 10.0,
    status_font_weight: 700,
    status_opacity: 1.0,
    status_glyphs: &[StatusGlyph::Signal, StatusGlyph::Wifi, StatusGlyph::Battery],
    status_glyph_size: 12.0,
    status_glyph_gap: 4.0,
    icon_size: 96.0,
    icon_corner_radius: Some(16.0),
    icon_backdrop: true,
    shows_name: false,
    indicator_width: 128.0,
    indicator_bottom: 8.0,
    indicator_fill: "#9ca3af",
};

#[cfg(test)]
#[path = "../../tests/unit/frame/device.rs"]
mod tests;
