pub(crate) mod raster;
pub(crate) mod svg;

use std::path::{Path, PathBuf};

use crate::assets::icon_source::resolve_icon;
use crate::display::DisplayFields;
use crate::foundation::error::{MockError, MockResult};
use crate::frame::device::DeviceKind;
use crate::frame::layout::FrameLayout;

pub use raster::{RasterImage, encode_png, rasterize_svg};

/// Options for turning display fields into an image.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    /// Pixel density: 2.0 renders each CSS pixel as 2x2 device pixels.
    pub scale: f32,
    /// Directory that manifest icon paths resolve against. `None` means the current
    /// directory.
    pub resources_dir: Option<PathBuf>,
    /// Horizontal space between devices on a sheet.
    pub gap: f64,
    /// Space around the devices.
    pub margin: f64,
    /// Sheet background; `None` leaves it transparent.
    pub backdrop: Option<String>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            resources_dir: None,
            gap: 48.0,
            margin: 32.0,
            backdrop: Some("#030712".to_owned()),
        }
    }
}

impl RenderOpts {
    /// Reject options no render could honor.
    pub fn validate(&self) -> MockResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MockError::validation(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.gap) || !non_negative(self.margin) {
            return Err(MockError::validation("gap and margin must be non-negative"));
        }
        Ok(())
    }

    fn resources_dir(&self) -> &Path {
        self.resources_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

/// Render `devices` side by side as one SVG document.
#[tracing::instrument(skip(fields, opts), fields(app_name = %fields.app_name))]
pub fn render_svg(
    devices: &[DeviceKind],
    fields: &DisplayFields<'_>,
    opts: &RenderOpts,
) -> MockResult<String> {
    opts.validate()?;
    if devices.is_empty() {
        return Err(MockError::validation("at least one device is required"));
    }

    // Every device shows the same icon; load it once.
    let icon = resolve_icon(fields.icon, opts.resources_dir());
    let frames: Vec<FrameLayout<'_>> = devices
        .iter()
        .map(|&device| FrameLayout::build(device, fields))
        .collect();

    svg::sheet_svg(&frames, &icon, opts)
}

/// Render `devices` side by side into premultiplied RGBA pixels.
pub fn render_rgba(
    devices: &[DeviceKind],
    fields: &DisplayFields<'_>,
    opts: &RenderOpts,
) -> MockResult<RasterImage> {
    let svg = render_svg(devices, fields, opts)?;
    rasterize_svg(&svg, opts.scale)
}

/// Render `devices` side by side into PNG bytes.
pub fn render_png(
    devices: &[DeviceKind],
    fields: &DisplayFields<'_>,
    opts: &RenderOpts,
) -> MockResult<Vec<u8>> {
    encode_png(&render_rgba(devices, fields, opts)?)
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
