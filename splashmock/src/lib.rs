//! splashmock previews how a web-app manifest looks on a phone at launch.
//!
//! # Pipeline overview
//!
//! 1. **Interpret**: manifest text -> [`Manifest`] (or a [`MockError::Parse`])
//! 2. **Derive**: `Manifest` + optional [`UploadedIcon`] -> [`DisplayFields`]
//! 3. **Lay out**: `DisplayFields` + [`DeviceKind`] -> [`FrameLayout`]
//! 4. **Render**: layouts -> SVG text -> (optionally) RGBA pixels / PNG
//!
//! Steps 1-3 are pure. [`PreviewSession`] wraps them for interactive use, keeping the
//! last good manifest when an edit fails to parse.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod frame;
mod manifest;

/// Foreground color selection.
pub mod contrast;
/// Derived display fields.
pub mod display;
/// Uploaded icons and icon selection.
pub mod icon;
/// SVG and raster output.
pub mod render;
/// Stateless and stateful derivation from manifest text.
pub mod session;

pub use assets::icon_source::{PLACEHOLDER_ICON_SVG, ResolvedIcon, resolve_icon};
pub use contrast::{Contrast, resolve_contrast};
pub use display::{DEFAULT_APP_NAME, DEFAULT_BACKGROUND, DisplayFields, app_name};
pub use foundation::color::Rgb8;
pub use foundation::error::{MockError, MockResult};
pub use frame::device::DeviceKind;
pub use frame::layout::{
    Cutout, FrameLayout, IconContent, IconShape, IconSlot, Label, Pill, StatusBar, StatusGlyph,
};
pub use icon::{IconRef, MAX_UPLOAD_BYTES, UploadedIcon, select_icon};
pub use manifest::bundled::{BUNDLED_EXAMPLE_JSON, BUNDLED_EXAMPLE_NAME};
pub use manifest::model::{Manifest, ManifestIcon};
pub use render::{
    RasterImage, RenderOpts, encode_png, rasterize_svg, render_png, render_rgba, render_svg,
};
pub use session::{Preview, PreviewSession, derive_preview};
