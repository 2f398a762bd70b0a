//! Display-ready fields derived from a manifest.

use serde::Serialize;

use crate::contrast::{Contrast, resolve_contrast};
use crate::icon::{IconRef, UploadedIcon, select_icon};
use crate::manifest::model::Manifest;

/// App name shown when the manifest has neither `name` nor `short_name`.
pub const DEFAULT_APP_NAME: &str = "App Name";

/// Background used when the manifest has no `background_color`.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Everything the frame renderer needs, derived from a manifest and an optional upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFields<'a> {
    /// Name shown under the icon.
    pub app_name: String,
    /// Image for the icon slot.
    pub icon: IconRef<'a>,
    /// Screen background, as written in the manifest.
    pub background_color: String,
    /// Ink for text and status glyphs over the background.
    pub foreground: Contrast,
}

impl<'a> DisplayFields<'a> {
    /// Derive display fields. Pure: the same inputs always give the same fields.
    pub fn derive(manifest: &'a Manifest, upload: Option<&'a UploadedIcon>) -> Self {
        let background_color = non_empty(manifest.background_color.as_deref())
            .unwrap_or(DEFAULT_BACKGROUND)
            .to_owned();
        let foreground = resolve_contrast(Some(&background_color));

        let fields = Self {
            app_name: app_name(manifest).to_owned(),
            icon: select_icon(manifest, upload),
            background_color,
            foreground,
        };
        tracing::debug!(
            app_name = %fields.app_name,
            background = %fields.background_color,
            foreground = %fields.foreground,
            "derived display fields"
        );
        fields
    }
}

/// `name`, else `short_name`, else [`DEFAULT_APP_NAME`]. Empty strings count as absent.
pub fn app_name(manifest: &Manifest) -> &str {
    non_empty(manifest.name.as_deref())
        .or_else(|| non_empty(manifest.short_name.as_deref()))
        .unwrap_or(DEFAULT_APP_NAME)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../tests/unit/display.rs"]
mod tests;
