//! Uploaded icons and icon selection.

use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;
use serde::ser::SerializeStruct as _;

use crate::foundation::error::{MockError, MockResult};
use crate::manifest::model::Manifest;

/// Largest upload accepted, matching the limit advertised next to the upload control.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Smallest leading size an icon needs to be preferred over the first listed icon.
pub const PREFERRED_MIN_SIZE: u64 = 192;

/// Image bytes supplied by the user, overriding every icon in the manifest.
///
/// The buffer is owned by whoever holds the value; replacing or dropping it releases
/// the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedIcon {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedIcon {
    /// Wrap uploaded bytes.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> MockResult<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(MockError::validation(format!(
                "uploaded icon '{file_name}' is empty"
            )));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(MockError::validation(format!(
                "uploaded icon '{file_name}' is {} bytes (max {MAX_UPLOAD_BYTES})",
                bytes.len()
            )));
        }
        Ok(Self { file_name, bytes })
    }

    /// Read an upload from disk; the file name is the path's last component.
    pub fn from_path(path: impl AsRef<Path>) -> MockResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read icon '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(file_name, bytes)
    }

    /// Name the upload was made under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for UploadedIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedIcon")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for UploadedIcon {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("UploadedIcon", 2)?;
        s.serialize_field("file_name", &self.file_name)?;
        s.serialize_field("len", &self.bytes.len())?;
        s.end()
    }
}

/// Which image the mock should show in its icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IconRef<'a> {
    /// The user's upload.
    Uploaded(&'a UploadedIcon),
    /// The `src` of a manifest icon, unvalidated.
    Url(&'a str),
    /// The built-in generic placeholder image.
    Placeholder,
    /// Nothing to show.
    None,
}

impl IconRef<'_> {
    /// Whether there is no icon at all.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Choose the icon for `manifest`, with `upload` taking precedence.
///
/// Without an upload, the bundled example (recognized by name) gets the placeholder,
/// since its icon files are not available. Otherwise the first icon whose leading size
/// is at least [`PREFERRED_MIN_SIZE`] wins, falling back to the first icon listed.
pub fn select_icon<'a>(manifest: &'a Manifest, upload: Option<&'a UploadedIcon>) -> IconRef<'a> {
    if let Some(upload) = upload {
        return IconRef::Uploaded(upload);
    }

    let Some(first) = manifest.icons.first() else {
        return IconRef::None;
    };

    if manifest.is_bundled_example() {
        return IconRef::Placeholder;
    }

    let chosen = manifest
        .icons
        .iter()
        .find(|icon| icon.leading_size() >= PREFERRED_MIN_SIZE)
        .unwrap_or(first);
    IconRef::Url(&chosen.src)
}

#[cfg(test)]
#[path = "../tests/unit/icon.rs"]
mod tests;
