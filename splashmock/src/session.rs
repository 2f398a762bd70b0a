//! Text-in, display-fields-out derivation, stateless and stateful.

use crate::display::DisplayFields;
use crate::foundation::error::MockResult;
use crate::icon::UploadedIcon;
use crate::manifest::bundled::BUNDLED_EXAMPLE_JSON;
use crate::manifest::model::Manifest;

/// A successfully interpreted manifest plus the upload it is previewed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    /// The parsed manifest.
    pub manifest: Manifest,
    /// The upload, if any.
    pub upload: Option<&'a UploadedIcon>,
}

impl Preview<'_> {
    /// Display fields for this preview.
    pub fn fields(&self) -> DisplayFields<'_> {
        DisplayFields::derive(&self.manifest, self.upload)
    }
}

/// Interpret raw manifest text.
///
/// On a parse error nothing is derived; callers that want stale-but-valid output keep
/// their previous [`Preview`] (or use [`PreviewSession`], which does this for them).
pub fn derive_preview<'a>(
    raw: &str,
    upload: Option<&'a UploadedIcon>,
) -> MockResult<Preview<'a>> {
    let manifest = Manifest::from_json_str(raw)?;
    Ok(Preview { manifest, upload })
}

/// Editing state for one preview: raw text, last good manifest, parse error and upload.
///
/// Display fields always come from the last manifest that parsed, so a broken edit
/// keeps showing the previous mock while [`PreviewSession::error`] reports the problem.
#[derive(Debug, Clone)]
pub struct PreviewSession {
    raw: String,
    manifest: Manifest,
    error: Option<String>,
    upload: Option<UploadedIcon>,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSession {
    /// A session showing the bundled example.
    pub fn new() -> Self {
        Self {
            raw: BUNDLED_EXAMPLE_JSON.to_owned(),
            manifest: Manifest::bundled_example(),
            error: None,
            upload: None,
        }
    }

    /// Replace the raw text and re-interpret it.
    ///
    /// Returns `true` if the text parsed. On failure the previous manifest stays in
    /// place and the parser's message is available from [`PreviewSession::error`].
    #[tracing::instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn set_manifest_text(&mut self, raw: &str) -> bool {
        self.raw = raw.to_owned();
        match Manifest::from_json_str(raw) {
            Ok(manifest) => {
                self.manifest = manifest;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "manifest text rejected; keeping last good manifest");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Use `icon` in place of any manifest icon, releasing the previous upload.
    pub fn upload_icon(&mut self, icon: UploadedIcon) {
        if let Some(prev) = self.upload.replace(icon) {
            tracing::debug!(
                file_name = prev.file_name(),
                len = prev.bytes().len(),
                "released previous upload"
            );
        }
    }

    /// Drop the current upload, if any.
    pub fn clear_icon(&mut self) {
        if let Some(prev) = self.upload.take() {
            tracing::debug!(
                file_name = prev.file_name(),
                len = prev.bytes().len(),
                "released upload"
            );
        }
    }

    /// Display fields for the last good manifest and the current upload.
    pub fn display_fields(&self) -> DisplayFields<'_> {
        DisplayFields::derive(&self.manifest, self.upload.as_ref())
    }

    /// Message from the most recent failed parse, cleared by the next successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The last manifest that parsed.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The text most recently set, whether or not it parsed.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// The current upload.
    pub fn uploaded_icon(&self) -> Option<&UploadedIcon> {
        self.upload.as_ref()
    }

    /// File name of the current upload.
    pub fn uploaded_file_name(&self) -> Option<&str> {
        self.upload.as_ref().map(UploadedIcon::file_name)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
