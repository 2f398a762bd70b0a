use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::foundation::error::{MockError, MockResult};
use crate::icon::IconRef;

/// Generic image shown for the bundled example in place of its missing icon files.
pub const PLACEHOLDER_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200" viewBox="0 0 200 200"><defs><linearGradient id="sky" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#6366f1"/><stop offset="1" stop-color="#ec4899"/></linearGradient></defs><rect width="200" height="200" fill="url(#sky)"/><circle cx="140" cy="60" r="22" fill="#fde68a"/><path d="M0 200 L70 110 L120 170 L150 135 L200 200 Z" fill="#1e1b4b" fill-opacity="0.55"/></svg>"##;

/// An icon ready to embed in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIcon {
    /// Self-contained `data:` URI for an `<image>` element.
    Image {
        /// The `data:` URI.
        href: String,
    },
    /// The icon could not be loaded; drawn as a broken-image indicator.
    Broken {
        /// Why loading failed.
        reason: String,
    },
    /// There is no icon.
    Absent,
}

impl ResolvedIcon {
    fn broken(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(%reason, "icon failed to load; showing broken-image indicator");
        Self::Broken { reason }
    }
}

/// Load the bytes behind `icon` and turn them into something a frame can embed.
///
/// `resources_dir` stands in for the site root: `"/icons/a.png"` and `"icons/a.png"`
/// both resolve to `resources_dir/icons/a.png`. Remote URLs are never fetched. Failures
/// are not errors; they come back as [`ResolvedIcon::Broken`].
#[tracing::instrument(skip(icon), fields(kind = icon_kind(&icon)))]
pub fn resolve_icon(icon: IconRef<'_>, resources_dir: &Path) -> ResolvedIcon {
    match icon {
        IconRef::None => ResolvedIcon::Absent,
        IconRef::Placeholder => ResolvedIcon::Image {
            href: data_uri("image/svg+xml", PLACEHOLDER_ICON_SVG.as_bytes()),
        },
        IconRef::Uploaded(upload) => match embed_bytes(upload.bytes()) {
            Ok(href) => ResolvedIcon::Image { href },
            Err(e) => ResolvedIcon::broken(format!("{}: {e}", upload.file_name())),
        },
        IconRef::Url(src) => resolve_url(src, resources_dir),
    }
}

fn icon_kind(icon: &IconRef<'_>) -> &'static str {
    match icon {
        IconRef::Uploaded(_) => "uploaded",
        IconRef::Url(_) => "url",
        IconRef::Placeholder => "placeholder",
        IconRef::None => "none",
    }
}

fn resolve_url(src: &str, resources_dir: &Path) -> ResolvedIcon {
    let src = src.trim();
    if src.is_empty() {
        return ResolvedIcon::broken("icon src is empty");
    }
    if src.starts_with("data:") {
        return ResolvedIcon::Image {
            href: src.to_owned(),
        };
    }
    if is_remote(src) {
        return ResolvedIcon::broken(format!("remote icon '{src}' is not fetched"));
    }

    let path = local_icon_path(src, resources_dir);
    let bytes = match std::fs::read(&path)
        .with_context(|| format!("read icon '{}'", path.display()))
    {
        Ok(bytes) => bytes,
        Err(e) => return ResolvedIcon::broken(format!("{e:#}")),
    };
    match embed_bytes(&bytes) {
        Ok(href) => ResolvedIcon::Image { href },
        Err(e) => ResolvedIcon::broken(format!("{}: {e}", path.display())),
    }
}

fn is_remote(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Map a manifest `src` onto the filesystem, dropping any query string or fragment.
pub(crate) fn local_icon_path(src: &str, resources_dir: &Path) -> PathBuf {
    let src = src.split(['?', '#']).next().unwrap_or_default();
    if let Some(abs) = src.strip_prefix("file://") {
        return PathBuf::from(abs);
    }
    let rel = src.trim_start_matches('/');
    let rel = rel.strip_prefix("./").unwrap_or(rel);
    resources_dir.join(rel)
}

/// Turn image bytes into a `data:` URI the SVG rasterizer can decode.
///
/// PNG, JPEG, GIF and WebP are embedded as-is, SVG is checked with `usvg`, and any
/// other format `image` can decode is re-encoded as PNG.
pub(crate) fn embed_bytes(bytes: &[u8]) -> MockResult<String> {
    if looks_like_svg(bytes) {
        usvg::Tree::from_data(bytes, &usvg::Options::default()).context("parse svg icon")?;
        return Ok(data_uri("image/svg+xml", bytes));
    }

    let format = image::guess_format(bytes).context("detect icon image format")?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("decode {format:?} icon"))?;

    match format {
        image::ImageFormat::Png
        | image::ImageFormat::Jpeg
        | image::ImageFormat::Gif
        | image::ImageFormat::WebP => Ok(data_uri(format.to_mime_type(), bytes)),
        _ => {
            let mut png = Vec::new();
            decoded
                .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
                .map_err(|e| {
                    MockError::render(format!("re-encode {format:?} icon as png: {e}"))
                })?;
            Ok(data_uri("image/png", &png))
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icon_source.rs"]
mod tests;
