use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::foundation::error::{MockError, MockResult};

/// Avoid pathological allocations from huge scales.
const MAX_DIM: u32 = 16_384;

/// A rendered mock as RGBA8 pixels.
///
/// Pixels straight out of [`rasterize_svg`] are **premultiplied**; the flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RasterImage {
    /// RGBA at `(x, y)`, demultiplied if needed. `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut px = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        if self.premultiplied {
            demultiply_rgba8_in_place(&mut px);
        }
        Some(px)
    }
}

/// Rasterize an SVG document, scaling its intrinsic size by `scale`.
#[tracing::instrument(skip(svg), fields(len = svg.len()))]
pub fn rasterize_svg(svg: &str, scale: f32) -> MockResult<RasterImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MockError::validation(format!(
            "scale must be a positive number, got {scale}"
        )));
    }

    let opts = usvg::Options {
        fontdb: svg_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| MockError::render(format!("parse mock svg: {e}")))?;

    let size = tree.size();
    let width = to_px(size.width() * scale)?;
    let height = to_px(size.height() * scale)?;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(MockError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MockError::render("failed to allocate pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    tracing::debug!(width, height, "rasterized mock");
    Ok(RasterImage {
        width,
        height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

/// Encode an image as PNG, demultiplying first if needed.
pub fn encode_png(img: &RasterImage) -> MockResult<Vec<u8>> {
    let mut rgba = img.data.clone();
    if img.premultiplied {
        for px in rgba.chunks_exact_mut(4) {
            demultiply_rgba8_in_place(px);
        }
    }
    let buf = image::RgbaImage::from_raw(img.width, img.height, rgba)
        .ok_or_else(|| MockError::render("pixel buffer does not match image size"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(buf)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(png)
}

fn to_px(v: f32) -> MockResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MockError::render("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}

fn demultiply_rgba8_in_place(px: &mut [u8]) {
    let a = px[3] as u16;
    if a == 0 || a == 255 {
        return;
    }
    for c in &mut px[..3] {
        *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// System fonts, loaded once per process.
fn svg_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.faces().count(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
