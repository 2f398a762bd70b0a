use std::borrow::Cow;
use std::fmt::{self, Write as _};

use kurbo::Rect;

use crate::assets::icon_source::ResolvedIcon;
use crate::foundation::color::Rgb8;
use crate::foundation::error::{MockError, MockResult};
use crate::frame::layout::{Cutout, FrameLayout, IconContent, IconShape, Label, StatusGlyph};
use crate::render::RenderOpts;

const FONT_FAMILY: &str = "Inter, Roboto, 'Helvetica Neue', Arial, sans-serif";
/// What a browser shows through a screen whose background it cannot parse.
const UNPARSEABLE_BACKGROUND: &str = "#111827";
const BROKEN_FILL: &str = "#f3f4f6";
const BROKEN_STROKE: &str = "#9ca3af";

/// Lay frames out left to right on one sheet, all sharing `icon`.
pub(crate) fn sheet_svg(
    frames: &[FrameLayout<'_>],
    icon: &ResolvedIcon,
    opts: &RenderOpts,
) -> MockResult<String> {
    let mut out = String::new();
    write_sheet(&mut out, frames, icon, opts)
        .map_err(|e| MockError::render(format!("format svg: {e}")))?;
    Ok(out)
}

fn write_sheet(
    out: &mut String,
    frames: &[FrameLayout<'_>],
    icon: &ResolvedIcon,
    opts: &RenderOpts,
) -> fmt::Result {
    let content_w: f64 = frames.iter().map(|f| f.size.width).sum::<f64>()
        + opts.gap * frames.len().saturating_sub(1) as f64;
    let content_h = frames.iter().map(|f| f.size.height).fold(0.0, f64::max);
    let width = content_w + opts.margin * 2.0;
    let height = content_h + opts.margin * 2.0;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    out.push_str(concat!(
        r#"<defs>"#,
        r##"<filter id="frame-shadow" x="-30%" y="-20%" width="160%" height="150%"><feDropShadow dx="0" dy="24" stdDeviation="24" flood-color="#000000" flood-opacity="0.5"/></filter>"##,
        r##"<filter id="icon-shadow" x="-30%" y="-30%" width="160%" height="160%"><feDropShadow dx="0" dy="4" stdDeviation="4" flood-color="#000000" flood-opacity="0.25"/></filter>"##,
        "</defs>\n"
    ));
    if let Some(backdrop) = &opts.backdrop {
        writeln!(
            out,
            r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
            safe_paint(backdrop, "none")
        )?;
    }

    let mut x = opts.margin;
    for (i, frame) in frames.iter().enumerate() {
        let y = opts.margin + (content_h - frame.size.height) / 2.0;
        writeln!(
            out,
            r#"<g id="{}-{i}" transform="translate({x} {y})">"#,
            frame.device
        )?;
        write_frame(out, frame, icon, i)?;
        out.push_str("</g>\n");
        x += frame.size.width + opts.gap;
    }

    out.push_str("</svg>\n");
    Ok(())
}

fn write_frame(
    out: &mut String,
    frame: &FrameLayout<'_>,
    icon: &ResolvedIcon,
    index: usize,
) -> fmt::Result {
    let w = frame.size.width;
    let h = frame.size.height;
    let ink = frame.ink.as_hex();
    let screen = frame.screen;
    let clip_id = format!("screen-clip-{index}");

    // Body, bezel highlight, screen.
    writeln!(
        out,
        r#"<rect width="{w}" height="{h}" rx="{r}" fill="{fill}" filter="url(#frame-shadow)"/>"#,
        r = frame.corner_radius,
        fill = frame.bezel_fill,
    )?;
    writeln!(
        out,
        r##"<rect x="0.5" y="0.5" width="{}" height="{}" rx="{}" fill="none" stroke="#ffffff" stroke-opacity="0.1"/>"##,
        w - 1.0,
        h - 1.0,
        frame.corner_radius,
    )?;
    writeln!(
        out,
        r#"<clipPath id="{clip_id}"><rect x="{}" y="{}" width="{}" height="{}" rx="{}"/></clipPath>"#,
        screen.x0,
        screen.y0,
        screen.width(),
        screen.height(),
        frame.screen_radius,
    )?;
    writeln!(out, r#"<g clip-path="url(#{clip_id})">"#)?;
    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        screen.x0,
        screen.y0,
        screen.width(),
        screen.height(),
        safe_paint(&frame.background, UNPARSEABLE_BACKGROUND),
    )?;

    write_status_bar(out, frame, ink)?;
    write_icon(out, frame, icon, index)?;
    if let Some(label) = &frame.label {
        write_label(out, label, ink)?;
    }
    write_cutout(out, &frame.cutout)?;
    out.push_str("</g>\n");

    let pill = &frame.indicator;
    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" fill-opacity="{}"/>"#,
        pill.rect.x0,
        pill.rect.y0,
        pill.rect.width(),
        pill.rect.height(),
        pill.rect.height() / 2.0,
        pill.fill,
        pill.opacity,
    )
}

fn write_status_bar(out: &mut String, frame: &FrameLayout<'_>, ink: &str) -> fmt::Result {
    let bar = &frame.status_bar;
    writeln!(out, r#"<g opacity="{}">"#, bar.opacity)?;
    writeln!(
        out,
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" font-weight="{}" fill="{ink}">{}</text>"#,
        bar.time_origin.x, bar.time_origin.y, bar.font_size, bar.font_weight, bar.time,
    )?;
    for (glyph, rect) in &bar.glyphs {
        write_glyph(out, *glyph, *rect, ink)?;
    }
    out.push_str("</g>\n");
    Ok(())
}

/// Glyphs are drawn on a 24x24 grid and scaled into `rect`.
fn write_glyph(out: &mut String, glyph: StatusGlyph, rect: Rect, ink: &str) -> fmt::Result {
    let s = rect.width() / 24.0;
    write!(
        out,
        r#"<g transform="translate({} {}) scale({s})" fill="none" stroke="{ink}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
        rect.x0, rect.y0,
    )?;
    match glyph {
        StatusGlyph::Signal => {
            out.push_str(r#"<path d="M2 20h.01M7 20v-4M12 20v-8M17 20V8M22 4v16"/>"#)
        }
        StatusGlyph::Wifi => out.push_str(
            r#"<path d="M12 20h.01M2 8.82a15 15 0 0 1 20 0M5 12.86a10 10 0 0 1 14 0M8.5 16.43a5 5 0 0 1 7 0"/>"#,
        ),
        StatusGlyph::Battery => out.push_str(
            r#"<rect x="2" y="7" width="16" height="10" rx="2"/><path d="M22 11v2"/>"#,
        ),
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_icon(
    out: &mut String,
    frame: &FrameLayout<'_>,
    icon: &ResolvedIcon,
    index: usize,
) -> fmt::Result {
    let slot = &frame.icon;
    let r = slot.rect;
    let clip_id = format!("icon-clip-{index}");
    let shape = shape_element(r, slot.shape);

    writeln!(out, r#"<clipPath id="{clip_id}">{}</clipPath>"#, shape(""))?;

    match (slot.content, icon) {
        (IconContent::Placeholder { fill, caption, caption_fill }, _) => {
            writeln!(out, "{}", shape(&format!(r#"fill="{fill}""#)))?;
            writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="12" fill="{caption_fill}">{caption}</text>"#,
                r.center().x,
                r.center().y + 4.0,
            )?;
        }
        (IconContent::Image(_), ResolvedIcon::Image { href }) => {
            let shadow = if slot.shadow {
                r#" filter="url(#icon-shadow)""#
            } else {
                ""
            };
            if let Some(backdrop) = slot.backdrop {
                writeln!(out, "{}", shape(&format!(r#"fill="{backdrop}"{shadow}"#)))?;
            }
            writeln!(
                out,
                r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" clip-path="url(#{clip_id})" xlink:href="{}"/>"#,
                r.x0,
                r.y0,
                r.width(),
                r.height(),
                escape_xml(href),
            )?;
        }
        (IconContent::Image(_), ResolvedIcon::Broken { .. } | ResolvedIcon::Absent) => {
            writeln!(out, "{}", shape(&format!(r#"fill="{BROKEN_FILL}""#)))?;
            write_broken_image(out, r)?;
        }
    }
    Ok(())
}

/// Small picture-with-a-tear glyph, centered in `r`.
fn write_broken_image(out: &mut String, r: Rect) -> fmt::Result {
    let size = (r.width().min(r.height()) * 0.4).max(1.0);
    let s = size / 24.0;
    writeln!(
        out,
        r#"<g transform="translate({} {}) scale({s})" fill="none" stroke="{BROKEN_STROKE}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M3 5h8l-2 6 3 2-1 6H3z"/><path d="M15 5h6v14h-7l1-5-3-2z"/><circle cx="7" cy="9" r="1.5"/></g>"#,
        r.center().x - size / 2.0,
        r.center().y - size / 2.0,
    )
}

fn write_label(out: &mut String, label: &Label, ink: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{}" font-weight="500" letter-spacing="0.5" fill="{ink}" fill-opacity="{}">{}</text>"#,
        label.anchor.x,
        label.anchor.y,
        label.font_size,
        label.opacity,
        escape_xml(&label.text),
    )
}

fn write_cutout(out: &mut String, cutout: &Cutout) -> fmt::Result {
    match *cutout {
        Cutout::HolePunch { center, radius } => writeln!(
            out,
            r##"<circle cx="{}" cy="{}" r="{radius}" fill="#000000"/>"##,
            center.x, center.y,
        ),
        Cutout::Notch { rect, radius } => {
            // Square top edge, rounded bottom corners.
            let Rect { x0, y0, x1, y1 } = rect;
            let r = radius.min(rect.width() / 2.0).min(rect.height());
            writeln!(
                out,
                r##"<path d="M{x0} {y0}H{x1}V{}A{r} {r} 0 0 1 {} {y1}H{}A{r} {r} 0 0 1 {x0} {}Z" fill="#000000"/>"##,
                y1 - r,
                x1 - r,
                x0 + r,
                y1 - r,
            )
        }
    }
}

/// Returns a closure that emits the slot outline with extra attributes.
fn shape_element(r: Rect, shape: IconShape) -> impl Fn(&str) -> String {
    move |attrs: &str| match shape {
        IconShape::Circle => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {attrs}/>"#,
            r.center().x,
            r.center().y,
            r.width().min(r.height()) / 2.0,
        ),
        IconShape::RoundedSquare { radius } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" {attrs}/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
        ),
    }
}

/// A paint value safe to drop into an attribute.
///
/// Hex colors are normalized; CSS keywords and functional notations pass through;
/// anything else becomes `fallback`.
pub(crate) fn safe_paint<'a>(color: &'a str, fallback: &'a str) -> Cow<'a, str> {
    if let Some(rgb) = Rgb8::parse_hex(color) {
        return Cow::Owned(rgb.to_hex());
    }
    let plausible = !color.is_empty()
        && color.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-')
        });
    if plausible {
        Cow::Borrowed(color)
    } else {
        Cow::Borrowed(fallback)
    }
}

/// Escape markup characters and replace code points XML 1.0 cannot carry with U+FFFD.
pub(crate) fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c))
    {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}')
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
