use kurbo::{Point, Rect, Size};
use serde::Serialize;

use crate::contrast::Contrast;
use crate::display::DisplayFields;
use crate::frame::device::{DeviceChrome, DeviceKind};
use crate::icon::IconRef;

const BEZEL_FILL: &str = "#1f2937";
const PLACEHOLDER_FILL: &str = "#e5e7eb";
const PLACEHOLDER_CAPTION: &str = "No Icon";
const PLACEHOLDER_CAPTION_FILL: &str = "#9ca3af";
const HOLE_PUNCH_RADIUS: f64 = 8.0;
const HOLE_PUNCH_TOP: f64 = 16.0;
const NOTCH_SIZE: Size = Size::new(128.0, 24.0);
const NOTCH_RADIUS: f64 = 16.0;
const LABEL_GAP: f64 = 24.0;
const LABEL_FONT_SIZE: f64 = 20.0;
const LABEL_LINE_HEIGHT: f64 = 28.0;
const LABEL_OPACITY: f64 = 0.9;
/// Space reserved under the Android icon column for the gesture bar.
const ANDROID_CONTENT_BOTTOM_PAD: f64 = 64.0;
const INDICATOR_HEIGHT: f64 = 4.0;
const INDICATOR_OPACITY: f64 = 0.5;

/// A status-bar icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusGlyph {
    /// Cellular signal bars.
    Signal,
    /// Wi-Fi fan.
    Wifi,
    /// Battery outline.
    Battery,
}

/// Camera cutout at the top of the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cutout {
    /// Round camera hole.
    HolePunch {
        /// Hole center.
        center: Point,
        /// Hole radius.
        radius: f64,
    },
    /// Notch hanging from the top edge, rounded at the bottom.
    Notch {
        /// Notch bounds.
        rect: Rect,
        /// Radius of the bottom corners.
        radius: f64,
    },
}

/// Clock and glyphs across the top of the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBar {
    /// Clock text.
    pub time: &'static str,
    /// Left end of the clock's baseline.
    pub time_origin: Point,
    /// Clock font size.
    pub font_size: f64,
    /// Clock font weight.
    pub font_weight: u16,
    /// Glyph boxes, left to right.
    pub glyphs: Vec<(StatusGlyph, Rect)>,
    /// Opacity applied to the whole bar.
    pub opacity: f64,
}

/// Outline the icon is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconShape {
    /// Inscribed circle.
    Circle,
    /// Rounded square with the given corner radius.
    RoundedSquare {
        /// Corner radius.
        radius: f64,
    },
}

/// What fills the icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "icon", rename_all = "snake_case")]
pub enum IconContent<'a> {
    /// An image to load. Never [`IconRef::None`].
    Image(IconRef<'a>),
    /// Neutral block with a caption, used when there is no icon at all.
    Placeholder {
        /// Block fill.
        fill: &'static str,
        /// Caption text.
        caption: &'static str,
        /// Caption color.
        caption_fill: &'static str,
    },
}

/// Where and how the icon is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSlot<'a> {
    /// Icon bounds.
    pub rect: Rect,
    /// Clip outline.
    pub shape: IconShape,
    /// Opaque fill drawn behind images, if any.
    pub backdrop: Option<&'static str>,
    /// Whether the slot casts a drop shadow.
    pub shadow: bool,
    /// Slot contents.
    pub content: IconContent<'a>,
}

/// App name under the icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    /// Text to show.
    pub text: String,
    /// Center of the baseline.
    pub anchor: Point,
    /// Font size.
    pub font_size: f64,
    /// Text opacity.
    pub opacity: f64,
}

/// Gesture bar / home indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pill {
    /// Pill bounds.
    pub rect: Rect,
    /// Fill color.
    pub fill: &'static str,
    /// Fill opacity.
    pub opacity: f64,
}

/// A fully positioned device mock, in the device's own coordinate space.
///
/// Built from [`DisplayFields`] alone; renderers only draw what is in here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameLayout<'a> {
    /// Device variant.
    pub device: DeviceKind,
    /// Outer size, bezel included.
    pub size: Size,
    /// Bezel color.
    pub bezel_fill: &'static str,
    /// Outer corner radius.
    pub corner_radius: f64,
    /// Screen bounds.
    pub screen: Rect,
    /// Screen corner radius.
    pub screen_radius: f64,
    /// Screen background, as given by the manifest.
    pub background: String,
    /// Ink for text and glyphs on the screen.
    pub ink: Contrast,
    /// Camera cutout.
    pub cutout: Cutout,
    /// Status bar.
    pub status_bar: StatusBar,
    /// Icon slot.
    pub icon: IconSlot<'a>,
    /// App name label, Android only.
    pub label: Option<Label>,
    /// Gesture bar / home indicator.
    pub indicator: Pill,
}

impl<'a> FrameLayout<'a> {
    /// Lay out `device` showing `fields`.
    pub fn build(device: DeviceKind, fields: &DisplayFields<'a>) -> Self {
        let chrome = device.chrome();
        let size = Size::new(chrome.width, chrome.height);
        let screen = Rect::new(
            chrome.bezel,
            chrome.bezel,
            chrome.width - chrome.bezel,
            chrome.height - chrome.bezel,
        );

        let status_bar = status_bar(chrome, screen);
        let icon_rect = icon_rect(chrome, screen, status_bar_height(chrome));

        let label = chrome.shows_name.then(|| Label {
            text: fields.app_name.clone(),
            anchor: Point::new(
                screen.center().x,
                icon_rect.y1 + LABEL_GAP + (LABEL_LINE_HEIGHT + LABEL_FONT_SIZE) / 2.0 - 2.0,
            ),
            font_size: LABEL_FONT_SIZE,
            opacity: LABEL_OPACITY,
        });

        Self {
            device,
            size,
            bezel_fill: BEZEL_FILL,
            corner_radius: chrome.corner_radius,
            screen,
            screen_radius: (chrome.corner_radius - chrome.bezel).max(0.0),
            background: fields.background_color.clone(),
            ink: fields.foreground,
            cutout: cutout(device, screen),
            status_bar,
            icon: IconSlot {
                rect: icon_rect,
                shape: match chrome.icon_corner_radius {
                    Some(radius) => IconShape::RoundedSquare { radius },
                    None => IconShape::Circle,
                },
                backdrop: chrome.icon_backdrop.then_some("#ffffff"),
                shadow: chrome.icon_backdrop,
                content: icon_content(fields.icon),
            },
            label,
            indicator: Pill {
                rect: Rect::from_center_size(
                    Point::new(
                        screen.center().x,
                        screen.y1 - chrome.indicator_bottom - INDICATOR_HEIGHT / 2.0,
                    ),
                    Size::new(chrome.indicator_width, INDICATOR_HEIGHT),
                ),
                fill: chrome.indicator_fill,
                opacity: INDICATOR_OPACITY,
            },
        }
    }
}

fn icon_content(icon: IconRef<'_>) -> IconContent<'_> {
    match icon {
        IconRef::None => IconContent::Placeholder {
            fill: PLACEHOLDER_FILL,
            caption: PLACEHOLDER_CAPTION,
            caption_fill: PLACEHOLDER_CAPTION_FILL,
        },
        other => IconContent::Image(other),
    }
}

fn line_height(font_size: f64) -> f64 {
    (font_size * 4.0 / 3.0).round()
}

fn status_bar_height(chrome: &DeviceChrome) -> f64 {
    chrome.status_inset_y * 2.0 + line_height(chrome.status_font_size)
}

fn status_bar(chrome: &DeviceChrome, screen: Rect) -> StatusBar {
    let top = screen.y0 + chrome.status_inset_y;
    let line = line_height(chrome.status_font_size);

    let n = chrome.status_glyphs.len() as f64;
    let run = n * chrome.status_glyph_size + (n - 1.0).max(0.0) * chrome.status_glyph_gap;
    let mut x = screen.x1 - chrome.status_inset_x - run;
    let y = top + (line - chrome.status_glyph_size) / 2.0;

    let glyphs = chrome
        .status_glyphs
        .iter()
        .map(|&glyph| {
            let rect = Rect::new(
                x,
                y,
                x + chrome.status_glyph_size,
                y + chrome.status_glyph_size,
            );
            x += chrome.status_glyph_size + chrome.status_glyph_gap;
            (glyph, rect)
        })
        .collect();

    StatusBar {
        time: chrome.status_time,
        time_origin: Point::new(
            screen.x0 + chrome.status_inset_x,
            top + (line + chrome.status_font_size) / 2.0 - 1.0,
        ),
        font_size: chrome.status_font_size,
        font_weight: chrome.status_font_weight,
        glyphs,
        opacity: chrome.status_opacity,
    }
}

/// Android stacks icon and name in the area between the status bar and the gesture
/// pad; iOS centers the icon on the whole screen.
fn icon_rect(chrome: &DeviceChrome, screen: Rect, status_height: f64) -> Rect {
    let icon = Size::new(chrome.icon_size, chrome.icon_size);
    let center_x = screen.center().x;

    if chrome.shows_name {
        let area_top = screen.y0 + status_height;
        let area_bottom = screen.y1 - ANDROID_CONTENT_BOTTOM_PAD;
        let column = chrome.icon_size + LABEL_GAP + LABEL_LINE_HEIGHT;
        let top = (area_top + area_bottom) / 2.0 - column / 2.0;
        Rect::from_origin_size(Point::new(center_x - icon.width / 2.0, top), icon)
    } else {
        Rect::from_center_size(screen.center(), icon)
    }
}

fn cutout(device: DeviceKind, screen: Rect) -> Cutout {
    match device {
        DeviceKind::Android => Cutout::HolePunch {
            center: Point::new(
                screen.center().x,
                screen.y0 + HOLE_PUNCH_TOP + HOLE_PUNCH_RADIUS,
            ),
            radius: HOLE_PUNCH_RADIUS,
        },
        DeviceKind::Ios => Cutout::Notch {
            rect: Rect::from_origin_size(
                Point::new(screen.center().x - NOTCH_SIZE.width / 2.0, screen.y0),
                NOTCH_SIZE,
            ),
            radius: NOTCH_RADIUS,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/layout.rs"]
mod tests;
