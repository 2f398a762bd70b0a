use super::*;
use crate::display::DisplayFields;
use crate::frame::device::DeviceKind;
use crate::manifest::model::{Manifest, ManifestIcon};

fn sheet(manifest: &Manifest, devices: &[DeviceKind], icon: &ResolvedIcon) -> String {
    let fields = DisplayFields::derive(manifest, None);
    let frames: Vec<_> = devices
        .iter()
        .map(|&d| FrameLayout::build(d, &fields))
        .collect();
    sheet_svg(&frames, icon, &RenderOpts::default()).unwrap()
}

fn parses(svg: &str) {
    usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap();
}

#[test]
fn replaces_characters_xml_cannot_carry() {
    assert_eq!(escape_xml("tab\tline\n"), "tab\tline\n");
    assert_eq!(escape_xml("a\u{0}b\u{1f}c"), "a\u{fffd}b\u{fffd}c");
    assert_eq!(escape_xml("\u{fffe}\u{ffff}&"), "\u{fffd}\u{fffd}&amp;");
    assert!(matches!(escape_xml("plain \u{1f600}"), Cow::Borrowed(_)));
}

#[test]
fn escapes_app_name() {
    let m = Manifest {
        name: Some(r#"Tom & Jerry's <"Cartoons">"#.to_owned()),
        ..Manifest::default()
    };
    let svg = sheet(&m, &[DeviceKind::Android], &ResolvedIcon::Absent);
    assert!(svg.contains("Tom &amp; Jerry&apos;s &lt;&quot;Cartoons&quot;&gt;"));
    parses(&svg);
}

#[test]
fn android_has_name_ios_does_not() {
    let m = Manifest {
        name: Some("Weather".to_owned()),
        ..Manifest::default()
    };
    let android = sheet(&m, &[DeviceKind::Android], &ResolvedIcon::Absent);
    let ios = sheet(&m, &[DeviceKind::Ios], &ResolvedIcon::Absent);
    assert!(android.contains(">Weather</text>"));
    assert!(!ios.contains("Weather"));
    assert!(android.contains(">12:00</text>"));
    assert!(ios.contains(">9:41</text>"));
}

#[test]
fn missing_icon_draws_placeholder_block_not_image() {
    let svg = sheet(&Manifest::default(), &DeviceKind::ALL, &ResolvedIcon::Absent);
    assert!(svg.contains(">No Icon</text>"));
    assert!(!svg.contains("<image"));
    parses(&svg);
}

#[test]
fn image_and_broken_icons() {
    let m = Manifest {
        icons: vec![ManifestIcon::new("a.png", None)],
        ..Manifest::default()
    };
    let href = format!(
        "data:image/svg+xml;base64,{}",
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            crate::assets::icon_source::PLACEHOLDER_ICON_SVG
        )
    );
    let svg = sheet(&m, &[DeviceKind::Ios], &ResolvedIcon::Image { href: href.clone() });
    assert!(svg.contains(&href));
    assert!(svg.contains(r##"fill="#ffffff""##));
    parses(&svg);

    let broken = ResolvedIcon::Broken {
        reason: "missing".to_owned(),
    };
    let svg = sheet(&m, &[DeviceKind::Android], &broken);
    assert!(!svg.contains("<image"));
    assert!(svg.contains(BROKEN_STROKE));
    parses(&svg);
}

#[test]
fn sheet_size_accounts_for_gap_and_margin() {
    let svg = sheet(&Manifest::default(), &DeviceKind::ALL, &ResolvedIcon::Absent);
    // 2 * 300 + 48 + 2 * 32 = 712; 600 + 64 = 664.
    assert!(svg.contains(r#"width="712" height="664""#));
    assert!(svg.contains(r#"id="android-0""#));
    assert!(svg.contains(r#"id="ios-1""#));
}

#[test]
fn paint_sanitizing() {
    assert_eq!(safe_paint("#ABC", "x"), "#aabbcc");
    assert_eq!(safe_paint("navy", "x"), "navy");
    assert_eq!(safe_paint("rgb(10, 20, 30)", "x"), "rgb(10, 20, 30)");
    assert_eq!(safe_paint(r#"red" onload="x"#, "#111827"), "#111827");
    assert_eq!(safe_paint("", "#111827"), "#111827");
}

#[test]
fn escape_passthrough_borrows() {
    assert!(matches!(escape_xml("plain"), Cow::Borrowed("plain")));
}
