use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;

use super::*;
use crate::icon::UploadedIcon;

fn encode(format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 90, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_icon_source").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn none_and_placeholder() {
    assert_eq!(resolve_icon(IconRef::None, Path::new(".")), ResolvedIcon::Absent);
    match resolve_icon(IconRef::Placeholder, Path::new(".")) {
        ResolvedIcon::Image { href } => assert!(href.starts_with("data:image/svg+xml;base64,")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn placeholder_svg_parses() {
    usvg::Tree::from_str(PLACEHOLDER_ICON_SVG, &usvg::Options::default()).unwrap();
}

#[test]
fn uploaded_png_is_embedded_verbatim() {
    let png = encode(image::ImageFormat::Png);
    let up = UploadedIcon::new("logo.png", png.clone()).unwrap();
    let ResolvedIcon::Image { href } = resolve_icon(IconRef::Uploaded(&up), Path::new(".")) else {
        panic!("png upload should embed");
    };
    assert_eq!(href, format!("data:image/png;base64,{}", BASE64.encode(&png)));
}

#[test]
fn uploaded_bmp_is_reencoded_as_png() {
    let bmp = encode(image::ImageFormat::Bmp);
    let href = embed_bytes(&bmp).unwrap();
    assert!(href.starts_with("data:image/png;base64,"));
}

#[test]
fn uploaded_svg_is_embedded() {
    let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8"/></svg>"#;
    let href = embed_bytes(svg).unwrap();
    assert!(href.starts_with("data:image/svg+xml;base64,"));
}

#[test]
fn garbage_upload_is_broken_not_an_error() {
    let up = UploadedIcon::new("notes.txt", b"hello, world".to_vec()).unwrap();
    assert!(matches!(
        resolve_icon(IconRef::Uploaded(&up), Path::new(".")),
        ResolvedIcon::Broken { .. }
    ));
}

#[test]
fn local_url_resolves_against_resources_dir() {
    let dir = scratch_dir("local");
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    std::fs::write(dir.join("icons/app-192.png"), encode(image::ImageFormat::Png)).unwrap();

    for src in ["/icons/app-192.png", "icons/app-192.png", "./icons/app-192.png?v=3"] {
        match resolve_icon(IconRef::Url(src), &dir) {
            ResolvedIcon::Image { href } => assert!(href.starts_with("data:image/png;base64,")),
            other => panic!("{src}: unexpected {other:?}"),
        }
    }
}

#[test]
fn missing_or_remote_url_is_broken() {
    let dir = scratch_dir("missing");
    for src in ["/nope.png", "https://example.com/icon.png", "//cdn.example.com/i.png", "  "] {
        assert!(
            matches!(resolve_icon(IconRef::Url(src), &dir), ResolvedIcon::Broken { .. }),
            "{src}"
        );
    }
}

#[test]
fn data_url_passes_through() {
    let src = "data:image/png;base64,AAAA";
    assert_eq!(
        resolve_icon(IconRef::Url(src), Path::new(".")),
        ResolvedIcon::Image {
            href: src.to_owned()
        }
    );
}

#[test]
fn local_icon_path_mapping() {
    let root = Path::new("/srv/app");
    assert_eq!(local_icon_path("/a/b.png", root), root.join("a/b.png"));
    assert_eq!(local_icon_path("b.png#frag", root), root.join("b.png"));
    assert_eq!(
        local_icon_path("file:///tmp/x.png", root),
        PathBuf::from("/tmp/x.png")
    );
}
