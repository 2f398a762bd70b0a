use super::*;
use crate::icon::UploadedIcon;
use crate::manifest::model::Manifest;

#[test]
fn default_opts_are_valid() {
    RenderOpts::default().validate().unwrap();
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = RenderOpts {
        scale: -1.0,
        ..RenderOpts::default()
    };
    assert!(opts.validate().is_err());

    let opts = RenderOpts {
        gap: f64::NAN,
        ..RenderOpts::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn empty_device_list_is_rejected() {
    let m = Manifest::default();
    let fields = DisplayFields::derive(&m, None);
    assert!(render_svg(&[], &fields, &RenderOpts::default()).is_err());
}

#[test]
fn png_has_sheet_dimensions() {
    let m = Manifest::bundled_example();
    let fields = DisplayFields::derive(&m, None);
    let opts = RenderOpts {
        scale: 0.5,
        ..RenderOpts::default()
    };
    let img = render_rgba(&[DeviceKind::Android], &fields, &opts).unwrap();
    // (300 + 64) x (600 + 64) at half scale.
    assert_eq!((img.width, img.height), (182, 332));
}

#[test]
fn screen_is_painted_with_manifest_background() {
    let m = Manifest {
        background_color: Some("#ff8800".to_owned()),
        ..Manifest::default()
    };
    let fields = DisplayFields::derive(&m, None);
    let opts = RenderOpts {
        margin: 0.0,
        backdrop: None,
        ..RenderOpts::default()
    };
    let img = render_rgba(&[DeviceKind::Ios], &fields, &opts).unwrap();
    // Inside the screen, between the status bar and the icon.
    assert_eq!(img.pixel(40, 150), Some([0xff, 0x88, 0x00, 0xff]));
}

fn solid_png(rgba: [u8; 4]) -> Vec<u8> {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(8, 8, image::Rgba(rgba)))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    png
}

fn bare_opts() -> RenderOpts {
    RenderOpts {
        margin: 0.0,
        backdrop: None,
        ..RenderOpts::default()
    }
}

#[test]
fn upload_is_embedded_in_svg() {
    let up = UploadedIcon::new("blue.png", solid_png([0, 0, 255, 255])).unwrap();
    let m = Manifest::default();
    let fields = DisplayFields::derive(&m, Some(&up));
    let svg = render_svg(&[DeviceKind::Android], &fields, &RenderOpts::default()).unwrap();
    assert!(svg.contains("data:image/png;base64,"));
}

#[test]
fn uploaded_png_is_drawn_in_icon_slot() {
    let up = UploadedIcon::new("blue.png", solid_png([0, 0, 255, 255])).unwrap();
    let m = Manifest::bundled_example();
    let fields = DisplayFields::derive(&m, Some(&up));
    let img = render_rgba(&[DeviceKind::Ios], &fields, &bare_opts()).unwrap();
    // iOS centers the icon on the screen.
    assert_eq!(img.pixel(150, 300), Some([0, 0, 255, 255]));
}

#[test]
fn uploaded_jpeg_is_drawn_in_icon_slot() {
    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(16, 16, image::Rgb([255, 0, 0])))
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();
    let up = UploadedIcon::new("red.jpg", jpeg).unwrap();
    let m = Manifest::default();
    let fields = DisplayFields::derive(&m, Some(&up));
    let img = render_rgba(&[DeviceKind::Ios], &fields, &bare_opts()).unwrap();
    let [r, g, b, a] = img.pixel(150, 300).unwrap();
    assert!(r > 240 && g < 16 && b < 16 && a == 255, "{:?}", [r, g, b, a]);
}

#[test]
fn control_characters_in_name_still_render() {
    let m = Manifest {
        name: Some("A\u{1}B\u{fffe}".to_owned()),
        ..Manifest::default()
    };
    let fields = DisplayFields::derive(&m, None);
    let svg = render_svg(&[DeviceKind::Android], &fields, &RenderOpts::default()).unwrap();
    assert!(svg.contains("A\u{fffd}B\u{fffd}"));
    let img = render_rgba(&[DeviceKind::Android], &fields, &RenderOpts::default()).unwrap();
    assert_eq!((img.width, img.height), (364, 664));
}
