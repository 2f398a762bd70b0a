use super::*;
use crate::contrast::Contrast;
use crate::icon::IconRef;

const WEATHER: &str = r##"{
    "name": "Weather",
    "background_color": "#ffeb3b",
    "icons": [
        { "src": "a.png", "sizes": "96x96" },
        { "src": "b.png", "sizes": "192x192" }
    ]
}"##;

fn upload(name: &str) -> UploadedIcon {
    UploadedIcon::new(name, vec![1, 2, 3]).unwrap()
}

#[test]
fn derive_preview_success() {
    let preview = derive_preview(WEATHER, None).unwrap();
    let fields = preview.fields();
    assert_eq!(fields.app_name, "Weather");
    assert_eq!(fields.icon, IconRef::Url("b.png"));
    assert_eq!(fields.foreground, Contrast::Black);
}

#[test]
fn derive_preview_reports_parse_error() {
    let err = derive_preview("{ invalid", None).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn new_session_shows_bundled_example() {
    let s = PreviewSession::new();
    assert_eq!(s.raw_text(), BUNDLED_EXAMPLE_JSON);
    assert_eq!(s.error(), None);
    let f = s.display_fields();
    assert_eq!(f.app_name, "Lumen Prayer Bank");
    assert_eq!(f.icon, IconRef::Placeholder);
    assert_eq!(f.foreground, Contrast::White);
}

#[test]
fn failed_parse_keeps_previous_fields() {
    let mut s = PreviewSession::new();
    assert!(s.set_manifest_text(WEATHER));
    let before_app = s.display_fields().app_name;

    assert!(!s.set_manifest_text("{ invalid"));
    assert!(s.error().is_some());
    assert_eq!(s.raw_text(), "{ invalid");
    assert_eq!(s.display_fields().app_name, before_app);
    assert_eq!(s.display_fields().icon, IconRef::Url("b.png"));

    assert!(s.set_manifest_text("{}"));
    assert_eq!(s.error(), None);
    assert_eq!(s.display_fields().app_name, "App Name");
}

#[test]
fn upload_applies_to_stale_manifest() {
    let mut s = PreviewSession::new();
    s.set_manifest_text(WEATHER);
    s.set_manifest_text("[");
    s.upload_icon(upload("logo.png"));

    let f = s.display_fields();
    assert_eq!(f.app_name, "Weather");
    assert!(matches!(f.icon, IconRef::Uploaded(u) if u.file_name() == "logo.png"));
}

#[test]
fn replacing_and_clearing_upload() {
    let mut s = PreviewSession::new();
    s.upload_icon(upload("one.png"));
    s.upload_icon(upload("two.png"));
    assert_eq!(s.uploaded_file_name(), Some("two.png"));

    s.clear_icon();
    assert_eq!(s.uploaded_icon(), None);
    assert_eq!(s.display_fields().icon, IconRef::Placeholder);
}
