use super::*;

fn yiq(r: u32, g: u32, b: u32) -> u32 {
    299 * r + 587 * g + 114 * b
}

#[test]
fn light_and_dark_backgrounds() {
    assert_eq!(resolve_contrast(Some("#ffffff")), Contrast::Black);
    assert_eq!(resolve_contrast(Some("#000000")), Contrast::White);
    assert_eq!(resolve_contrast(Some("#0C1427")), Contrast::White);
    assert_eq!(resolve_contrast(Some("#ffeb3b")), Contrast::Black);
    assert_eq!(resolve_contrast(Some("3367d6")), Contrast::White);
}

#[test]
fn threshold_is_inclusive_on_black_side() {
    // 128 * 1000 = 128000 exactly.
    assert_eq!(yiq(128, 128, 128), 128_000);
    assert_eq!(resolve_contrast(Some("#808080")), Contrast::Black);

    assert_eq!(yiq(127, 127, 127), 127_000);
    assert_eq!(resolve_contrast(Some("#7f7f7f")), Contrast::White);
}

#[test]
fn agrees_with_formula_over_a_sweep() {
    for r in (0u32..=255).step_by(15) {
        for g in (0u32..=255).step_by(17) {
            for b in (0u32..=255).step_by(51) {
                let hex = format!("#{r:02x}{g:02x}{b:02x}");
                let y = f64::from(yiq(r, g, b)) / 1000.0;
                let want = if y >= 128.0 {
                    Contrast::Black
                } else {
                    Contrast::White
                };
                assert_eq!(resolve_contrast(Some(&hex)), want, "{hex}");
            }
        }
    }
}

#[test]
fn malformed_input_defaults_to_black() {
    assert_eq!(resolve_contrast(None), Contrast::Black);
    for bad in ["", "#", "#12", "#1234", "#12345", "#1234567", "#zzz", "#00000g", "black"] {
        assert_eq!(resolve_contrast(Some(bad)), Contrast::Black, "{bad:?}");
    }
}

#[test]
fn shorthand_matches_doubled_form() {
    for (short, long) in [("#abc", "#aabbcc"), ("#123", "#112233"), ("f09", "ff0099")] {
        assert_eq!(resolve_contrast(Some(short)), resolve_contrast(Some(long)));
    }
}

#[test]
fn serializes_lowercase() {
    assert_eq!(serde_json::to_value(Contrast::White).unwrap(), "white");
    assert_eq!(Contrast::Black.to_string(), "black");
    assert_eq!(Contrast::White.as_hex(), "#ffffff");
}
