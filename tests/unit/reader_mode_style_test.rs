//! Unit tests for reader mode style encoding and theme resolution.

use browserstore::types::reader::{
    ReaderModeFontSize, ReaderModeFontType, ReaderModeStyle, ReaderModeTheme,
};
use browserstore::types::theme::AppTheme;
use rstest::rstest;
use serde_json::{json, Map, Value};

fn dict(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test dictionary must be an object")
}

fn size(raw: i64) -> ReaderModeFontSize {
    ReaderModeFontSize::new(raw).unwrap()
}

#[test]
fn test_init_with_properties() {
    let style = ReaderModeStyle::new(ReaderModeTheme::Dark, ReaderModeFontType::SansSerif, size(1));
    assert_eq!(style.theme, ReaderModeTheme::Dark);
    assert_eq!(style.font_type, ReaderModeFontType::SansSerif);
    assert_eq!(style.font_size, size(1));
}

#[test]
fn test_encoding_as_dictionary() {
    let style = ReaderModeStyle::new(ReaderModeTheme::Dark, ReaderModeFontType::SansSerif, size(1));
    let encoded = style.encode_as_dictionary();
    assert_eq!(encoded.get("theme").and_then(Value::as_str), Some("dark"));
    assert_eq!(encoded.get("fontType").and_then(Value::as_str), Some("sans-serif"));
    assert_eq!(encoded.get("fontSize").and_then(Value::as_i64), Some(1));
    assert_eq!(encoded.len(), 3);
}

#[test]
fn test_init_with_dictionary() {
    let style = ReaderModeStyle::from_dictionary(&dict(json!({
        "theme": "dark",
        "fontType": "sans-serif",
        "fontSize": 1
    })))
    .unwrap();
    assert_eq!(style.theme, ReaderModeTheme::Dark);
    assert_eq!(style.font_type, ReaderModeFontType::SansSerif);
    assert_eq!(style.font_size, size(1));
}

#[rstest]
#[case::empty(json!({}))]
#[case::wrong_key(json!({"wrong": 1, "fontType": "sans-serif", "fontSize": 1}))]
#[case::unknown_theme(json!({"theme": "neon", "fontType": "serif", "fontSize": 5}))]
#[case::unknown_font(json!({"theme": "light", "fontType": "comic", "fontSize": 5}))]
#[case::size_as_string(json!({"theme": "light", "fontType": "serif", "fontSize": "5"}))]
#[case::size_too_large(json!({"theme": "light", "fontType": "serif", "fontSize": 14}))]
#[case::size_zero(json!({"theme": "light", "fontType": "serif", "fontSize": 0}))]
#[case::theme_as_number(json!({"theme": 1, "fontType": "serif", "fontSize": 5}))]
fn test_init_with_bad_dictionary_fails(#[case] value: Value) {
    assert!(ReaderModeStyle::from_dictionary(&dict(value)).is_none());
}

#[test]
fn test_encode_is_json_of_dictionary() {
    let style = ReaderModeStyle::new(ReaderModeTheme::Sepia, ReaderModeFontType::Serif, size(7));
    let parsed: Value = serde_json::from_str(&style.encode()).unwrap();
    assert_eq!(parsed, json!({"theme": "sepia", "fontType": "serif", "fontSize": 7}));
}

#[test]
fn test_default_style() {
    let style = ReaderModeStyle::default();
    assert_eq!(style.theme, ReaderModeTheme::Light);
    assert_eq!(style.font_type, ReaderModeFontType::SansSerif);
    assert_eq!(style.font_size.raw_value(), 5);
}

// === ReaderModeTheme ===

#[rstest]
#[case::default_light(AppTheme::Light, None, ReaderModeTheme::Light)]
#[case::dark_app_overrides_light(AppTheme::Dark, Some(ReaderModeTheme::Light), ReaderModeTheme::Dark)]
#[case::light_app_keeps_sepia(AppTheme::Light, Some(ReaderModeTheme::Sepia), ReaderModeTheme::Sepia)]
#[case::dark_app_overrides_sepia(AppTheme::Dark, Some(ReaderModeTheme::Sepia), ReaderModeTheme::Dark)]
#[case::dark_app_default(AppTheme::Dark, None, ReaderModeTheme::Dark)]
#[case::light_app_keeps_dark(AppTheme::Light, Some(ReaderModeTheme::Dark), ReaderModeTheme::Dark)]
fn test_preferred_theme(
    #[case] app: AppTheme,
    #[case] requested: Option<ReaderModeTheme>,
    #[case] expected: ReaderModeTheme,
) {
    assert_eq!(ReaderModeTheme::preferred_theme(requested, app), expected);
}

#[test]
fn test_preferred_color_theme_changes_from_light_to_dark() {
    let mut style = ReaderModeStyle::new(ReaderModeTheme::Light, ReaderModeFontType::SansSerif, size(1));
    assert_eq!(style.theme, ReaderModeTheme::Light);
    style.ensure_preferred_color_theme_if_needed(AppTheme::Dark);
    assert_eq!(style.theme, ReaderModeTheme::Dark);
}

// === Fonts ===

#[test]
fn test_font_size_steps_clamp() {
    assert!(ReaderModeFontSize::SMALLEST.is_smallest());
    assert_eq!(ReaderModeFontSize::SMALLEST.smaller(), ReaderModeFontSize::SMALLEST);
    assert_eq!(ReaderModeFontSize::LARGEST.bigger(), ReaderModeFontSize::LARGEST);
    assert_eq!(size(5).bigger(), size(6));
    assert_eq!(size(5).smaller(), size(4));
    assert!(ReaderModeFontSize::new(14).is_none());
}

#[test]
fn test_font_family_matching() {
    assert!(ReaderModeFontType::Serif.is_same_family(ReaderModeFontType::SerifBold));
    assert!(ReaderModeFontType::SansSerifBold.is_same_family(ReaderModeFontType::SansSerif));
    assert!(!ReaderModeFontType::Serif.is_same_family(ReaderModeFontType::SansSerif));
}
