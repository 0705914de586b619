//! Unit tests for variation display.

use kpiboard::metrics::variation::{describe_change, format_variation, sign_class, Glyph};

#[test]
fn test_negative_variation_points_down() {
    let variation = format_variation(-3.4);
    assert_eq!(variation.glyph, Glyph::Down);
    assert_eq!(variation.magnitude_text(), "3,4");
}

#[test]
fn test_zero_variation_points_up() {
    let variation = format_variation(0.0);
    assert_eq!(variation.glyph, Glyph::Up);
    assert_eq!(variation.magnitude_text(), "0,0");
}

#[test]
fn test_positive_variation_label() {
    let variation = format_variation(17.0);
    assert_eq!(variation.glyph, Glyph::Up);
    assert_eq!(variation.describe(), "▲ 17,0% vs ano anterior");
    assert_eq!(sign_class(Some(17.0)), Some("positivo"));
}

#[test]
fn test_missing_variation_label() {
    assert_eq!(describe_change(None), "-- vs ano anterior");
    assert_eq!(sign_class(None), None);
}
