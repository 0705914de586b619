//! Year-over-year variation display.

use serde::{Deserialize, Serialize};

use crate::format::{format_fixed, MISSING};

/// Direction glyph shown next to a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Up,
    Down,
}

impl Glyph {
    /// Arrow used on the dashboard.
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Up => "▲",
            Glyph::Down => "▼",
        }
    }
}

/// A signed variation split into direction and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub glyph: Glyph,
    /// Absolute percentage change
    pub magnitude_percent: f64,
}

impl Variation {
    /// Magnitude with one decimal and a decimal comma (`"3,4"`).
    pub fn magnitude_text(&self) -> String {
        format_fixed(self.magnitude_percent, 1)
    }

    /// Full label, e.g. `"▼ 3,4% vs ano anterior"`.
    pub fn describe(&self) -> String {
        format!(
            "{} {}% vs ano anterior",
            self.glyph.symbol(),
            self.magnitude_text()
        )
    }
}

/// Split a percent change into glyph and magnitude. Zero counts as up.
pub fn format_variation(value: f64) -> Variation {
    let glyph = if value >= 0.0 { Glyph::Up } else { Glyph::Down };
    Variation {
        glyph,
        magnitude_percent: value.abs(),
    }
}

/// Label for an optional percent change.
pub fn describe_change(percent_change: Option<f64>) -> String {
    match percent_change {
        Some(value) => format_variation(value).describe(),
        None => format!("{} vs ano anterior", MISSING),
    }
}

/// Sign class for colouring a variation (`positivo` / `negativo`).
pub fn sign_class(percent_change: Option<f64>) -> Option<&'static str> {
    match percent_change {
        Some(v) if v > 0.0 => Some("positivo"),
        Some(v) if v < 0.0 => Some("negativo"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_variation() {
        let v = format_variation(-3.4);
        assert_eq!(v.glyph, Glyph::Down);
        assert_eq!(v.magnitude_text(), "3,4");
        assert_eq!(v.describe(), "▼ 3,4% vs ano anterior");
    }

    #[test]
    fn test_zero_is_up() {
        let v = format_variation(0.0);
        assert_eq!(v.glyph, Glyph::Up);
        assert_eq!(v.magnitude_text(), "0,0");

        let v = format_variation(-0.0);
        assert_eq!(v.glyph, Glyph::Up);
        assert_eq!(v.magnitude_text(), "0,0");
    }

    #[test]
    fn test_missing_change() {
        assert_eq!(describe_change(None), "-- vs ano anterior");
        assert_eq!(describe_change(Some(12.5)), "▲ 12,5% vs ano anterior");
        assert_eq!(sign_class(None), None);
        assert_eq!(sign_class(Some(0.0)), None);
        assert_eq!(sign_class(Some(1.0)), Some("positivo"));
        assert_eq!(sign_class(Some(-1.0)), Some("negativo"));
    }
}
