//! Brazilian Portuguese (pt-BR) number formatting.
//!
//! Decimal comma, `.` thousands separator, `R$` currency prefix.

/// Placeholder shown for values that cannot be displayed.
pub const MISSING: &str = "--";

/// Currency symbol for BRL.
pub const CURRENCY_SYMBOL: &str = "R$";

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn is_visible_negative(value: f64, rendered: &str) -> bool {
    value < 0.0 && rendered.chars().any(|c| matches!(c, '1'..='9'))
}

/// Render with a fixed number of decimals and a decimal comma, no grouping.
///
/// `format_fixed(3.45, 1)` → `"3,5"` (rounding as `format!` does).
pub fn format_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rendered = format!("{:.*}", places, value.abs()).replace('.', ",");
    if is_visible_negative(value, &rendered) {
        format!("-{}", rendered)
    } else {
        rendered
    }
}

/// Render with `places` decimals, `.` grouping and a decimal comma.
pub fn format_decimal(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rendered = format!("{:.*}", places, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::new();
    if is_visible_negative(value, &rendered) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Whole number with thousands grouping: `130000.4` → `"130.000"`.
pub fn format_number(value: f64) -> String {
    format_decimal(value, 0)
}

/// Integer count with thousands grouping: `1234` → `"1.234"`.
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// BRL amount: `1324746.56` → `"R$ 1.324.746,56"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let amount = format_decimal(value.abs(), 2);
    if is_visible_negative(value, &amount) {
        format!("-{} {}", CURRENCY_SYMBOL, amount)
    } else {
        format!("{} {}", CURRENCY_SYMBOL, amount)
    }
}

/// Percentage with one decimal: `86.666` → `"86,7%"`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{}%", format_fixed(value, 1))
}

/// Parse a number as typed in Brazilian spreadsheets.
///
/// Accepts `"R$ 1.234.567,89"`, `"1234,5"` and `"1234.5"`. Blank or
/// unparseable text reads as `0.0`.
pub fn parse_brl_number(text: &str) -> f64 {
    let cleaned = text.trim().replace(CURRENCY_SYMBOL, "");
    let cleaned = cleaned.trim();

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned.to_string()
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
