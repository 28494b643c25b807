//! Display formatting for amounts. The model keeps exact values; rounding only happens here.

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn rate(value: f64) -> String {
    format!("{value:.4}")
}

/// Quantities print without trailing zeros: `2`, `0.5`, `1.25`.
pub fn quantity(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
