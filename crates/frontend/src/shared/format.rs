//! Display formatting for numbers, amounts and free text.
//!
//! Missing values render as `-` everywhere.

pub const MISSING: &str = "-";

/// Insert `,` every three digits of the integer part.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// `1234567.891` -> `1,234,567.891`; at most three decimals, trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    group_thousands(trimmed)
}

pub fn format_count(value: i64) -> String {
    group_thousands(&value.to_string())
}

/// Whole won with a `원` suffix.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return MISSING.to_string();
    }
    format!("{}원", group_thousands(&format!("{:.0}", amount)))
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{:.*}%", decimals, value)
}

/// Apply `format` to a present value, `-` otherwise.
pub fn or_missing<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

/// Cut `text` to `max_chars` characters and append `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.trim().is_empty() {
        return MISSING.to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
