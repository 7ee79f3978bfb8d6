//! Name/amount cleaning and won formatting.

/// Remove every whitespace character from an expense item name.
///
/// Covers ASCII whitespace as well as U+00A0 and U+3000, which show up in
/// hand-edited spreadsheets.
pub fn normalize_item_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Coerce a free-form amount string to a number.
///
/// Thousands separators and the `원` suffix are dropped, then every remaining
/// non-digit. Empty or digit-free input yields 0. Signs and decimal points
/// are non-digits too, so `"-1,500원"` cleans to 1500.
pub fn clean_amount(raw: &str) -> f64 {
    let digits: String = raw
        .replace(',', "")
        .replace('원', "")
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return 0.0;
    }
    digits.parse().unwrap_or(0.0)
}

/// Parse a numeric cell from a settlement file.
///
/// Accepts signs, decimals and thousands separators; returns `None` for
/// anything else so callers can decide on the neutral default.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', "");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `part / whole * 100` rounded to 2 decimals, or 0 when `whole` is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    // `+ 0.0` turns a rounded -0.0 into 0.0
    ((part / whole * 100.0) * 100.0).round() / 100.0 + 0.0
}

/// Render a percentage with two decimals and a `%` suffix.
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.2}%")
}

/// Thousands-separated integer rendering; fractional won are truncated toward zero.
pub fn format_won(amount: f64) -> String {
    let whole = amount.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
