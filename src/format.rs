//! Display formatting for currency, ratios and missing values

/// Placeholder shown wherever a KPI or milestone is unavailable
pub const MISSING: &str = "—";

/// Format as whole US dollars with thousands separators, e.g. `-$1,234`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Format with at most two decimals and no trailing zeros, e.g. `2.5`
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) if rest != "0" => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", trimmed),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };
    match frac {
        Some(f) => format!("{}{}.{}", sign, group_thousands(whole), f),
        None => format!("{}{}", sign, group_thousands(whole)),
    }
}

/// Format a fraction as a percentage with at most two decimals, e.g. `0.125` -> `12.5%`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{}%", format_number(value * 100.0))
}

/// Render an optional value, falling back to the missing placeholder
pub fn format_optional<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| MISSING.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
