//! Display formatting for raw analysis values.
//!
//! All functions are pure and total: missing or unparsable input maps to a
//! placeholder (`"N/A"` or `"Unknown"`) instead of an error.

use chrono::{DateTime, Utc};

use super::constants::{PRICE_EXPONENTIAL_BELOW, PRICE_MAX_FRACTION_DIGITS};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";

/// `$1.23M`, `$4.5K`, `$999.00`, or `N/A`
pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v >= 1_000_000.0 {
                format!("${:.2}M", round_half_away(v / 1_000_000.0, 2))
            } else if v >= 1_000.0 {
                format!("${:.1}K", round_half_away(v / 1_000.0, 1))
            } else {
                format!("${:.2}", round_half_away(v, 2))
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Share with one decimal, e.g. `25.0%`
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", round_half_away(v, 1)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Signed change with one decimal, e.g. `+3.2%` / `-12.0%`
pub fn format_change_pct(value: f64) -> String {
    // -0.0 would otherwise print as "-0.0"
    let v = if value == 0.0 { 0.0 } else { value };
    let sign = if v >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, round_half_away(v, 1))
}

/// Tax as sent by the service (`5%`, `12.5%`) or `N/A`
pub fn format_tax(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `0x1234...abcd`. Strings of 10 chars or fewer are returned as-is.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// `2y 15d old` above a year, `42 days old` otherwise
pub fn format_age(days: i64) -> String {
    if days > 365 {
        format!("{}y {}d old", days / 365, days % 365)
    } else {
        format!("{} days old", days)
    }
}

/// USD price from its decimal string. Sub-cent prices use exponential
/// notation (`$1.23e-7`), others are grouped with up to 6 fraction digits.
pub fn format_price(raw: &str) -> String {
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if value < PRICE_EXPONENTIAL_BELOW {
        format!("${}", to_exponential(value, 2))
    } else {
        format!("${}", localize(value, PRICE_MAX_FRACTION_DIGITS))
    }
}

/// Holder count grouped with thousands separators, `Unknown` when missing
/// or when no leading integer can be read.
pub fn format_holder_count(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN.to_string();
    };

    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return UNKNOWN.to_string();
    }

    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    let grouped = group_thousands(trimmed);
    if negative && trimmed != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `YYYY-MM-DD` (UTC) from epoch milliseconds
pub fn format_date_ms(epoch_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Insert `,` every three digits of an unsigned integer string
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round to `digits` fraction digits, ties away from zero.
///
/// `format!("{:.N}")` alone breaks exact ties to even (`1.25` → `1.2`).
fn round_half_away(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    // beyond 2^52 every f64 is already an integer at this scale
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / scale
}

/// Grouped decimal with at most `max_fraction` digits, trailing zeros dropped
fn localize(value: f64, max_fraction: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, round_half_away(value.abs(), max_fraction));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `1.23e-4` / `5.00e+0`, the exponent always signed
fn to_exponential(value: f64, fraction: usize) -> String {
    let formatted = format!("{:.*e}", fraction, value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}
