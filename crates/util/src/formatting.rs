//! Display formatting for metric values.
//!
//! Absent values always render as [`PLACEHOLDER`], never as zero.

use std::fmt::Display;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text shown for a value the backend did not report.
pub const PLACEHOLDER: &str = "-";

/// Render a present value verbatim, or the placeholder.
pub fn format_count<T: Display>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Render a memory size reported in megabytes, e.g. `1.25 MB`.
pub fn format_memory_mb(value: Option<f64>) -> String {
    match value {
        Some(megabytes) if megabytes.is_finite() => format!("{megabytes} MB"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render a `0.0..=1.0` fraction as a percentage with one decimal place.
///
/// ```rust
/// use stackwatch_util::format_hit_rate;
///
/// assert_eq!(format_hit_rate(Some(0.873)), "87.3%");
/// assert_eq!(format_hit_rate(Some(1.0)), "100.0%");
/// assert_eq!(format_hit_rate(None), "-");
/// ```
pub fn format_hit_rate(value: Option<f64>) -> String {
    match value {
        Some(fraction) if fraction.is_finite() => format!("{:.1}%", fraction * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Truncate a string to at most `max_width` display columns, appending `…`
/// when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for character in text.chars() {
        let width = UnicodeWidthChar::width(character).unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        truncated.push(character);
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_uses_one_decimal() {
        assert_eq!(format_hit_rate(Some(0.5)), "50.0%");
        assert_eq!(format_hit_rate(Some(0.0)), "0.0%");
        assert_eq!(format_hit_rate(Some(0.25)), "25.0%");
        assert_eq!(format_hit_rate(Some(0.999)), "99.9%");
        assert_eq!(format_hit_rate(Some(f64::NAN)), "-");
    }

    #[test]
    fn zero_is_a_value_not_a_placeholder() {
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count::<u64>(None), "-");
        assert_eq!(format_memory_mb(Some(0.0)), "0 MB");
        assert_eq!(format_memory_mb(Some(1.25)), "1.25 MB");
        assert_eq!(format_memory_mb(None), "-");
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_with_ellipsis("abcdef", 10), "abcdef");
        assert_eq!(truncate_with_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }
}
