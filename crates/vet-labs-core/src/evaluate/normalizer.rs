//! Lab value normalizer.
//!
//! Handles pt-BR formatted numbers as typed on the exam form:
//! - `"1.234,56"` → 1234.56 (dot groups thousands, comma is decimal)
//! - `"6,2"` → 6.2
//! - `"11.500"` → 11500 (dot-grouped thousands without decimals)
//! - `"6.2"` → 6.2 (any other dot is the decimal point)

use crate::models::is_blank;

/// Parse a locale-formatted lab value.
///
/// Returns `None` for missing, blank, non-numeric or non-finite input.
pub fn parse_lab_value(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if is_blank(Some(raw)) {
        return None;
    }

    let trimmed = raw.trim();
    let canonical = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else if is_dot_grouped(trimmed) {
        trimmed.replace('.', "")
    } else {
        trimmed.to_string()
    };

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `true` for `1.000`, `11.500`, `1.000.000`: a leading group of 1-3 digits
/// (no leading zero), then one or more `.ddd` groups.
fn is_dot_grouped(s: &str) -> bool {
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = s.split('.');

    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && !g.starts_with('0') && all_digits(g));
    let mut rest = groups.peekable();

    lead_ok && rest.peek().is_some() && rest.all(|g| g.len() == 3 && all_digits(g))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_and_decimal_comma() {
        assert_eq!(parse_lab_value(Some("1.234,56")), Some(1234.56));
        assert_eq!(parse_lab_value(Some("12.500,0")), Some(12500.0));
        assert_eq!(parse_lab_value(Some("1.000.000,5")), Some(1_000_000.5));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_lab_value(Some("6,2")), Some(6.2));
        assert_eq!(parse_lab_value(Some("0,5")), Some(0.5));
    }

    #[test]
    fn test_decimal_point_without_comma() {
        assert_eq!(parse_lab_value(Some("6.2")), Some(6.2));
        assert_eq!(parse_lab_value(Some("20.0")), Some(20.0));
        assert_eq!(parse_lab_value(Some("1000")), Some(1000.0));
        assert_eq!(parse_lab_value(Some("0.125")), Some(0.125));
        assert_eq!(parse_lab_value(Some("12.50")), Some(12.5));
    }

    #[test]
    fn test_dot_grouped_thousands() {
        assert_eq!(parse_lab_value(Some("1.000")), Some(1000.0));
        assert_eq!(parse_lab_value(Some("11.500")), Some(11500.0));
        assert_eq!(parse_lab_value(Some("1.000.000")), Some(1_000_000.0));
        assert_eq!(parse_lab_value(Some("1.0.0")), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_lab_value(Some(" 14,2 ")), Some(14.2));
    }

    #[test]
    fn test_missing_and_invalid() {
        assert_eq!(parse_lab_value(None), None);
        assert_eq!(parse_lab_value(Some("")), None);
        assert_eq!(parse_lab_value(Some("   ")), None);
        assert_eq!(parse_lab_value(Some("abc")), None);
        assert_eq!(parse_lab_value(Some("12 mg")), None);
        assert_eq!(parse_lab_value(Some(",")), None);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(parse_lab_value(Some("inf")), None);
        assert_eq!(parse_lab_value(Some("NaN")), None);
        assert_eq!(parse_lab_value(Some("1e999")), None);
    }
}
