//! Parsers for numeric header values that carry a unit

use winnow::{Parser, ascii::float, error::ContextError};

/// Parses the number at the start of `text` and ignores whatever follows, so `"1V"` and
/// `"1.000E+0"` both give `1.0`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let mut input = text.trim_start();
    float::<_, f64, ContextError>.parse_next(&mut input).ok()
}

/// Parses `text` as one number, surrounding whitespace aside. Trailing units are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    float::<_, f64, ContextError>.parse(text.trim()).ok()
}

/// Parses the numeric part of a `"<number> <unit>"` value.
///
/// The first whitespace-delimited token must be a complete number; the unit is not interpreted,
/// so `"100 pA"` gives `100.0`.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    float::<_, f64, ContextError>.parse(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("100 pA"), Some(100.0));
        assert_eq!(parse_quantity("1.000E-10 A"), Some(1.0e-10));
        assert_eq!(parse_quantity("-2.5 nA"), Some(-2.5));
        assert_eq!(parse_quantity("42"), Some(42.0));
    }

    #[test]
    fn test_parse_quantity_rejects_non_numbers() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("pA 100"), None);
        assert_eq!(parse_quantity("100pA"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 3.000E+1 "), Some(30.0));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number("30deg"), None);
        assert_eq!(parse_number("1 V"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("1V"), Some(1.0));
        assert_eq!(parse_leading_number("  -0.5 V"), Some(-0.5));
        assert_eq!(parse_leading_number("1.000E+0"), Some(1.0));
        assert_eq!(parse_leading_number("V1"), None);
    }
}
