//! # Form Input Coercion
//!
//! Form fields arrive as text. They are turned into strict numbers here,
//! before anything reaches the engine. Two flavours:
//!
//! - `coerce_*`: lenient, used on every keystroke. Bad text becomes the
//!   field's neutral value (0, or the minimum count).
//! - `parse_*_strict`: used by the CLI and importers, which report bad text
//!   as [`CalcError::InvalidInput`] instead.
//!
//! Both accept a comma as decimal separator ("12,5"). When a comma is
//! present, dots are read as thousands separators ("1.234,5").
//!
//! ```rust
//! use carga_core::input::{coerce_f64, coerce_count};
//!
//! assert_eq!(coerce_f64("1.234,5"), 1234.5);
//! assert_eq!(coerce_f64("abc"), 0.0);
//! assert_eq!(coerce_count("0", 1), 1);
//! ```

use crate::errors::{CalcError, CalcResult};

/// Highest valid risk type code
pub const MAX_RISK_TYPE: u8 = 7;

fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    normalize(raw).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative number; anything else is 0
pub fn coerce_f64(raw: &str) -> f64 {
    match parse_number(raw) {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

/// Whole count of at least `min`; decimals truncate
pub fn coerce_count(raw: &str, min: u32) -> u32 {
    match parse_number(raw) {
        Some(v) if v >= f64::from(min) => v.trunc().min(f64::from(u32::MAX)) as u32,
        _ => min,
    }
}

/// Risk type 0..=7; anything else is 0
pub fn coerce_risk_type(raw: &str) -> u8 {
    match parse_number(raw) {
        Some(v) if v.fract() == 0.0 && (0.0..=f64::from(MAX_RISK_TYPE)).contains(&v) => v as u8,
        _ => 0,
    }
}

/// Non-negative number or an InvalidInput error naming `field`
pub fn parse_f64_strict(field: &str, raw: &str) -> CalcResult<f64> {
    let value = parse_number(raw)
        .ok_or_else(|| CalcError::invalid_input(field, raw, "Not a number"))?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, raw, "Value cannot be negative"));
    }
    Ok(value)
}

/// Whole count of at least `min` or an InvalidInput error naming `field`
pub fn parse_count_strict(field: &str, raw: &str, min: u32) -> CalcResult<u32> {
    let value = parse_number(raw)
        .ok_or_else(|| CalcError::invalid_input(field, raw, "Not a number"))?;
    if value.fract() != 0.0 {
        return Err(CalcError::invalid_input(field, raw, "Must be a whole number"));
    }
    if value < f64::from(min) || value > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(
            field,
            raw,
            format!("Must be at least {}", min),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64("12.5"), 12.5);
        assert_eq!(coerce_f64(" 12,5 "), 12.5);
        assert_eq!(coerce_f64("1.234.567,89"), 1_234_567.89);
        assert_eq!(coerce_f64(""), 0.0);
        assert_eq!(coerce_f64("kg"), 0.0);
        assert_eq!(coerce_f64("-4"), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
        assert_eq!(coerce_f64("inf"), 0.0);
    }

    #[test]
    fn test_dot_without_comma_is_decimal() {
        assert_eq!(coerce_f64("1.5"), 1.5);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("3", 1), 3);
        assert_eq!(coerce_count("3,9", 1), 3);
        assert_eq!(coerce_count("0", 1), 1);
        assert_eq!(coerce_count("x", 1), 1);
        assert_eq!(coerce_count("0", 0), 0);
    }

    #[test]
    fn test_coerce_risk_type() {
        assert_eq!(coerce_risk_type("5"), 5);
        assert_eq!(coerce_risk_type("7"), 7);
        assert_eq!(coerce_risk_type("8"), 0);
        assert_eq!(coerce_risk_type("2.5"), 0);
        assert_eq!(coerce_risk_type(""), 0);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_f64_strict("weight_kg", "10,5").unwrap(), 10.5);
        let err = parse_f64_strict("weight_kg", "diez").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(parse_f64_strict("weight_kg", "-1").is_err());

        assert_eq!(parse_count_strict("sector_count", "2", 1).unwrap(), 2);
        assert!(parse_count_strict("sector_count", "0", 1).is_err());
        assert!(parse_count_strict("sector_count", "1.5", 1).is_err());
    }
}
