//! Polars `AnyValue` conversion helpers shared across the workspace.

use polars::prelude::AnyValue;

/// Converts an AnyValue to a display string. Null becomes the empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(v) => v.to_string(),
        AnyValue::StringOwned(v) => v.to_string(),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::Boolean(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float without a trailing `.0` for whole values.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Converts an AnyValue to f64, returning None for null or non-numeric values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::String(v) => parse_f64(v),
        AnyValue::StringOwned(v) => parse_f64(&v),
        _ => None,
    }
}

/// Converts an AnyValue to i64, returning None for null or non-integer values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::String(v) => parse_i64(v),
        AnyValue::StringOwned(v) => parse_i64(&v),
        _ => None,
    }
}

/// Parses a string as f64, treating blank and non-finite input as
/// missing. `NaN`/`inf` literals parse successfully in Rust but must
/// never enter a column: downstream statistics assume finite values.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Parses a string as i64, treating blank input as missing.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_formatting_drops_trailing_zero() {
        assert_eq!(format_numeric(4.0), "4");
        assert_eq!(format_numeric(4.5), "4.5");
    }

    #[test]
    fn parse_blank_is_missing() {
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("1.25"), Some(1.25));
        assert_eq!(parse_i64("17"), Some(17));
        assert_eq!(parse_i64("1.5"), None);
    }

    #[test]
    fn non_finite_literals_are_missing() {
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("nan"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("-inf"), None);
        assert_eq!(parse_f64("Infinity"), None);
        assert_eq!(parse_i64("NaN"), None);
    }

    #[test]
    fn any_value_conversions() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int64(3)), Some(3.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Float64(2.0)), "2");
    }
}
