//! Wire-safe value representation.
//!
//! Every cell the engine emits (previews, plot series, summaries) passes
//! through [`sanitize`] first, so serialized output never contains a NaN
//! or Infinity literal: missing and non-finite values become JSON `null`.

use polars::prelude::AnyValue;
use serde::Serialize;

/// A value that is safe to serialize on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<WireValue>),
}

impl WireValue {
    /// Wraps a float, mapping NaN and infinities to `Null`.
    pub fn float(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Null
        }
    }

    /// Wraps an optional float, mapping absent and non-finite to `Null`.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::float(v),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Converts a dataset cell into its wire representation.
///
/// Integral values stay integers, floats stay floats (non-finite mapped
/// to null), strings pass through, and anything else is rendered as text.
pub fn sanitize(value: AnyValue<'_>) -> WireValue {
    match value {
        AnyValue::Null => WireValue::Null,
        AnyValue::Boolean(v) => WireValue::Bool(v),
        AnyValue::Int8(v) => WireValue::Int(i64::from(v)),
        AnyValue::Int16(v) => WireValue::Int(i64::from(v)),
        AnyValue::Int32(v) => WireValue::Int(i64::from(v)),
        AnyValue::Int64(v) => WireValue::Int(v),
        AnyValue::UInt8(v) => WireValue::Int(i64::from(v)),
        AnyValue::UInt16(v) => WireValue::Int(i64::from(v)),
        AnyValue::UInt32(v) => WireValue::Int(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => WireValue::Int(v),
            Err(_) => WireValue::float(v as f64),
        },
        AnyValue::Float32(v) => WireValue::float(f64::from(v)),
        AnyValue::Float64(v) => WireValue::float(v),
        AnyValue::String(v) => WireValue::Text(v.to_string()),
        AnyValue::StringOwned(v) => WireValue::Text(v.to_string()),
        other => WireValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_and_infinity_become_null() {
        assert_eq!(sanitize(AnyValue::Float64(f64::NAN)), WireValue::Null);
        assert_eq!(sanitize(AnyValue::Float64(f64::INFINITY)), WireValue::Null);
        assert_eq!(
            sanitize(AnyValue::Float64(f64::NEG_INFINITY)),
            WireValue::Null
        );
        assert_eq!(WireValue::from_option(None), WireValue::Null);
    }

    #[test]
    fn integral_values_stay_integers() {
        assert_eq!(sanitize(AnyValue::Int64(4)), WireValue::Int(4));
        assert_eq!(sanitize(AnyValue::UInt8(4)), WireValue::Int(4));
        // A float column keeps its floating representation.
        assert_eq!(sanitize(AnyValue::Float64(4.0)), WireValue::Float(4.0));
    }

    #[test]
    fn serializes_without_nan_literals() {
        let values = WireValue::List(vec![
            WireValue::Int(1),
            WireValue::float(f64::NAN),
            WireValue::Text("a".to_string()),
        ]);
        let json = serde_json::to_string(&values).expect("serialize wire values");
        assert_eq!(json, r#"[1,null,"a"]"#);
        assert!(!json.contains("NaN"));
    }

    #[test]
    fn null_serializes_as_json_null() {
        let json = serde_json::to_string(&WireValue::Null).expect("serialize null");
        assert_eq!(json, "null");
    }
}
