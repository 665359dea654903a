//! Column-kind inference and dataset construction.
//!
//! Each column is classified exactly once here; the resulting
//! [`ColumnKind`] tag travels with the dataset so later operations never
//! re-probe value types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use dataprep_model::{ColumnKind, Dataset, EngineError, Result, parse_f64, parse_i64};

use crate::table::RawTable;

/// Tokens recognized as missing values during parse, besides blank cells.
pub const NULL_TOKENS: &[&str] = &["NULL", "null", "None", "N/A", "n/a", "#N/A"];

/// True when a raw cell represents a missing value. Literals that parse
/// to a non-finite float (`NaN`, `inf`) also read as missing, so the
/// column classifies numeric without ever holding a non-finite cell.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || NULL_TOKENS.contains(&trimmed)
        || trimmed.parse::<f64>().is_ok_and(|parsed| !parsed.is_finite())
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses an ISO-style date or datetime string, normalized to ISO-8601.
fn parse_datetime(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }
    if let Ok(value) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(value.format("%Y-%m-%d").to_string());
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InferredType {
    Int,
    Float,
    Datetime,
    Text,
}

/// Classifies a column from its non-missing values. An entirely-missing
/// column defaults to float (same dtype an all-NaN numeric read yields).
fn classify<'a>(values: impl Iterator<Item = &'a str>) -> InferredType {
    let mut any = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_datetime = true;
    for value in values {
        any = true;
        if parse_i64(value).is_none() {
            all_int = false;
        }
        if parse_f64(value).is_none() {
            all_float = false;
        }
        if parse_datetime(value).is_none() {
            all_datetime = false;
        }
        if !all_int && !all_float && !all_datetime {
            return InferredType::Text;
        }
    }
    if !any {
        return InferredType::Float;
    }
    if all_int {
        InferredType::Int
    } else if all_float {
        InferredType::Float
    } else if all_datetime {
        InferredType::Datetime
    } else {
        InferredType::Text
    }
}

/// Builds a typed [`Dataset`] from a raw string table.
pub fn build_dataset(table: &RawTable) -> Result<Dataset> {
    let mut seen = BTreeSet::new();
    for header in &table.headers {
        if !seen.insert(header.as_str()) {
            return Err(EngineError::validation(format!(
                "duplicate column name: {header}"
            )));
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    let mut kinds: BTreeMap<String, ColumnKind> = BTreeMap::new();
    for (idx, header) in table.headers.iter().enumerate() {
        let cells: Vec<Option<&str>> = table
            .rows
            .iter()
            .map(|row| {
                let raw = row.get(idx).map(String::as_str).unwrap_or("");
                if is_missing(raw) { None } else { Some(raw.trim()) }
            })
            .collect();
        let inferred = classify(cells.iter().filter_map(|cell| *cell));
        let series = match inferred {
            InferredType::Int => {
                let values: Vec<Option<i64>> =
                    cells.iter().map(|cell| cell.and_then(parse_i64)).collect();
                Series::new(header.as_str().into(), values)
            }
            InferredType::Float => {
                let values: Vec<Option<f64>> =
                    cells.iter().map(|cell| cell.and_then(parse_f64)).collect();
                Series::new(header.as_str().into(), values)
            }
            InferredType::Datetime => {
                let values: Vec<Option<String>> =
                    cells.iter().map(|cell| cell.and_then(parse_datetime)).collect();
                Series::new(header.as_str().into(), values)
            }
            InferredType::Text => {
                let values: Vec<Option<String>> = cells
                    .iter()
                    .map(|cell| cell.map(ToString::to_string))
                    .collect();
                Series::new(header.as_str().into(), values)
            }
        };
        let kind = match inferred {
            InferredType::Int | InferredType::Float => ColumnKind::Numeric,
            InferredType::Datetime => ColumnKind::Datetime,
            InferredType::Text => ColumnKind::Categorical,
        };
        kinds.insert(header.clone(), kind);
        columns.push(series.into());
    }
    let data = DataFrame::new(columns)
        .map_err(|error| EngineError::processing("build dataset", error))?;
    Ok(Dataset::new(data, kinds))
}
