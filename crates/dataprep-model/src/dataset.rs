//! The in-memory tabular dataset.
//!
//! A [`Dataset`] wraps a polars [`DataFrame`] together with a per-column
//! [`ColumnKind`] tag. Kinds are classified once at load time and never
//! change afterwards: cleaning operations may remove rows or columns but
//! never add or retype them. Missing cells are polars nulls.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, Series};
use serde::Serialize;

use crate::convert::{any_to_f64, any_to_i64, any_to_string};
use crate::error::{EngineError, Result};
use crate::value::{WireValue, sanitize};

/// Declared kind of a column, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Datetime,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    data: DataFrame,
    kinds: BTreeMap<String, ColumnKind>,
}

impl Dataset {
    pub fn new(data: DataFrame, kinds: BTreeMap<String, ColumnKind>) -> Self {
        Self { data, kinds }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.data.height(), self.data.width())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.kinds.get(name).copied()
    }

    pub fn kinds(&self) -> &BTreeMap<String, ColumnKind> {
        &self.kinds
    }

    /// Estimated in-memory size of the dataset in bytes.
    pub fn estimated_size(&self) -> usize {
        self.data.estimated_size()
    }

    /// Dtype label per column, in the style of the underlying storage
    /// (`int64`/`float64` for numeric, `object` for text, `datetime` for
    /// tagged datetime columns).
    pub fn dtype_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        for column in self.data.get_columns() {
            let name = column.name().to_string();
            let label = match self.kinds.get(&name) {
                Some(ColumnKind::Datetime) => "datetime",
                _ => match column.dtype() {
                    DataType::Int64 => "int64",
                    DataType::Float64 => "float64",
                    _ => "object",
                },
            };
            labels.insert(name, label.to_string());
        }
        labels
    }

    /// Per-column count of missing cells.
    pub fn missing_counts(&self) -> BTreeMap<String, usize> {
        self.data
            .get_columns()
            .iter()
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect()
    }

    /// Cell accessor; out-of-range and lookup failures read as missing.
    pub fn cell(&self, name: &str, row: usize) -> AnyValue<'_> {
        match self.data.column(name) {
            Ok(column) => column.get(row).unwrap_or(AnyValue::Null),
            Err(_) => AnyValue::Null,
        }
    }

    /// True when any cell in the row is missing.
    pub fn row_has_missing(&self, row: usize) -> bool {
        self.data.get_columns().iter().any(|column| {
            matches!(column.get(row).unwrap_or(AnyValue::Null), AnyValue::Null)
        })
    }

    /// Stable textual key for duplicate-row detection. Missing cells get
    /// a marker that cannot collide with rendered values.
    pub fn row_key(&self, row: usize) -> String {
        let mut key = String::new();
        for column in self.data.get_columns() {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            match value {
                AnyValue::Null => key.push('\u{0}'),
                other => key.push_str(&any_to_string(other)),
            }
            key.push('\u{1f}');
        }
        key
    }

    /// The numeric values of a column as `Option<f64>` per row.
    ///
    /// Fails with a validation error when the column does not exist.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self
            .data
            .column(name)
            .map_err(|_| EngineError::validation(format!("column not found: {name}")))?;
        Ok((0..self.data.height())
            .map(|row| any_to_f64(column.get(row).unwrap_or(AnyValue::Null)))
            .collect())
    }

    /// Sanitized first `limit` rows, one map per row.
    pub fn preview(&self, limit: usize) -> Vec<BTreeMap<String, WireValue>> {
        let rows = self.data.height().min(limit);
        (0..rows)
            .map(|row| {
                self.data
                    .get_columns()
                    .iter()
                    .map(|column| {
                        let value = column.get(row).unwrap_or(AnyValue::Null);
                        (column.name().to_string(), sanitize(value))
                    })
                    .collect()
            })
            .collect()
    }

    /// New dataset keeping only rows where `keep` is true.
    ///
    /// Column kinds and dtypes are preserved; `keep` must cover every row.
    pub fn filter_rows(&self, keep: &[bool]) -> Result<Self> {
        let rows: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(row, &kept)| kept.then_some(row))
            .collect();
        let mut columns: Vec<Column> = Vec::with_capacity(self.data.width());
        for column in self.data.get_columns() {
            let name = column.name().clone();
            let rebuilt = match column.dtype() {
                DataType::Int64 => {
                    let values: Vec<Option<i64>> = rows
                        .iter()
                        .map(|&row| any_to_i64(column.get(row).unwrap_or(AnyValue::Null)))
                        .collect();
                    Series::new(name, values)
                }
                DataType::Float64 => {
                    let values: Vec<Option<f64>> = rows
                        .iter()
                        .map(|&row| any_to_f64(column.get(row).unwrap_or(AnyValue::Null)))
                        .collect();
                    Series::new(name, values)
                }
                _ => {
                    let values: Vec<Option<String>> = rows
                        .iter()
                        .map(|&row| match column.get(row).unwrap_or(AnyValue::Null) {
                            AnyValue::Null => None,
                            other => Some(any_to_string(other)),
                        })
                        .collect();
                    Series::new(name, values)
                }
            };
            columns.push(rebuilt.into());
        }
        let data = DataFrame::new(columns)
            .map_err(|error| EngineError::processing("rebuild dataset", error))?;
        Ok(Self {
            data,
            kinds: self.kinds.clone(),
        })
    }

    /// New dataset without the named columns. Unknown names are ignored.
    pub fn without_columns(&self, names: &[String]) -> Result<Self> {
        let columns: Vec<Column> = self
            .data
            .get_columns()
            .iter()
            .filter(|column| !names.iter().any(|name| name == column.name().as_str()))
            .cloned()
            .collect();
        let data = DataFrame::new(columns)
            .map_err(|error| EngineError::processing("drop columns", error))?;
        let kinds = self
            .kinds
            .iter()
            .filter(|(name, _)| !names.contains(name))
            .map(|(name, kind)| (name.clone(), *kind))
            .collect();
        Ok(Self { data, kinds })
    }
}
