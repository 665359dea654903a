//! On-demand statistical profile of the working dataset.
//!
//! A profile is derived state: computed fresh from the current working
//! dataset on every request, never cached across mutations. All emitted
//! values pass through the wire sanitizer, so undefined statistics show
//! up as explicit nulls.

use std::collections::BTreeMap;

use polars::prelude::AnyValue;
use serde::Serialize;

use dataprep_model::{
    ColumnKind, Dataset, DatasetInfo, Result, TransformationRecord, WireValue, any_to_string,
};

use crate::stats;

#[derive(Debug, Clone, Serialize)]
pub struct DtypeSummary {
    pub numeric: usize,
    pub categorical: usize,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingSummary {
    pub total: usize,
    pub by_column: BTreeMap<String, usize>,
    /// Percentage of missing cells per column, rounded to 2 decimals.
    pub percentage: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericColumnSummary {
    /// Count of non-missing values.
    pub count: usize,
    pub mean: WireValue,
    pub std: WireValue,
    pub min: WireValue,
    pub max: WireValue,
    pub q25: WireValue,
    pub median: WireValue,
    pub q75: WireValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub info: DatasetInfo,
    pub dtypes: DtypeSummary,
    pub missing: MissingSummary,
    pub numeric_summary: BTreeMap<String, NumericColumnSummary>,
    pub categorical_summary: BTreeMap<String, BTreeMap<String, usize>>,
    pub correlation: BTreeMap<String, BTreeMap<String, WireValue>>,
}

/// Builds the full profile for a dataset.
pub fn build_profile(dataset: &Dataset, history: &[TransformationRecord]) -> Result<Profile> {
    Ok(Profile {
        info: DatasetInfo::describe(dataset, history),
        dtypes: dtype_summary(dataset),
        missing: missing_summary(dataset),
        numeric_summary: numeric_summary(dataset)?,
        categorical_summary: categorical_summary(dataset),
        correlation: correlation_matrix(dataset)?,
    })
}

fn dtype_summary(dataset: &Dataset) -> DtypeSummary {
    let numeric = dataset
        .kinds()
        .values()
        .filter(|kind| kind.is_numeric())
        .count();
    let categorical = dataset
        .kinds()
        .values()
        .filter(|kind| **kind == ColumnKind::Categorical)
        .count();
    DtypeSummary {
        numeric,
        categorical,
        details: dataset.dtype_labels(),
    }
}

fn missing_summary(dataset: &Dataset) -> MissingSummary {
    let by_column = dataset.missing_counts();
    let total = by_column.values().sum();
    let rows = dataset.height();
    let percentage = by_column
        .iter()
        .map(|(name, &count)| {
            let pct = if rows == 0 {
                0.0
            } else {
                (count as f64 / rows as f64 * 10_000.0).round() / 100.0
            };
            (name.clone(), pct)
        })
        .collect();
    MissingSummary {
        total,
        by_column,
        percentage,
    }
}

fn numeric_summary(dataset: &Dataset) -> Result<BTreeMap<String, NumericColumnSummary>> {
    let mut summary = BTreeMap::new();
    for (name, kind) in dataset.kinds() {
        if !kind.is_numeric() {
            continue;
        }
        let mut values: Vec<f64> = dataset
            .numeric_values(name)?
            .into_iter()
            .flatten()
            .collect();
        values.sort_by(f64::total_cmp);
        summary.insert(
            name.clone(),
            NumericColumnSummary {
                count: values.len(),
                mean: WireValue::from_option(stats::mean(&values)),
                std: WireValue::from_option(stats::std_dev(&values)),
                min: WireValue::from_option(values.first().copied()),
                max: WireValue::from_option(values.last().copied()),
                q25: WireValue::from_option(stats::percentile(&values, 0.25)),
                median: WireValue::from_option(stats::percentile(&values, 0.5)),
                q75: WireValue::from_option(stats::percentile(&values, 0.75)),
            },
        );
    }
    Ok(summary)
}

fn categorical_summary(dataset: &Dataset) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut summary = BTreeMap::new();
    for (name, kind) in dataset.kinds() {
        if *kind != ColumnKind::Categorical {
            continue;
        }
        let mut frequencies: BTreeMap<String, usize> = BTreeMap::new();
        for row in 0..dataset.height() {
            let label = match dataset.cell(name, row) {
                AnyValue::Null => "null".to_string(),
                other => any_to_string(other),
            };
            *frequencies.entry(label).or_insert(0) += 1;
        }
        summary.insert(name.clone(), frequencies);
    }
    summary
}

/// Pairwise Pearson correlation over numeric columns.
///
/// Empty when fewer than two numeric columns exist. Each pair uses only
/// rows where both values are present; the diagonal is exactly 1.0 for
/// columns with nonzero variance, and undefined entries are nulls.
fn correlation_matrix(
    dataset: &Dataset,
) -> Result<BTreeMap<String, BTreeMap<String, WireValue>>> {
    let numeric_columns: Vec<String> = dataset
        .kinds()
        .iter()
        .filter(|(_, kind)| kind.is_numeric())
        .map(|(name, _)| name.clone())
        .collect();
    if numeric_columns.len() < 2 {
        return Ok(BTreeMap::new());
    }
    let mut columns: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for name in &numeric_columns {
        columns.insert(name.as_str(), dataset.numeric_values(name)?);
    }
    let mut matrix = BTreeMap::new();
    for a in &numeric_columns {
        let mut row = BTreeMap::new();
        for b in &numeric_columns {
            let value = if a == b {
                let values: Vec<f64> =
                    columns[a.as_str()].iter().copied().flatten().collect();
                match stats::std_dev(&values) {
                    Some(std) if std > 0.0 => Some(1.0),
                    _ => None,
                }
            } else {
                let pairs: Vec<(f64, f64)> = columns[a.as_str()]
                    .iter()
                    .zip(columns[b.as_str()].iter())
                    .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                    .collect();
                stats::pearson(&pairs)
            };
            row.insert(b.clone(), WireValue::from_option(value));
        }
        matrix.insert(a.clone(), row);
    }
    Ok(matrix)
}
