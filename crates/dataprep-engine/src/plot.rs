//! Plot series extraction: paired/unpaired values for the front end.

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};

use dataprep_model::{Dataset, EngineError, Result, WireValue, sanitize};

/// Supported plot types. Anything else is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Histogram,
    Scatter,
}

impl PlotKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "histogram" => Ok(Self::Histogram),
            "scatter" => Ok(Self::Scatter),
            other => Err(EngineError::validation(format!(
                "unsupported plot type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotSeries {
    pub x: Vec<WireValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<WireValue>>,
    #[serde(rename = "type")]
    pub kind: PlotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub data: Vec<PlotSeries>,
}

fn require_column(dataset: &Dataset, name: &str) -> Result<()> {
    if dataset.has_column(name) {
        Ok(())
    } else {
        Err(EngineError::validation(format!("column not found: {name}")))
    }
}

/// Extracts plot data for the requested kind.
///
/// Histogram: values of `x` with missing entries dropped. Scatter:
/// row-aligned values of `x` and `y`, dropping any row where either is
/// missing.
pub fn extract_plot(
    dataset: &Dataset,
    kind: PlotKind,
    x: &str,
    y: Option<&str>,
) -> Result<PlotData> {
    require_column(dataset, x)?;
    let series = match kind {
        PlotKind::Histogram => {
            let values: Vec<WireValue> = (0..dataset.height())
                .filter_map(|row| match dataset.cell(x, row) {
                    AnyValue::Null => None,
                    value => Some(sanitize(value)),
                })
                .collect();
            PlotSeries {
                x: values,
                y: None,
                kind,
                mode: None,
            }
        }
        PlotKind::Scatter => {
            let y = y.ok_or_else(|| {
                EngineError::validation("scatter plot requires a y column")
            })?;
            require_column(dataset, y)?;
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for row in 0..dataset.height() {
                let x_value = dataset.cell(x, row);
                let y_value = dataset.cell(y, row);
                if matches!(x_value, AnyValue::Null) || matches!(y_value, AnyValue::Null) {
                    continue;
                }
                xs.push(sanitize(x_value));
                ys.push(sanitize(y_value));
            }
            PlotSeries {
                x: xs,
                y: Some(ys),
                kind,
                mode: Some("markers".to_string()),
            }
        }
    };
    Ok(PlotData { data: vec![series] })
}
