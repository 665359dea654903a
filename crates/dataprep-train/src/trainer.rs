//! The training facade: validation ladder, imputation, split, fit,
//! and evaluation for one ordinary least-squares run.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use serde::Serialize;
use tracing::info;

use dataprep_model::{Dataset, EngineError, Result};

use crate::linear::LinearModel;
use crate::metrics::{mae, precision_recall_at_threshold, r2_score, rmse};
use crate::split::{SPLIT_SEED, train_test_split};

/// Output of one training run.
#[derive(Debug, Clone, Serialize)]
pub struct ModelResult {
    pub model_type: String,
    pub feature_columns: Vec<String>,
    pub target_column: String,
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
    pub precision: f64,
    pub recall: f64,
    /// Fitted coefficient per feature column.
    pub feature_importance: BTreeMap<String, f64>,
    pub intercept: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Trains ordinary least-squares models over a handed-in dataset.
///
/// Stateless per call apart from retaining the last result; it keeps no
/// history and no original snapshot. One trainer per logical session,
/// with the caller serializing concurrent use.
#[derive(Debug, Default)]
pub struct ModelTrainer {
    dataset: Option<Dataset>,
    last_result: Option<ModelResult>,
}

impl ModelTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
    }

    pub fn last_result(&self) -> Option<&ModelResult> {
        self.last_result.as_ref()
    }

    /// Splits, fits, and evaluates a linear regression of `target` on
    /// `features`.
    ///
    /// Missing feature values are imputed with the column mean computed
    /// over the full dataset before splitting; rows with a missing
    /// target are excluded entirely. The split uses a pinned seed, so
    /// repeated calls on identical input return identical results.
    pub fn train(
        &mut self,
        features: &[String],
        target: &str,
        test_size: f64,
    ) -> Result<ModelResult> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or_else(|| EngineError::validation("no data loaded"))?;
        if target.is_empty() {
            return Err(EngineError::validation("target column must be specified"));
        }
        if features.is_empty() {
            return Err(EngineError::validation(
                "at least one feature column must be selected",
            ));
        }
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(EngineError::validation(
                "test_size must be strictly between 0 and 1",
            ));
        }
        for name in features.iter().map(String::as_str).chain([target]) {
            if !dataset.has_column(name) {
                return Err(EngineError::validation(format!(
                    "column not found in dataset: {name}"
                )));
            }
            if !dataset.kind(name).is_some_and(|kind| kind.is_numeric()) {
                return Err(EngineError::validation(format!(
                    "column is not numeric: {name}"
                )));
            }
        }

        // Column means over the full dataset, before any filtering.
        let mut feature_values: Vec<Vec<f64>> = Vec::with_capacity(features.len());
        for name in features {
            let raw = dataset.numeric_values(name)?;
            let present: Vec<f64> = raw.iter().copied().flatten().collect();
            if present.is_empty() {
                return Err(EngineError::validation(format!(
                    "feature column is entirely missing: {name}"
                )));
            }
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            feature_values.push(raw.into_iter().map(|v| v.unwrap_or(mean)).collect());
        }
        let target_values = dataset.numeric_values(target)?;
        let kept_rows: Vec<usize> = target_values
            .iter()
            .enumerate()
            .filter_map(|(row, value)| value.is_some().then_some(row))
            .collect();
        if kept_rows.is_empty() {
            return Err(EngineError::validation(format!(
                "target column is entirely missing: {target}"
            )));
        }

        let split = train_test_split(kept_rows.len(), test_size, SPLIT_SEED)?;
        let build = |indices: &[usize]| -> (Array2<f64>, Array1<f64>) {
            let mut x = Array2::<f64>::zeros((indices.len(), features.len()));
            let mut y = Array1::<f64>::zeros(indices.len());
            for (out_row, &idx) in indices.iter().enumerate() {
                let row = kept_rows[idx];
                for (col, values) in feature_values.iter().enumerate() {
                    x[[out_row, col]] = values[row];
                }
                y[out_row] = target_values[row].expect("kept rows have a target");
            }
            (x, y)
        };
        let (x_train, y_train) = build(&split.train);
        let (x_test, y_test) = build(&split.test);

        let model = LinearModel::fit(&x_train, &y_train)?;
        let y_pred = model.predict(&x_test);

        let threshold = median(y_test.as_slice().expect("contiguous array"));
        let (precision, recall) =
            precision_recall_at_threshold(&y_test, &y_pred, threshold);

        let feature_importance = features
            .iter()
            .cloned()
            .zip(model.coefficients.iter().copied())
            .collect();
        let result = ModelResult {
            model_type: "linear_regression".to_string(),
            feature_columns: features.to_vec(),
            target_column: target.to_string(),
            r2: r2_score(&y_test, &y_pred),
            rmse: rmse(&y_test, &y_pred),
            mae: mae(&y_test, &y_pred),
            precision,
            recall,
            feature_importance,
            intercept: model.intercept,
            train_size: split.train.len(),
            test_size: split.test.len(),
        };
        info!(
            r2 = result.r2,
            rmse = result.rmse,
            train = result.train_size,
            test = result.test_size,
            "model trained"
        );
        self.last_result = Some(result.clone());
        Ok(result)
    }
}

/// Median of the test-set targets, the binarization threshold.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
