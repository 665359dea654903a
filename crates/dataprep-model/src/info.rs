//! Dataset summary returned by load, clean, and reset.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::history::TransformationRecord;
use crate::value::WireValue;

/// Number of rows included in sanitized previews.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    /// `[rows, cols]`.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub dtypes: BTreeMap<String, String>,
    /// Estimated in-memory size in bytes.
    pub memory_usage: usize,
    pub missing: BTreeMap<String, usize>,
    pub transformations: Vec<TransformationRecord>,
    pub preview: Vec<BTreeMap<String, WireValue>>,
}

impl DatasetInfo {
    pub fn describe(dataset: &Dataset, history: &[TransformationRecord]) -> Self {
        Self {
            shape: dataset.shape(),
            columns: dataset.column_names(),
            dtypes: dataset.dtype_labels(),
            memory_usage: dataset.estimated_size(),
            missing: dataset.missing_counts(),
            transformations: history.to_vec(),
            preview: dataset.preview(PREVIEW_ROWS),
        }
    }
}
