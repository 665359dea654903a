//! Cleaning operations over the working dataset.
//!
//! Each operation produces a new [`Dataset`] value rather than editing in
//! place; the session rebinds its working slot and appends one
//! transformation record per applied operation.

use std::collections::BTreeSet;

use serde::Deserialize;

use dataprep_model::{Dataset, Result};

/// Toggles for one cleaning call. Applied in declaration order:
/// nulls, duplicates, then column drops.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub drop_nulls: bool,
    pub drop_duplicates: bool,
    pub columns_to_drop: Vec<String>,
}

impl CleanOptions {
    /// True when no operation is requested; such a call appends nothing
    /// to the history.
    pub fn is_empty(&self) -> bool {
        !self.drop_nulls && !self.drop_duplicates && self.columns_to_drop.is_empty()
    }
}

/// Removes every row containing at least one missing value.
pub fn drop_null_rows(dataset: &Dataset) -> Result<Dataset> {
    let keep: Vec<bool> = (0..dataset.height())
        .map(|row| !dataset.row_has_missing(row))
        .collect();
    dataset.filter_rows(&keep)
}

/// Removes rows that duplicate an earlier row across all columns,
/// keeping the first occurrence.
pub fn drop_duplicate_rows(dataset: &Dataset) -> Result<Dataset> {
    let mut seen = BTreeSet::new();
    let keep: Vec<bool> = (0..dataset.height())
        .map(|row| seen.insert(dataset.row_key(row)))
        .collect();
    dataset.filter_rows(&keep)
}

/// Removes the named columns; unknown names are ignored.
pub fn drop_columns(dataset: &Dataset, names: &[String]) -> Result<Dataset> {
    dataset.without_columns(names)
}
