//! Per-session engine state.
//!
//! A [`DataSession`] owns one working dataset, one immutable original
//! snapshot, and the transformation history for one user's interaction
//! lifetime. The engine performs no locking: callers must serialize
//! mutating calls on a session, and distinct sessions never share state.

use std::path::Path;

use tracing::{debug, info};

use dataprep_model::{
    CleanOp, Dataset, DatasetInfo, EngineError, Result, TransformationRecord,
};

use crate::clean::{CleanOptions, drop_columns, drop_duplicate_rows, drop_null_rows};
use crate::plot::{PlotData, PlotKind, extract_plot};
use crate::profile::{Profile, build_profile};

#[derive(Debug, Default)]
pub struct DataSession {
    working: Option<Dataset>,
    original: Option<Dataset>,
    history: Vec<TransformationRecord>,
}

impl DataSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a dataset from disk and installs it as the session state.
    pub fn load_path(&mut self, path: &Path) -> Result<DatasetInfo> {
        let dataset = dataprep_ingest::load_dataset(path)?;
        Ok(self.install(dataset))
    }

    /// Installs an already-built dataset: the working copy, an
    /// independent original snapshot, and a cleared history. A second
    /// install replaces all three.
    pub fn install(&mut self, dataset: Dataset) -> DatasetInfo {
        self.original = Some(dataset.clone());
        self.working = Some(dataset);
        self.history.clear();
        self.info().expect("dataset was just installed")
    }

    /// The current working dataset, or a validation error when nothing
    /// has been loaded.
    pub fn dataset(&self) -> Result<&Dataset> {
        self.working
            .as_ref()
            .ok_or_else(|| EngineError::validation("no data loaded"))
    }

    /// The working dataset for callers that persist it after cleaning.
    pub fn working(&self) -> Option<&Dataset> {
        self.working.as_ref()
    }

    pub fn history(&self) -> &[TransformationRecord] {
        &self.history
    }

    /// Info about the current working dataset.
    pub fn info(&self) -> Result<DatasetInfo> {
        Ok(DatasetInfo::describe(self.dataset()?, &self.history))
    }

    /// Applies the requested cleaning operations in a fixed order:
    /// drop nulls, then duplicates, then named columns. One record is
    /// appended per applied operation, whether or not the shape changed;
    /// a call with no toggles set appends nothing.
    pub fn clean(&mut self, options: &CleanOptions) -> Result<DatasetInfo> {
        let mut dataset = self.dataset()?.clone();
        debug!(?options, "cleaning dataset");
        let mut applied = Vec::new();

        if options.drop_nulls {
            let before = dataset.shape();
            dataset = drop_null_rows(&dataset)?;
            applied.push(TransformationRecord::new(
                CleanOp::DropNulls,
                before,
                dataset.shape(),
            ));
        }
        if options.drop_duplicates {
            let before = dataset.shape();
            dataset = drop_duplicate_rows(&dataset)?;
            applied.push(TransformationRecord::new(
                CleanOp::DropDuplicates,
                before,
                dataset.shape(),
            ));
        }
        if !options.columns_to_drop.is_empty() {
            let before = dataset.shape();
            dataset = drop_columns(&dataset, &options.columns_to_drop)?;
            applied.push(
                TransformationRecord::new(CleanOp::DropColumns, before, dataset.shape())
                    .with_param(
                        "columns",
                        serde_json::json!(options.columns_to_drop),
                    ),
            );
        }

        if !applied.is_empty() {
            info!(
                operations = applied.len(),
                rows = dataset.height(),
                cols = dataset.width(),
                "dataset cleaned"
            );
        }
        self.history.extend(applied);
        self.working = Some(dataset);
        self.info()
    }

    /// Replaces the working dataset with a fresh copy of the original
    /// snapshot and clears the history.
    pub fn reset(&mut self) -> Result<DatasetInfo> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| EngineError::validation("no original data available"))?;
        self.working = Some(original.clone());
        self.history.clear();
        info!("dataset reset to original");
        self.info()
    }

    /// Computes a fresh profile of the working dataset.
    pub fn profile(&self) -> Result<Profile> {
        build_profile(self.dataset()?, &self.history)
    }

    /// Extracts plot data from the working dataset.
    pub fn plot(&self, kind: PlotKind, x: &str, y: Option<&str>) -> Result<PlotData> {
        extract_plot(self.dataset()?, kind, x, y)
    }
}
