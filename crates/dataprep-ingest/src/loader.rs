//! Loader entry points: format detection, read, validation, build.

use std::path::Path;

use tracing::info;

use dataprep_model::{Dataset, EngineError, Result};

use crate::builder::build_dataset;
use crate::table::{RawTable, read_csv_table};
use crate::xlsx::read_xlsx_table;

/// Accepted source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Resolves a format from a file extension (with or without the dot).
    /// Anything other than `csv`/`xlsx` is a validation error.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(EngineError::validation(format!(
                "unsupported file type: .{other}"
            ))),
        }
    }
}

/// Loads a dataset from a file, detecting the format from its extension.
///
/// The loader only reads the file; the caller owns its lifecycle (e.g.
/// deleting an upload temp file afterwards).
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| EngineError::validation("file has no extension"))?;
    load_dataset_with_format(path, SourceFormat::from_extension(extension)?)
}

/// Loads a dataset from a file with an explicit format.
pub fn load_dataset_with_format(path: &Path, format: SourceFormat) -> Result<Dataset> {
    let table = match format {
        SourceFormat::Csv => read_csv_table(path)?,
        SourceFormat::Xlsx => read_xlsx_table(path)?,
    };
    validate_table(&table)?;
    let dataset = build_dataset(&table)?;
    info!(
        rows = dataset.height(),
        cols = dataset.width(),
        path = %path.display(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn validate_table(table: &RawTable) -> Result<()> {
    if table.headers.is_empty() {
        return Err(EngineError::validation("file contains no columns"));
    }
    if table.rows.is_empty() {
        return Err(EngineError::validation("file contains no rows"));
    }
    Ok(())
}
