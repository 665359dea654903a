//! Append-only audit trail of cleaning operations.

use std::collections::BTreeMap;

use serde::Serialize;

/// A cleaning operation applied to the working dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanOp {
    DropNulls,
    DropDuplicates,
    DropColumns,
}

impl CleanOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DropNulls => "drop_nulls",
            Self::DropDuplicates => "drop_duplicates",
            Self::DropColumns => "drop_columns",
        }
    }
}

/// One record per applied cleaning operation.
///
/// Params always carry the shape before and after; operations with extra
/// arguments (dropped column names) add them via [`Self::with_param`].
#[derive(Debug, Clone, Serialize)]
pub struct TransformationRecord {
    pub operation: CleanOp,
    pub params: BTreeMap<String, serde_json::Value>,
}

impl TransformationRecord {
    pub fn new(operation: CleanOp, before: (usize, usize), after: (usize, usize)) -> Self {
        let mut params = BTreeMap::new();
        params.insert("rows_before".to_string(), before.0.into());
        params.insert("cols_before".to_string(), before.1.into());
        params.insert("rows_after".to_string(), after.0.into());
        params.insert("cols_after".to_string(), after.1.into());
        Self { operation, params }
    }

    pub fn with_param(mut self, key: &str, value: serde_json::Value) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }
}
