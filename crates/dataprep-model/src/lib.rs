//! Core data model for the dataprep engine.
//!
//! Defines the tabular [`Dataset`] (a polars frame plus per-column kind
//! tags), the wire-safe [`WireValue`] sanitizer, the transformation audit
//! trail, and the two-kind error taxonomy shared by every crate in the
//! workspace.

pub mod convert;
pub mod dataset;
pub mod error;
pub mod history;
pub mod info;
pub mod value;

pub use convert::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
pub use dataset::{ColumnKind, Dataset};
pub use error::{EngineError, Result};
pub use history::{CleanOp, TransformationRecord};
pub use info::{DatasetInfo, PREVIEW_ROWS};
pub use value::{WireValue, sanitize};
