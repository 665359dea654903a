//! Dataset ingestion: CSV and XLSX parsing into typed datasets.
//!
//! Reading happens in two stages: a format-specific reader produces a
//! [`RawTable`] of normalized strings, then [`build_dataset`] applies the
//! null-token set, classifies each column's kind, and builds the typed
//! [`dataprep_model::Dataset`].

pub mod builder;
pub mod loader;
pub mod table;
pub mod xlsx;

pub use builder::{NULL_TOKENS, build_dataset, is_missing};
pub use loader::{SourceFormat, load_dataset, load_dataset_with_format};
pub use table::{RawTable, read_csv_table};
pub use xlsx::read_xlsx_table;
