//! The data engine: session state, cleaning pipeline, profiling, and
//! plot extraction over an in-memory tabular dataset.

pub mod clean;
pub mod plot;
pub mod profile;
pub mod session;
pub mod stats;

pub use clean::{CleanOptions, drop_columns, drop_duplicate_rows, drop_null_rows};
pub use plot::{PlotData, PlotKind, PlotSeries, extract_plot};
pub use profile::{Profile, build_profile};
pub use session::DataSession;
